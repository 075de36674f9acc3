//! Layout model for the start screen and the board screen, plus hit testing.

use app::press::HitTarget;
use taffy::TaffyTree;
use taffy::prelude::*;
use whowho_core::{BOARD_SIZE, Slot};

pub const GRID_COLUMNS: usize = 6;
pub const GRID_ROWS: usize = BOARD_SIZE / GRID_COLUMNS;
const CELL_GAP: f32 = 12.0;
pub const CAPTION_HEIGHT: f32 = 20.0;
const SECRET_CARD_SIZE: f32 = 104.0;
const SECRET_PANEL_HEIGHT: f32 = SECRET_CARD_SIZE + CAPTION_HEIGHT + 16.0;
const START_COLUMN_WIDTH: f32 = 360.0;
const START_ROW_HEIGHT: f32 = 56.0;
const START_ROW_GAP: f32 = 18.0;
const JOIN_BUTTON_WIDTH: f32 = 110.0;

pub struct LayoutNodes {
    root: NodeId,
    header: NodeId,
    secret: NodeId,
    grid: NodeId,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PanelRect {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

pub struct StartLayout {
    pub title: PanelRect,
    pub generate: PanelRect,
    pub entry: PanelRect,
    pub join: PanelRect,
    pub notice: PanelRect,
}

pub struct FrameLayout {
    pub header: PanelRect,
    pub secret_panel: PanelRect,
    pub secret_card: PanelRect,
    /// Card rectangles in slot order; captions sit directly below each card.
    pub cards: Vec<PanelRect>,
    pub start: StartLayout,
}

impl FrameLayout {
    pub fn hit_test(&self, playing: bool, x: f32, y: f32) -> Option<HitTarget> {
        if !playing {
            if self.start.generate.contains(x, y) {
                return Some(HitTarget::GenerateButton);
            }
            if self.start.join.contains(x, y) {
                return Some(HitTarget::JoinButton);
            }
            return None;
        }
        if self.secret_card.contains(x, y) {
            return Some(HitTarget::SecretDisplay);
        }
        self.cards
            .iter()
            .position(|card| card.contains(x, y))
            .and_then(Slot::new)
            .map(HitTarget::Slot)
    }
}

pub fn setup_layout(taffy: &mut TaffyTree<()>) -> LayoutNodes {
    let header = taffy
        .new_leaf(Style {
            size: Size { width: percent(1.0), height: length(40.0) },
            margin: taffy::Rect { left: zero(), right: zero(), top: zero(), bottom: length(12.0) },
            ..Default::default()
        })
        .expect("header node");
    let secret = taffy
        .new_leaf(Style {
            size: Size { width: percent(1.0), height: length(SECRET_PANEL_HEIGHT) },
            margin: taffy::Rect { left: zero(), right: zero(), top: zero(), bottom: length(16.0) },
            ..Default::default()
        })
        .expect("secret node");
    let grid = taffy.new_leaf(Style { flex_grow: 1.0, ..Default::default() }).expect("grid node");
    let root = taffy
        .new_with_children(
            Style {
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                size: Size { width: percent(1.0), height: percent(1.0) },
                padding: taffy::Rect {
                    left: length(20.0),
                    right: length(20.0),
                    top: length(16.0),
                    bottom: length(20.0),
                },
                ..Default::default()
            },
            &[header, secret, grid],
        )
        .expect("root node");
    LayoutNodes { root, header, secret, grid }
}

pub fn compute_frame_layout(
    taffy: &mut TaffyTree<()>,
    nodes: &LayoutNodes,
    viewport_width: f32,
    viewport_height: f32,
) -> FrameLayout {
    let available_size = Size {
        width: AvailableSpace::Definite(viewport_width),
        height: AvailableSpace::Definite(viewport_height),
    };
    taffy.compute_layout(nodes.root, available_size).expect("compute layout");

    let l_root = taffy.layout(nodes.root).expect("root layout");
    let l_header = taffy.layout(nodes.header).expect("header layout");
    let l_secret = taffy.layout(nodes.secret).expect("secret layout");
    let l_grid = taffy.layout(nodes.grid).expect("grid layout");

    let secret_panel = panel_rect(l_secret, &[l_root]);
    FrameLayout {
        header: panel_rect(l_header, &[l_root]),
        secret_panel,
        secret_card: PanelRect {
            x: secret_panel.x + (secret_panel.width - SECRET_CARD_SIZE) / 2.0,
            y: secret_panel.y,
            width: SECRET_CARD_SIZE,
            height: SECRET_CARD_SIZE,
        },
        cards: grid_cards(panel_rect(l_grid, &[l_root])),
        start: start_layout(viewport_width, viewport_height),
    }
}

/// Square cards in a fixed 6x4 grid, centered inside `grid`.
fn grid_cards(grid: PanelRect) -> Vec<PanelRect> {
    let columns = GRID_COLUMNS as f32;
    let rows = GRID_ROWS as f32;
    let by_width = (grid.width - CELL_GAP * (columns - 1.0)) / columns;
    let by_height = (grid.height - CELL_GAP * (rows - 1.0) - CAPTION_HEIGHT * rows) / rows;
    let card = by_width.min(by_height).max(1.0);

    let used_width = card * columns + CELL_GAP * (columns - 1.0);
    let origin_x = grid.x + ((grid.width - used_width) / 2.0).max(0.0);

    (0..BOARD_SIZE)
        .map(|slot| {
            let column = (slot % GRID_COLUMNS) as f32;
            let row = (slot / GRID_COLUMNS) as f32;
            PanelRect {
                x: origin_x + column * (card + CELL_GAP),
                y: grid.y + row * (card + CAPTION_HEIGHT + CELL_GAP),
                width: card,
                height: card,
            }
        })
        .collect()
}

fn start_layout(viewport_width: f32, viewport_height: f32) -> StartLayout {
    let column_width = START_COLUMN_WIDTH.min(viewport_width - 32.0).max(120.0);
    let x = (viewport_width - column_width) / 2.0;
    let total_height = START_ROW_HEIGHT * 4.0 + START_ROW_GAP * 3.0;
    let top = ((viewport_height - total_height) / 2.0).max(16.0);
    let row = |index: f32| top + index * (START_ROW_HEIGHT + START_ROW_GAP);

    StartLayout {
        title: PanelRect { x, y: row(0.0), width: column_width, height: START_ROW_HEIGHT },
        generate: PanelRect { x, y: row(1.0), width: column_width, height: START_ROW_HEIGHT },
        entry: PanelRect {
            x,
            y: row(2.0),
            width: column_width - JOIN_BUTTON_WIDTH - 8.0,
            height: START_ROW_HEIGHT,
        },
        join: PanelRect {
            x: x + column_width - JOIN_BUTTON_WIDTH,
            y: row(2.0),
            width: JOIN_BUTTON_WIDTH,
            height: START_ROW_HEIGHT,
        },
        notice: PanelRect { x, y: row(3.0), width: column_width, height: START_ROW_HEIGHT },
    }
}

fn panel_rect(layout: &taffy::Layout, parents: &[&taffy::Layout]) -> PanelRect {
    let mut x = layout.location.x;
    let mut y = layout.location.y;
    for parent in parents {
        x += parent.location.x;
        y += parent.location.y;
    }

    PanelRect { x, y, width: layout.size.width, height: layout.size.height }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(width: f32, height: f32) -> FrameLayout {
        let mut taffy = TaffyTree::new();
        let nodes = setup_layout(&mut taffy);
        compute_frame_layout(&mut taffy, &nodes, width, height)
    }

    fn center(rect: PanelRect) -> (f32, f32) {
        (rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
    }

    #[test]
    fn grid_has_one_card_per_slot_inside_the_window() {
        let frame = layout(960.0, 720.0);
        assert_eq!(frame.cards.len(), BOARD_SIZE);
        for card in &frame.cards {
            assert!(card.x >= 0.0 && card.x + card.width <= 960.0);
            assert!(card.y + card.height + CAPTION_HEIGHT <= 720.0 + 0.5);
        }
    }

    #[test]
    fn cards_do_not_overlap() {
        let frame = layout(960.0, 720.0);
        for (index, card) in frame.cards.iter().enumerate() {
            let (x, y) = center(*card);
            let hits = frame.cards.iter().filter(|other| other.contains(x, y)).count();
            assert_eq!(hits, 1, "card {index} overlaps another");
        }
    }

    #[test]
    fn hit_test_maps_cards_to_slots_and_secret_display() {
        let frame = layout(960.0, 720.0);
        let (x, y) = center(frame.cards[7]);
        assert_eq!(frame.hit_test(true, x, y), Slot::new(7).map(HitTarget::Slot));
        let (x, y) = center(frame.secret_card);
        assert_eq!(frame.hit_test(true, x, y), Some(HitTarget::SecretDisplay));
        assert_eq!(frame.hit_test(true, 1.0, 1.0), None);
    }

    #[test]
    fn start_screen_only_exposes_buttons() {
        let frame = layout(960.0, 720.0);
        let (x, y) = center(frame.start.generate);
        assert_eq!(frame.hit_test(false, x, y), Some(HitTarget::GenerateButton));
        let (x, y) = center(frame.start.join);
        assert_eq!(frame.hit_test(false, x, y), Some(HitTarget::JoinButton));
        let (x, y) = center(frame.cards[0]);
        assert_ne!(frame.hit_test(false, x, y), Slot::new(0).map(HitTarget::Slot));
    }
}
