//! Rendering for the start screen and the board screen.

use crate::board_layout::{CAPTION_HEIGHT, FrameLayout, PanelRect};
use crate::ui_text::{header_text, secret_caption, status_text};
use app::app_loop::{AppState, OpenBoard};
use app::{APP_NAME, share_link};
use macroquad::prelude::*;
use whowho_core::{CharacterIndex, SlotView, secret_card, slot_views};

const BACKGROUND: Color = Color { r: 0.08, g: 0.09, b: 0.12, a: 1.0 };
const PANEL_COLOR: Color = Color { r: 0.16, g: 0.18, b: 0.23, a: 1.0 };
const BORDER_COLOR: Color = Color { r: 0.32, g: 0.35, b: 0.42, a: 1.0 };
const SECRET_BORDER: Color = GOLD;
const HIDDEN_SHADE: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 0.72 };
const HIDDEN_MARK: Color = Color { r: 0.85, g: 0.25, b: 0.25, a: 1.0 };
const BORDER_THICKNESS: f32 = 1.0;
const SECRET_BORDER_THICKNESS: f32 = 4.0;
const TEXT_PAD: f32 = 14.0;

pub fn draw_frame(app_state: &AppState, layout: &FrameLayout, share_origin: &str) {
    clear_background(BACKGROUND);
    match app_state.open_board() {
        Some(open) => draw_board_screen(app_state, open, layout, share_origin),
        None => draw_start_screen(app_state, layout),
    }
}

fn draw_start_screen(app_state: &AppState, layout: &FrameLayout) {
    let start = &layout.start;
    draw_centered_text(APP_NAME, start.title, 48.0, WHITE);

    draw_button(start.generate, "New game");

    draw_panel(start.entry);
    let shown = format!("{:_<5}", app_state.entry.as_str());
    draw_centered_text(&shown, start.entry, 36.0, WHITE);

    let join_color = if app_state.entry.ready().is_some() { WHITE } else { GRAY };
    draw_panel(start.join);
    draw_centered_text("Join", start.join, 26.0, join_color);

    draw_centered_text(&status_text(app_state), start.notice, 18.0, LIGHTGRAY);
}

fn draw_board_screen(app_state: &AppState, open: &OpenBoard, layout: &FrameLayout, origin: &str) {
    let header = layout.header;
    let link = share_link(origin, open.board.code());
    draw_text(&header_text(&open.board, &link), header.x, header.y + 16.0, 22.0, WHITE);
    draw_text(&status_text(app_state), header.x, header.y + 36.0, 18.0, LIGHTGRAY);

    draw_secret_display(open, layout);

    for view in slot_views(&open.board, &open.session) {
        if let Some(rect) = layout.cards.get(view.slot.index()) {
            draw_card(&view, *rect);
        }
    }
}

fn draw_secret_display(open: &OpenBoard, layout: &FrameLayout) {
    let rect = layout.secret_card;
    match secret_card(&open.board, &open.session) {
        Some(card) => {
            draw_swatch(card.character, card.name, rect);
            draw_outline(rect, SECRET_BORDER_THICKNESS, SECRET_BORDER);
        }
        None => {
            draw_panel(rect);
            draw_centered_text("?", rect, rect.height * 0.5, GRAY);
        }
    }
    let caption = secret_caption(&open.board, open.session.secret());
    let caption_rect = PanelRect { y: rect.y + rect.height, height: CAPTION_HEIGHT + 8.0, ..rect };
    draw_centered_text(&caption, widen(caption_rect, layout.secret_panel), 18.0, WHITE);
}

fn draw_card(view: &SlotView<'_>, rect: PanelRect) {
    draw_swatch(view.character, view.name, rect);

    if view.is_hidden {
        draw_rectangle(rect.x, rect.y, rect.width, rect.height, HIDDEN_SHADE);
        let inset = rect.width * 0.2;
        let (left, right) = (rect.x + inset, rect.x + rect.width - inset);
        let (top, bottom) = (rect.y + inset, rect.y + rect.height - inset);
        draw_line(left, top, right, bottom, 4.0, HIDDEN_MARK);
        draw_line(right, top, left, bottom, 4.0, HIDDEN_MARK);
    }

    if view.is_secret {
        draw_outline(rect, SECRET_BORDER_THICKNESS, SECRET_BORDER);
    } else if view.awaiting_secret {
        draw_outline(rect, 2.0, SKYBLUE);
    } else {
        draw_outline(rect, BORDER_THICKNESS, BORDER_COLOR);
    }

    let caption = PanelRect { y: rect.y + rect.height, height: CAPTION_HEIGHT, ..rect };
    let name_color = if view.is_hidden { GRAY } else { WHITE };
    draw_centered_text(view.name, caption, 16.0, name_color);
}

fn draw_swatch(character: CharacterIndex, name: &str, rect: PanelRect) {
    draw_rectangle(rect.x, rect.y, rect.width, rect.height, swatch_color(character));
    draw_centered_text(&initial(name), rect, rect.height * 0.55, BACKGROUND);
}

fn draw_button(rect: PanelRect, label: &str) {
    draw_rectangle(rect.x, rect.y, rect.width, rect.height, PANEL_COLOR);
    draw_outline(rect, 2.0, SKYBLUE);
    draw_centered_text(label, rect, 26.0, WHITE);
}

fn draw_panel(rect: PanelRect) {
    draw_rectangle(rect.x, rect.y, rect.width, rect.height, PANEL_COLOR);
    draw_outline(rect, BORDER_THICKNESS, BORDER_COLOR);
}

fn draw_outline(rect: PanelRect, thickness: f32, color: Color) {
    draw_rectangle_lines(rect.x, rect.y, rect.width, rect.height, thickness, color);
}

fn draw_centered_text(text: &str, rect: PanelRect, font_size: f32, color: Color) {
    let size = font_size.clamp(8.0, 200.0);
    let dims = measure_text(text, None, size as u16, 1.0);
    let x = rect.x + ((rect.width - dims.width) / 2.0).max(TEXT_PAD.min(rect.width / 8.0));
    let y = rect.y + (rect.height + dims.offset_y) / 2.0 - dims.height * 0.1;
    draw_text(text, x, y, size, color);
}

fn widen(rect: PanelRect, container: PanelRect) -> PanelRect {
    PanelRect { x: container.x, width: container.width, ..rect }
}

/// Stand-in tint for a character until its avatar image is drawn; stable per index.
fn swatch_color(character: CharacterIndex) -> Color {
    let bits = character.0.wrapping_mul(2_654_435_761);
    Color::from_rgba(
        96 + (bits & 0x7f) as u8,
        96 + ((bits >> 8) & 0x7f) as u8,
        96 + ((bits >> 16) & 0x7f) as u8,
        255,
    )
}

fn initial(name: &str) -> String {
    name.chars().next().map(|ch| ch.to_uppercase().collect()).unwrap_or_else(|| "?".to_string())
}
