//! Board selection: 24 distinct characters in a fixed grid order per code.

use std::collections::HashSet;
use std::hash::Hasher;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use xxhash_rust::xxh3::Xxh3;

use crate::code::GameCode;
use crate::names::{NameMap, assign_names};
use crate::rng::{GenerationError, SeededGenerator};
use crate::session::Slot;

pub const BOARD_SIZE: usize = 24;
/// Size of the character index space; indices are drawn from `[0, INDEX_SPACE)`.
pub const INDEX_SPACE: i64 = 1_000_000;
/// Hard cap on draws while filling a board. Far above what any code needs.
pub const MAX_BOARD_DRAWS: usize = 10_000;

/// Identifies a character's visual asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CharacterIndex(pub u32);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("a board holds {expected} characters, got {found}", expected = BOARD_SIZE)]
    WrongSize { found: usize },
    #[error("character {index} is outside the index space")]
    OutOfRange { index: u32 },
    #[error("character {index} appears more than once")]
    Duplicate { index: u32 },
}

/// The 24 characters of a board, in slot order. Always exactly [`BOARD_SIZE`]
/// distinct indices below [`INDEX_SPACE`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct BoardSelection {
    indices: Vec<CharacterIndex>,
}

impl TryFrom<Vec<u32>> for BoardSelection {
    type Error = SelectionError;

    fn try_from(raw: Vec<u32>) -> Result<Self, Self::Error> {
        if raw.len() != BOARD_SIZE {
            return Err(SelectionError::WrongSize { found: raw.len() });
        }
        let mut seen = HashSet::with_capacity(BOARD_SIZE);
        for &index in &raw {
            if i64::from(index) >= INDEX_SPACE {
                return Err(SelectionError::OutOfRange { index });
            }
            if !seen.insert(index) {
                return Err(SelectionError::Duplicate { index });
            }
        }
        Ok(Self { indices: raw.into_iter().map(CharacterIndex).collect() })
    }
}

impl From<BoardSelection> for Vec<u32> {
    fn from(selection: BoardSelection) -> Self {
        selection.indices.into_iter().map(|index| index.0).collect()
    }
}

impl BoardSelection {
    pub fn indices(&self) -> &[CharacterIndex] {
        &self.indices
    }

    pub fn at(&self, slot: Slot) -> CharacterIndex {
        self.indices[slot.index()]
    }
}

pub fn select_board(code: &GameCode) -> Result<BoardSelection, GenerationError> {
    select_with_limit(code, MAX_BOARD_DRAWS)
}

fn select_with_limit(code: &GameCode, max_draws: usize) -> Result<BoardSelection, GenerationError> {
    let mut rng = SeededGenerator::from_text(code.as_str());
    let mut seen = HashSet::with_capacity(BOARD_SIZE);
    let mut indices = Vec::with_capacity(BOARD_SIZE);

    for _ in 0..max_draws {
        let drawn = CharacterIndex(rng.next_int(0, INDEX_SPACE)? as u32);
        // Repeats are dropped; only the first occurrence takes a slot.
        if seen.insert(drawn) {
            indices.push(drawn);
            if indices.len() == BOARD_SIZE {
                return Ok(BoardSelection { indices });
            }
        }
    }

    Err(GenerationError::AttemptsExhausted {
        attempts: max_draws,
        found: indices.len(),
        wanted: BOARD_SIZE,
    })
}

/// Everything a client needs to render one code: characters and their names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    code: GameCode,
    selection: BoardSelection,
    names: NameMap,
}

impl Board {
    pub fn generate(code: &GameCode) -> Result<Self, GenerationError> {
        let selection = select_board(code)?;
        let names = assign_names(code, &selection);
        Ok(Self { code: code.clone(), selection, names })
    }

    pub fn code(&self) -> &GameCode {
        &self.code
    }

    pub fn selection(&self) -> &BoardSelection {
        &self.selection
    }

    pub fn names(&self) -> &NameMap {
        &self.names
    }

    pub fn character(&self, slot: Slot) -> CharacterIndex {
        self.selection.at(slot)
    }

    pub fn name(&self, slot: Slot) -> &str {
        self.names.name_or_unknown(self.character(slot))
    }

    pub fn slots(&self) -> impl Iterator<Item = (Slot, CharacterIndex, &str)> + '_ {
        Slot::all().map(move |slot| (slot, self.character(slot), self.name(slot)))
    }

    /// Stable digest of the code, characters and names, for comparing boards
    /// produced on different machines.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write(self.code.as_str().as_bytes());
        for (slot, character, name) in self.slots() {
            hasher.write_u8(slot.index() as u8);
            hasher.write_u32(character.0);
            hasher.write(name.as_bytes());
            hasher.write_u8(0);
        }
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(value: &str) -> GameCode {
        GameCode::parse(value).expect("valid test code")
    }

    #[test]
    fn fills_every_slot_with_a_distinct_index() {
        let board = select_board(&code("00000")).expect("board");
        assert_eq!(board.indices().len(), BOARD_SIZE);
        let distinct: HashSet<_> = board.indices().iter().collect();
        assert_eq!(distinct.len(), BOARD_SIZE);
        assert!(board.indices().iter().all(|index| i64::from(index.0) < INDEX_SPACE));
    }

    #[test]
    fn separate_generators_agree() {
        let first = select_board(&code("90210")).expect("board");
        let second = select_board(&code("90210")).expect("board");
        assert_eq!(first, second);
    }

    #[test]
    fn different_codes_give_different_boards() {
        let left = select_board(&code("11111")).expect("board");
        let right = select_board(&code("11112")).expect("board");
        assert_ne!(left, right);
    }

    #[test]
    fn draw_limit_produces_generation_error() {
        let err = select_with_limit(&code("42017"), 10).expect_err("10 draws cannot fill 24 slots");
        assert_eq!(err, GenerationError::AttemptsExhausted { attempts: 10, found: 10, wanted: 24 });
    }

    #[test]
    fn selection_json_is_checked_on_the_way_in() {
        let board = select_board(&code("42017")).expect("board");
        let json = serde_json::to_string(&board).expect("serialize");
        assert!(json.starts_with("[980285,846699,"));
        let back: BoardSelection = serde_json::from_str(&json).expect("valid selection");
        assert_eq!(back, board);

        assert!(serde_json::from_str::<BoardSelection>("[1,1]").is_err());
        assert!(serde_json::from_str::<BoardSelection>(r#"{"indices":[1,1]}"#).is_err());

        let mut raw: Vec<u32> = (0..24).collect();
        raw[5] = 3;
        assert_eq!(BoardSelection::try_from(raw), Err(SelectionError::Duplicate { index: 3 }));
        let mut raw: Vec<u32> = (0..24).collect();
        raw[23] = 1_000_000;
        assert_eq!(
            BoardSelection::try_from(raw),
            Err(SelectionError::OutOfRange { index: 1_000_000 })
        );
        assert_eq!(
            BoardSelection::try_from(vec![7, 8]),
            Err(SelectionError::WrongSize { found: 2 })
        );
    }

    #[test]
    fn board_bundles_selection_and_names() {
        let board = Board::generate(&code("27182")).expect("board");
        let slots: Vec<_> = board.slots().collect();
        assert_eq!(slots.len(), BOARD_SIZE);
        for (slot, character, name) in slots {
            assert_eq!(character, board.selection().at(slot));
            assert_eq!(Some(name), board.names().get(character));
        }
    }

    #[test]
    fn fingerprint_tracks_the_board() {
        let board = Board::generate(&code("27182")).expect("board");
        let again = Board::generate(&code("27182")).expect("board");
        let other = Board::generate(&code("27183")).expect("board");
        assert_eq!(board.fingerprint(), again.fingerprint());
        assert_ne!(board.fingerprint(), other.fingerprint());
    }
}
