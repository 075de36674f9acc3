//! Per-game display names.
//!
//! Names are drawn from a second generator seeded with the code plus a salt, so
//! naming never consumes or aligns with the draws that picked the board.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::board::{BOARD_SIZE, BoardSelection, CharacterIndex};
use crate::code::GameCode;
use crate::rng::SeededGenerator;

pub const NAME_SEED_SUFFIX: &str = "-names";
pub const UNKNOWN_NAME: &str = "Unknown";

pub const NAME_POOL: [&str; 100] = [
    "Alex", "Blake", "Casey", "Drew", "Emery", "Finley", "Gray", "Harper", "Jordan", "Kai",
    "Logan", "Morgan", "Noah", "Parker", "Quinn", "Riley", "Sage", "Taylor", "Val", "Winter",
    "Avery", "Brooke", "Cameron", "Dakota", "Ellis", "Frankie", "Grey", "Hayden", "Indigo", "Jamie",
    "Kendall", "Lane", "Micah", "Nico", "Ocean", "Peyton", "Reese", "Skyler", "Tatum", "Wren",
    "Adrian", "Blair", "Carter", "Dylan", "Eden", "Flynn", "Gage", "Haven", "Ivy", "Jules",
    "Kade", "Lennox", "Marlowe", "Nash", "Oakley", "Phoenix", "River", "Sawyer", "Tyler", "Wade",
    "Aiden", "Brynn", "Cody", "Dane", "Echo", "Felix", "Gwen", "Harlow", "Iris", "Jade",
    "Kane", "Luca", "Mason", "Nova", "Orion", "Piper", "Quincy", "Rowan", "Sterling", "Troy",
    "Asher", "Briar", "Cove", "Dune", "Elm", "Fox", "Gale", "Haze", "Ira", "Jett",
    "Koa", "Lake", "Moss", "Nyx", "Onyx", "Pine", "Quill", "Ridge", "Storm", "Thorn",
];

const _: () = assert!(NAME_POOL.len() >= BOARD_SIZE, "name pool smaller than a board");
const _: () = assert!(names_are_distinct(&NAME_POOL), "name pool contains a duplicate");

const fn names_are_distinct(names: &[&str]) -> bool {
    let mut left = 0;
    while left < names.len() {
        let mut right = left + 1;
        while right < names.len() {
            if bytes_equal(names[left].as_bytes(), names[right].as_bytes()) {
                return false;
            }
            right += 1;
        }
        left += 1;
    }
    true
}

const fn bytes_equal(left: &[u8], right: &[u8]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let mut index = 0;
    while index < left.len() {
        if left[index] != right[index] {
            return false;
        }
        index += 1;
    }
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamePoolError {
    #[error("name pool holds {available} names but a board needs {required}")]
    TooSmall { available: usize, required: usize },
    #[error("name pool lists \"{name}\" more than once")]
    Duplicate { name: String },
}

/// A candidate list that has been checked to be large enough and duplicate-free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePool {
    names: Vec<String>,
}

impl NamePool {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Result<Self, NamePoolError> {
        if names.len() < BOARD_SIZE {
            return Err(NamePoolError::TooSmall { available: names.len(), required: BOARD_SIZE });
        }
        let mut seen = HashSet::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            if !seen.insert(name) {
                return Err(NamePoolError::Duplicate { name: name.to_string() });
            }
        }
        Ok(Self { names: names.iter().map(|name| name.as_ref().to_string()).collect() })
    }

    pub fn builtin() -> Self {
        // Size and uniqueness are asserted at compile time above.
        Self { names: NAME_POOL.iter().map(|name| (*name).to_string()).collect() }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Shuffles the whole pool with the code's name generator and hands out the
    /// leading names in slot order.
    pub fn assign(&self, code: &GameCode, board: &BoardSelection) -> NameMap {
        let mut rng = SeededGenerator::from_text(&format!("{code}{NAME_SEED_SUFFIX}"));
        let shuffled = rng.shuffle(&self.names);
        let by_index = board.indices().iter().copied().zip(shuffled).collect();
        NameMap { by_index }
    }
}

/// Display names for one board, keyed by character.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameMap {
    by_index: HashMap<CharacterIndex, String>,
}

impl NameMap {
    pub fn get(&self, index: CharacterIndex) -> Option<&str> {
        self.by_index.get(&index).map(String::as_str)
    }

    pub fn name_or_unknown(&self, index: CharacterIndex) -> &str {
        self.get(index).unwrap_or(UNKNOWN_NAME)
    }

    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }
}

pub fn assign_names(code: &GameCode, board: &BoardSelection) -> NameMap {
    NamePool::builtin().assign(code, board)
}
