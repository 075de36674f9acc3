//! Five-digit game codes: parsing and minting.

use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rng::SeededGenerator;

pub const CODE_LEN: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    #[error("game code must be {expected} digits, got {found}", expected = CODE_LEN)]
    InvalidLength { found: usize },
    #[error("invalid character '{ch}' at position {index}")]
    InvalidCharacter { ch: char, index: usize },
}

/// The sole external identifier of a game and the seed for everything on its board.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GameCode(String);

impl GameCode {
    pub fn parse(value: &str) -> Result<Self, CodeError> {
        let found = value.chars().count();
        if found != CODE_LEN {
            return Err(CodeError::InvalidLength { found });
        }
        if let Some((index, ch)) = value.chars().enumerate().find(|(_, ch)| !ch.is_ascii_digit())
        {
            return Err(CodeError::InvalidCharacter { ch, index });
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for GameCode {
    type Err = CodeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for GameCode {
    type Error = CodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<GameCode> for String {
    fn from(code: GameCode) -> Self {
        code.0
    }
}

/// Mints a fresh code from the wall clock. Not reproducible.
pub fn generate_code() -> GameCode {
    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0_u128, |duration| duration.as_millis());
    generate_code_at(now_ms as u64)
}

/// The minting algorithm for a fixed instant: five digit draws seeded by the
/// decimal rendering of `unix_ms`.
pub fn generate_code_at(unix_ms: u64) -> GameCode {
    let mut rng = SeededGenerator::from_text(&unix_ms.to_string());
    let digits = (0..CODE_LEN)
        .map(|_| {
            let digit = (rng.next_fraction() * 10.0).floor() as u32;
            char::from_digit(digit, 10).unwrap_or('0')
        })
        .collect();
    GameCode(digits)
}
