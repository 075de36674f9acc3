//! Deterministic seeded generator shared by board selection, naming and code minting.
//!
//! A single linear congruential step drives every draw. The constants are small
//! enough that the whole sequence is reproducible with plain `f64` arithmetic on
//! any platform, which is what lets a five-digit code stand in for a board.

use thiserror::Error;

const LCG_MULTIPLIER: u64 = 9301;
const LCG_INCREMENT: u64 = 49297;
const LCG_MODULUS: u64 = 233_280;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("empty draw range: max {max_exclusive} must exceed min {min}")]
    EmptyRange { min: i64, max_exclusive: i64 },
    #[error("gave up after {attempts} draws with only {found} of {wanted} distinct values")]
    AttemptsExhausted { attempts: usize, found: usize, wanted: usize },
}

/// Owned generator state. Instances never share state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededGenerator {
    state: u64,
}

impl SeededGenerator {
    /// Seeds from a string via the 31x rolling hash over its UTF-16 code units.
    pub fn from_text(seed: &str) -> Self {
        Self { state: u64::from(hash_text(seed).unsigned_abs()) }
    }

    pub fn from_number(seed: i64) -> Self {
        Self { state: seed.unsigned_abs() }
    }

    /// Current internal state. Exposed for diagnostics and tests.
    pub fn state(&self) -> u64 {
        self.state
    }

    pub fn next_fraction(&mut self) -> f64 {
        // Reducing first keeps large numeric seeds exact; the result is congruent.
        let reduced = self.state % LCG_MODULUS;
        self.state = (reduced * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        self.state as f64 / LCG_MODULUS as f64
    }

    /// Draws from `[min, max_exclusive)`. An empty range is rejected before any draw.
    pub fn next_int(&mut self, min: i64, max_exclusive: i64) -> Result<i64, GenerationError> {
        if max_exclusive <= min {
            return Err(GenerationError::EmptyRange { min, max_exclusive });
        }
        let span = (i128::from(max_exclusive) - i128::from(min)) as f64;
        let offset = (self.next_fraction() * span).floor() as i64;
        Ok(min.saturating_add(offset).min(max_exclusive - 1))
    }

    /// Returns a shuffled copy of `items`. Consumes `len - 1` draws.
    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut shuffled = items.to_vec();
        for index in (1..shuffled.len()).rev() {
            let pick = self.next_below(index + 1);
            shuffled.swap(index, pick);
        }
        shuffled
    }

    fn next_below(&mut self, upper: usize) -> usize {
        (self.next_fraction() * upper as f64).floor() as usize
    }
}

fn hash_text(seed: &str) -> i32 {
    seed.encode_utf16()
        .fold(0_i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}
