//! Start-screen code entry: digits only, at most five.

use whowho_core::GameCode;
use whowho_core::code::CODE_LEN;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeEntry {
    digits: String,
}

impl CodeEntry {
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// Accepts a typed character. Non-digits and overflow are ignored.
    pub fn push(&mut self, ch: char) -> bool {
        if !ch.is_ascii_digit() || self.digits.len() >= CODE_LEN {
            return false;
        }
        self.digits.push(ch);
        true
    }

    pub fn pop(&mut self) {
        self.digits.pop();
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    /// The code, once exactly five digits have been entered.
    pub fn ready(&self) -> Option<GameCode> {
        GameCode::parse(&self.digits).ok()
    }
}
