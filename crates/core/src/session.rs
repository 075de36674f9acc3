//! Per-code interaction state: the secret pick and the set of hidden slots.
//!
//! The session is a small state machine (`NoSecret` / `SecretChosen`) with the
//! hidden set as an orthogonal piece of state. It never touches storage itself;
//! see [`crate::storage`] for the explicit save/load boundary.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::BOARD_SIZE;
use crate::code::GameCode;

/// A grid position on the board, always in `[0, BOARD_SIZE)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Slot(u8);

impl Slot {
    pub fn new(index: usize) -> Option<Self> {
        (index < BOARD_SIZE).then_some(Self(index as u8))
    }

    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    pub fn all() -> impl Iterator<Item = Slot> {
        (0..BOARD_SIZE as u8).map(Slot)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<u8> for Slot {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Slot::new(usize::from(value)).ok_or_else(|| format!("slot {value} is off the board"))
    }
}

impl From<Slot> for u8 {
    fn from(slot: Slot) -> Self {
        slot.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    NoSecret,
    SecretChosen(Slot),
}

/// User input as seen by the session. Timing of long presses is the input
/// layer's business; only the resulting gesture arrives here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    Tap(Slot),
    LongPress(Slot),
    TapSecretDisplay,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    SecretChosen { slot: Slot },
    SecretMoved { from: Slot, to: Slot },
    SecretCleared { slot: Slot },
    SlotHidden { slot: Slot },
    SlotRevealed { slot: Slot },
    StoredValueDiscarded { key: String, reason: String },
}

/// Most recent events a session keeps; older ones drop off the front.
pub const LOG_CAPACITY: usize = 64;

#[derive(Clone, Debug)]
pub struct GameSession {
    code: GameCode,
    secret: Option<Slot>,
    hidden: BTreeSet<Slot>,
    log: Vec<SessionEvent>,
}

impl GameSession {
    pub fn new(code: GameCode) -> Self {
        Self { code, secret: None, hidden: BTreeSet::new(), log: Vec::new() }
    }

    pub(crate) fn restore(
        code: GameCode,
        secret: Option<Slot>,
        hidden: BTreeSet<Slot>,
        log: Vec<SessionEvent>,
    ) -> Self {
        Self { code, secret, hidden, log }
    }

    pub fn code(&self) -> &GameCode {
        &self.code
    }

    pub fn state(&self) -> SessionState {
        match self.secret {
            Some(slot) => SessionState::SecretChosen(slot),
            None => SessionState::NoSecret,
        }
    }

    pub fn secret(&self) -> Option<Slot> {
        self.secret
    }

    pub fn hidden_slots(&self) -> &BTreeSet<Slot> {
        &self.hidden
    }

    pub fn is_hidden(&self, slot: Slot) -> bool {
        self.hidden.contains(&slot)
    }

    pub fn is_empty(&self) -> bool {
        self.secret.is_none() && self.hidden.is_empty()
    }

    pub fn log(&self) -> &[SessionEvent] {
        &self.log
    }

    /// Applies one gesture. Returns the event it produced, or `None` when the
    /// gesture has no effect in the current state.
    pub fn apply(&mut self, gesture: Gesture) -> Option<SessionEvent> {
        let event = match (self.state(), gesture) {
            (SessionState::NoSecret, Gesture::Tap(slot) | Gesture::LongPress(slot)) => {
                self.secret = Some(slot);
                SessionEvent::SecretChosen { slot }
            }
            (SessionState::NoSecret, Gesture::TapSecretDisplay) => return None,
            (SessionState::SecretChosen(_), Gesture::Tap(slot)) => {
                if self.hidden.remove(&slot) {
                    SessionEvent::SlotRevealed { slot }
                } else {
                    self.hidden.insert(slot);
                    SessionEvent::SlotHidden { slot }
                }
            }
            (SessionState::SecretChosen(current), Gesture::LongPress(slot)) => {
                if current == slot {
                    self.secret = None;
                    SessionEvent::SecretCleared { slot }
                } else {
                    self.secret = Some(slot);
                    SessionEvent::SecretMoved { from: current, to: slot }
                }
            }
            // Hidden slots survive clearing the secret.
            (SessionState::SecretChosen(current), Gesture::TapSecretDisplay) => {
                self.secret = None;
                SessionEvent::SecretCleared { slot: current }
            }
        };
        self.record(event.clone());
        Some(event)
    }

    fn record(&mut self, event: SessionEvent) {
        if self.log.len() == LOG_CAPACITY {
            self.log.remove(0);
        }
        self.log.push(event);
    }

    pub fn tap_slot(&mut self, slot: Slot) -> Option<SessionEvent> {
        self.apply(Gesture::Tap(slot))
    }

    pub fn long_press_slot(&mut self, slot: Slot) -> Option<SessionEvent> {
        self.apply(Gesture::LongPress(slot))
    }

    pub fn tap_secret_display(&mut self) -> Option<SessionEvent> {
        self.apply(Gesture::TapSecretDisplay)
    }
}

/// Sessions compare by game state; the event log is history, not state.
impl PartialEq for GameSession {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code && self.secret == other.secret && self.hidden == other.hidden
    }
}

impl Eq for GameSession {}
