//! Durable per-code session storage.
//!
//! Storage is a flat string key/value map, two keys per code:
//! - `secret-image-{code}`: the secret slot as a decimal integer.
//! - `hidden-images-{code}`: a JSON array of hidden slots.
//!
//! A missing key means "empty". `save` removes keys whose value is back at the
//! empty default so abandoned games leave nothing behind. `load` never fails:
//! anything unreadable is dropped and noted in the session log.

use std::collections::{BTreeMap, BTreeSet};
use std::io;

use thiserror::Error;

use crate::code::GameCode;
use crate::session::{GameSession, SessionEvent, Slot};

const SECRET_KEY_PREFIX: &str = "secret-image-";
const HIDDEN_KEY_PREFIX: &str = "hidden-images-";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("could not encode stored value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A synchronous string key/value store scoped to one installation.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-process store, used by tests and tools.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

pub fn secret_key(code: &GameCode) -> String {
    format!("{SECRET_KEY_PREFIX}{code}")
}

pub fn hidden_key(code: &GameCode) -> String {
    format!("{HIDDEN_KEY_PREFIX}{code}")
}

/// Writes the session's secret and hidden set, removing keys that are empty.
pub fn save<S: SessionStore + ?Sized>(
    session: &GameSession,
    store: &mut S,
) -> Result<(), StoreError> {
    let code = session.code();

    match session.secret() {
        Some(slot) => store.set(&secret_key(code), &slot.to_string())?,
        None => store.remove(&secret_key(code))?,
    }

    if session.hidden_slots().is_empty() {
        store.remove(&hidden_key(code))?;
    } else {
        let hidden: Vec<u8> = session.hidden_slots().iter().map(|slot| u8::from(*slot)).collect();
        store.set(&hidden_key(code), &serde_json::to_string(&hidden)?)?;
    }

    Ok(())
}

/// Rehydrates the session for `code`. Corrupt values are treated as absent.
pub fn load<S: SessionStore + ?Sized>(code: &GameCode, store: &S) -> GameSession {
    let mut log = Vec::new();

    let secret_key = secret_key(code);
    let secret = store.get(&secret_key).and_then(|raw| match parse_secret(&raw) {
        Ok(slot) => Some(slot),
        Err(reason) => {
            log.push(SessionEvent::StoredValueDiscarded { key: secret_key.clone(), reason });
            None
        }
    });

    let hidden_key = hidden_key(code);
    let hidden = match store.get(&hidden_key).map(|raw| parse_hidden(&raw)) {
        None => BTreeSet::new(),
        Some(Ok((hidden, dropped))) => {
            if dropped > 0 {
                log.push(SessionEvent::StoredValueDiscarded {
                    key: hidden_key,
                    reason: format!("dropped {dropped} off-board slot(s)"),
                });
            }
            hidden
        }
        Some(Err(reason)) => {
            log.push(SessionEvent::StoredValueDiscarded { key: hidden_key, reason });
            BTreeSet::new()
        }
    };

    GameSession::restore(code.clone(), secret, hidden, log)
}

fn parse_secret(raw: &str) -> Result<Slot, String> {
    let index: i64 = raw.trim().parse().map_err(|_| format!("'{raw}' is not an integer"))?;
    usize::try_from(index)
        .ok()
        .and_then(Slot::new)
        .ok_or_else(|| format!("slot {index} is off the board"))
}

/// Returns the valid slots plus the number of integer entries that were off the board.
fn parse_hidden(raw: &str) -> Result<(BTreeSet<Slot>, usize), String> {
    let entries: Vec<i64> = serde_json::from_str(raw).map_err(|err| err.to_string())?;
    let mut dropped = 0;
    let hidden = entries
        .into_iter()
        .filter_map(|index| {
            let slot = usize::try_from(index).ok().and_then(Slot::new);
            if slot.is_none() {
                dropped += 1;
            }
            slot
        })
        .collect();
    Ok((hidden, dropped))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code() -> GameCode {
        GameCode::parse("42017").expect("valid code")
    }

    fn slot(index: usize) -> Slot {
        Slot::new(index).expect("slot on board")
    }

    fn discarded(session: &GameSession) -> usize {
        session
            .log()
            .iter()
            .filter(|event| matches!(event, SessionEvent::StoredValueDiscarded { .. }))
            .count()
    }

    #[test]
    fn keys_are_scoped_by_code() {
        assert_eq!(secret_key(&code()), "secret-image-42017");
        assert_eq!(hidden_key(&code()), "hidden-images-42017");
    }

    #[test]
    fn save_writes_expected_wire_format() {
        let mut session = GameSession::new(code());
        session.tap_slot(slot(3));
        session.tap_slot(slot(12));
        session.tap_slot(slot(5));
        let mut store = MemoryStore::new();
        save(&session, &mut store).expect("memory store cannot fail");

        assert_eq!(store.get("secret-image-42017").as_deref(), Some("3"));
        assert_eq!(store.get("hidden-images-42017").as_deref(), Some("[5,12]"));
    }

    #[test]
    fn save_removes_keys_that_return_to_empty() {
        let mut session = GameSession::new(code());
        let mut store = MemoryStore::new();
        session.tap_slot(slot(3));
        session.tap_slot(slot(4));
        save(&session, &mut store).expect("save");
        assert_eq!(store.len(), 2);

        session.tap_slot(slot(4));
        session.tap_secret_display();
        save(&session, &mut store).expect("save");
        assert!(store.is_empty());
    }

    #[test]
    fn missing_keys_load_as_empty_session() {
        let session = load(&code(), &MemoryStore::new());
        assert!(session.is_empty());
        assert!(session.log().is_empty());
    }

    #[test]
    fn malformed_secret_is_discarded() {
        for raw in ["abc", "24", "-1", "", "3.5"] {
            let mut store = MemoryStore::new();
            store.set("secret-image-42017", raw).expect("set");
            let session = load(&code(), &store);
            assert_eq!(session.secret(), None, "raw secret {raw:?} should be dropped");
            assert_eq!(discarded(&session), 1);
        }
    }

    #[test]
    fn malformed_hidden_payload_is_discarded_whole() {
        for raw in ["{", "\"3\"", "[1, \"x\"]", "{\"a\":1}"] {
            let mut store = MemoryStore::new();
            store.set("hidden-images-42017", raw).expect("set");
            let session = load(&code(), &store);
            assert!(session.hidden_slots().is_empty(), "raw hidden {raw:?} should be dropped");
            assert_eq!(discarded(&session), 1);
        }
    }

    #[test]
    fn off_board_hidden_entries_are_dropped_individually() {
        let mut store = MemoryStore::new();
        store.set("hidden-images-42017", "[2, 99, -4, 2, 23]").expect("set");
        let session = load(&code(), &store);
        let hidden: Vec<Slot> = session.hidden_slots().iter().copied().collect();
        assert_eq!(hidden, vec![slot(2), slot(23)]);
        assert_eq!(discarded(&session), 1);
    }

    #[test]
    fn other_codes_are_untouched() {
        let mut store = MemoryStore::new();
        store.set("secret-image-11111", "7").expect("set");
        let mut session = GameSession::new(code());
        session.tap_slot(slot(1));
        save(&session, &mut store).expect("save");
        assert_eq!(store.get("secret-image-11111").as_deref(), Some("7"));
        assert_eq!(load(&code(), &store).secret(), Some(slot(1)));
    }
}
