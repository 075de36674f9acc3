use whowho_core::{
    Board, GameCode, GameSession, Gesture, SessionEvent, SessionStore, StoreError, generate_code,
    load, save,
};

use crate::code_entry::CodeEntry;

/// Inputs gathered for one frame, already mapped from raw keys and pointer events.
#[derive(Clone, Debug, PartialEq)]
pub enum UiInput {
    Digit(char),
    Backspace,
    Submit,
    Generate,
    Gesture(Gesture),
    BackToMenu,
}

/// A board that is open for play together with its local session.
#[derive(Debug)]
pub struct OpenBoard {
    pub board: Board,
    pub session: GameSession,
    pub last_event: Option<SessionEvent>,
}

#[derive(Debug, Default)]
pub enum AppMode {
    #[default]
    Start,
    Playing(OpenBoard),
}

#[derive(Debug, Default)]
pub struct AppState {
    pub mode: AppMode,
    pub entry: CodeEntry,
    /// One-line status message shown to the player; replaced, never queued.
    pub notice: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates the board for `code` and rehydrates its session from `store`.
    pub fn open_code<S: SessionStore + ?Sized>(&mut self, code: GameCode, store: &S) {
        let board = match Board::generate(&code) {
            Ok(board) => board,
            Err(err) => {
                self.notice = Some(format!("Could not build board {code}: {err}"));
                self.mode = AppMode::Start;
                return;
            }
        };

        let session = load(&code, store);
        let discarded = session
            .log()
            .iter()
            .filter(|event| matches!(event, SessionEvent::StoredValueDiscarded { .. }))
            .count();
        self.notice =
            (discarded > 0).then(|| format!("Reset {discarded} unreadable saved value(s)"));
        self.entry.clear();
        self.mode = AppMode::Playing(OpenBoard { board, session, last_event: None });
    }

    /// Start screen with an explanation of why the requested code was not opened.
    pub fn reject_code(&mut self, raw: &str, reason: &str) {
        self.mode = AppMode::Start;
        self.notice = Some(format!("'{raw}' is not a game code: {reason}"));
    }

    /// Processes one frame of inputs. Each applied gesture is saved before the next one runs;
    /// save failures are returned for the caller to report and mirrored in `notice`.
    pub fn tick<S: SessionStore + ?Sized>(
        &mut self,
        store: &mut S,
        inputs: &[UiInput],
    ) -> Vec<StoreError> {
        let mut save_failures = Vec::new();
        for input in inputs {
            if let AppMode::Playing(open) = &mut self.mode {
                match input {
                    UiInput::Gesture(gesture) => {
                        let Some(event) = open.session.apply(*gesture) else {
                            continue;
                        };
                        open.last_event = Some(event);
                        self.notice = match save(&open.session, store) {
                            Ok(()) => None,
                            Err(err) => {
                                let notice = format!("Progress not saved: {err}");
                                save_failures.push(err);
                                Some(notice)
                            }
                        };
                    }
                    UiInput::BackToMenu => {
                        self.mode = AppMode::Start;
                        self.notice = None;
                    }
                    _ => {}
                }
                continue;
            }

            match input {
                UiInput::Digit(ch) => {
                    self.entry.push(*ch);
                }
                UiInput::Backspace => self.entry.pop(),
                UiInput::Submit => {
                    if let Some(code) = self.entry.ready() {
                        self.open_code(code, &*store);
                    }
                }
                UiInput::Generate => self.open_code(generate_code(), &*store),
                UiInput::Gesture(_) | UiInput::BackToMenu => {}
            }
        }
        save_failures
    }

    pub fn open_board(&self) -> Option<&OpenBoard> {
        match &self.mode {
            AppMode::Playing(open) => Some(open),
            AppMode::Start => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use whowho_core::{MemoryStore, Slot, StoreError};

    struct FailingStore;

    impl SessionStore for FailingStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io(io::Error::other("disk full")))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn tap(index: usize) -> UiInput {
        UiInput::Gesture(Gesture::Tap(Slot::new(index).expect("slot on board")))
    }

    #[test]
    fn gestures_are_ignored_on_start_screen() {
        let mut app = AppState::new();
        let mut store = MemoryStore::new();
        app.tick(&mut store, &[tap(2), UiInput::BackToMenu]);
        assert!(matches!(app.mode, AppMode::Start));
        assert!(store.is_empty());
    }

    #[test]
    fn failed_save_is_reported_not_fatal() {
        let mut app = AppState::new();
        let mut store = FailingStore;
        app.open_code(GameCode::parse("42017").expect("valid code"), &store);
        let failures = app.tick(&mut store, &[tap(2)]);
        assert_eq!(failures.len(), 1);

        let open = app.open_board().expect("board stays open");
        assert_eq!(open.session.secret(), Slot::new(2));
        let notice = app.notice.as_deref().expect("save failure notice");
        assert!(notice.contains("disk full"), "notice should carry the cause: {notice}");
    }
}
