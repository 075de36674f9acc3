//! Text formatting for prompts, status lines, and session events.

use app::app_loop::{AppState, OpenBoard};
use app::code_entry::CodeEntry;
use whowho_core::{Board, SessionEvent, SessionState, Slot};

pub fn status_text(app_state: &AppState) -> String {
    if let Some(notice) = &app_state.notice {
        return notice.clone();
    }
    match app_state.open_board() {
        Some(open) => board_prompt(open),
        None => entry_prompt(&app_state.entry),
    }
}

fn board_prompt(open: &OpenBoard) -> String {
    match (open.session.state(), &open.last_event) {
        (SessionState::NoSecret, _) => "Pick your secret character (tap any card)".to_string(),
        (SessionState::SecretChosen(_), Some(event)) => event_text(event, &open.board),
        (SessionState::SecretChosen(_), None) => {
            "Tap to hide or show, hold to move your secret, tap your secret to clear it"
                .to_string()
        }
    }
}

pub fn entry_prompt(entry: &CodeEntry) -> String {
    match entry.ready() {
        Some(code) => format!("Press Enter to join game {code}"),
        None => "Type a 5-digit game code or generate a new one".to_string(),
    }
}

pub fn event_text(event: &SessionEvent, board: &Board) -> String {
    match event {
        SessionEvent::SecretChosen { slot } => format!("Your secret is {}", board.name(*slot)),
        SessionEvent::SecretMoved { to, .. } => format!("Secret moved to {}", board.name(*to)),
        SessionEvent::SecretCleared { .. } => "Secret cleared, pick a new one".to_string(),
        SessionEvent::SlotHidden { slot } => format!("Hid {}", board.name(*slot)),
        SessionEvent::SlotRevealed { slot } => format!("Showing {} again", board.name(*slot)),
        SessionEvent::StoredValueDiscarded { key, reason } => {
            format!("Ignored saved {key}: {reason}")
        }
    }
}

pub fn secret_caption(board: &Board, secret: Option<Slot>) -> String {
    match secret {
        Some(slot) => format!("Your secret: {}", board.name(slot)),
        None => "No secret yet".to_string(),
    }
}

pub fn header_text(board: &Board, share_link: &str) -> String {
    format!("Game {}  |  {share_link}", board.code())
}
