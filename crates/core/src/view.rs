//! Per-slot display state derived from a board and a session.

use crate::board::{Board, CharacterIndex};
use crate::session::{GameSession, Slot};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotView<'a> {
    pub slot: Slot,
    pub character: CharacterIndex,
    pub name: &'a str,
    pub is_secret: bool,
    /// Hidden cards are only shown as eliminated once a secret exists.
    pub is_hidden: bool,
    /// No secret yet: every card is offered as a pick.
    pub awaiting_secret: bool,
}

pub fn slot_views<'a>(board: &'a Board, session: &GameSession) -> Vec<SlotView<'a>> {
    let secret = session.secret();
    board
        .slots()
        .map(|(slot, character, name)| SlotView {
            slot,
            character,
            name,
            is_secret: secret == Some(slot),
            is_hidden: secret.is_some() && session.is_hidden(slot),
            awaiting_secret: secret.is_none(),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecretCard<'a> {
    pub slot: Slot,
    pub character: CharacterIndex,
    pub name: &'a str,
}

pub fn secret_card<'a>(board: &'a Board, session: &GameSession) -> Option<SecretCard<'a>> {
    session.secret().map(|slot| SecretCard {
        slot,
        character: board.character(slot),
        name: board.name(slot),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::GameCode;

    fn fixture() -> (Board, GameSession) {
        let code = GameCode::parse("55555").expect("valid code");
        (Board::generate(&code).expect("board"), GameSession::new(code))
    }

    fn slot(index: usize) -> Slot {
        Slot::new(index).expect("slot on board")
    }

    #[test]
    fn fresh_session_offers_every_card() {
        let (board, session) = fixture();
        let views = slot_views(&board, &session);
        assert_eq!(views.len(), 24);
        assert!(views.iter().all(|view| view.awaiting_secret && !view.is_secret));
        assert!(secret_card(&board, &session).is_none());
    }

    #[test]
    fn hidden_flag_only_shows_while_secret_is_chosen() {
        let (board, mut session) = fixture();
        session.tap_slot(slot(2));
        session.tap_slot(slot(6));

        let views = slot_views(&board, &session);
        assert!(views[2].is_secret);
        assert!(views[6].is_hidden);
        assert!(views.iter().all(|view| !view.awaiting_secret));

        session.tap_secret_display();
        let views = slot_views(&board, &session);
        assert!(session.is_hidden(slot(6)));
        assert!(!views[6].is_hidden);
    }

    #[test]
    fn secret_card_names_the_secret_character() {
        let (board, mut session) = fixture();
        session.tap_slot(slot(11));
        let card = secret_card(&board, &session).expect("secret chosen");
        assert_eq!(card.character, board.character(slot(11)));
        assert_eq!(card.name, board.name(slot(11)));
    }
}
