use whowho_core::{Board, CharacterIndex, GameCode, assign_names, select_board};

const GOLDEN_INDICES: [u32; 24] = [
    980285, 846699, 361003, 909002, 839459, 19658, 57626, 191015, 842665, 842824, 318034, 246690,
    681262, 637182, 648401, 989609, 565127, 464463, 184529, 518535, 111544, 682690, 914073, 6310,
];

const GOLDEN_NAMES: [&str; 24] = [
    "Avery", "Elm", "Morgan", "Harlow", "Gage", "Ellis", "Blair", "Jade", "Winter", "Phoenix",
    "Aiden", "Emery", "Noah", "Eden", "Grey", "Ridge", "Oakley", "Mason", "Quincy", "Quinn", "Kai",
    "Finley", "Haven", "Casey",
];

fn code(value: &str) -> GameCode {
    GameCode::parse(value).expect("valid code")
}

#[test]
fn code_42017_selects_golden_indices() {
    let board = select_board(&code("42017")).expect("board");
    let expected: Vec<CharacterIndex> =
        GOLDEN_INDICES.iter().copied().map(CharacterIndex).collect();
    assert_eq!(board.indices(), expected.as_slice());
}

#[test]
fn code_42017_assigns_golden_names() {
    let code = code("42017");
    let board = select_board(&code).expect("board");
    let names = assign_names(&code, &board);
    for (index, expected) in GOLDEN_INDICES.iter().zip(GOLDEN_NAMES) {
        assert_eq!(names.get(CharacterIndex(*index)), Some(expected));
    }
}

#[test]
fn code_00000_selects_golden_prefix() {
    let board = select_board(&code("00000")).expect("board");
    let prefix: Vec<u32> = board.indices().iter().take(6).map(|index| index.0).collect();
    assert_eq!(prefix, vec![767905, 500574, 53973, 221313, 647655, 52134]);

    let board = Board::generate(&code("00000")).expect("board");
    let names: Vec<&str> = board.slots().take(4).map(|(_, _, name)| name).collect();
    assert_eq!(names, vec!["Nyx", "Dakota", "Cody", "Echo"]);
}

#[test]
fn naming_does_not_disturb_board_selection() {
    let code = code("42017");
    let before = select_board(&code).expect("board");
    let _ = assign_names(&code, &before);
    let after = select_board(&code).expect("board");
    assert_eq!(before, after);
}
