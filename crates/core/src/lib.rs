pub mod asset;
pub mod board;
pub mod code;
pub mod names;
pub mod rng;
pub mod session;
pub mod storage;
pub mod view;

pub use asset::{AssetResolver, AvatarService};
pub use board::{BOARD_SIZE, Board, BoardSelection, CharacterIndex, SelectionError, select_board};
pub use code::{CodeError, GameCode, generate_code, generate_code_at};
pub use names::{NameMap, NamePool, NamePoolError, assign_names};
pub use rng::{GenerationError, SeededGenerator};
pub use session::{GameSession, Gesture, SessionEvent, SessionState, Slot};
pub use storage::{MemoryStore, SessionStore, StoreError, load, save};
pub use view::{SecretCard, SlotView, secret_card, slot_views};
