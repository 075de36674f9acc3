mod board_layout;
mod frame_input;
mod ui_render;
mod ui_text;
mod window_config;

use app::app_loop::AppState;
use app::code_choice::{CodeChoice, resolve_code_from_args};
use app::press::PressTracker;
use app::session_file::FileStore;
use board_layout::{compute_frame_layout, setup_layout};
use frame_input::capture_frame_input;
use macroquad::prelude::*;
use macroquad::window::Conf;
use std::env;
use std::process;
use taffy::TaffyTree;
use ui_render::draw_frame;
use whowho_core::{MemoryStore, SessionStore};
use window_config::{build_window_conf, share_origin};

fn window_conf() -> Conf {
    build_window_conf()
}

fn open_store() -> Box<dyn SessionStore> {
    let Some(path) = FileStore::default_path() else {
        eprintln!("No data directory available; progress will not survive a restart.");
        return Box::new(MemoryStore::new());
    };
    let store = FileStore::open(&path);
    if let Some(warning) = store.open_warning() {
        eprintln!("{warning}");
    }
    Box::new(store)
}

#[macroquad::main(window_conf)]
async fn main() {
    let args: Vec<String> = env::args().collect();
    let code_choice = match resolve_code_from_args(&args) {
        Ok(choice) => choice,
        Err(err) => {
            eprintln!("Argument error: {err}");
            process::exit(2);
        }
    };

    let mut store = open_store();
    let share_origin = share_origin();
    let mut app_state = AppState::new();
    match code_choice {
        CodeChoice::Cli(code) => app_state.open_code(code, store.as_ref()),
        CodeChoice::Rejected { raw, error } => app_state.reject_code(&raw, &error.to_string()),
        CodeChoice::StartScreen => {}
    }

    let mut taffy = TaffyTree::new();
    let layout_nodes = setup_layout(&mut taffy);
    let mut press_tracker = PressTracker::default();

    loop {
        let layout =
            compute_frame_layout(&mut taffy, &layout_nodes, screen_width(), screen_height());
        let inputs = capture_frame_input(&app_state, &layout, &mut press_tracker);
        for err in app_state.tick(store.as_mut(), &inputs) {
            eprintln!("Progress not saved: {err}");
        }

        draw_frame(&app_state, &layout, &share_origin);
        next_frame().await
    }
}
