//! Window configuration for the desktop app.

use app::{APP_NAME, resolve_share_origin};
use macroquad::window::Conf;
use std::env;

const DEFAULT_WINDOW_WIDTH: i32 = 960;
const DEFAULT_WINDOW_HEIGHT: i32 = 720;
pub const SHARE_ORIGIN_ENV: &str = "WHOWHO_ORIGIN";

pub fn build_window_conf() -> Conf {
    Conf {
        window_title: APP_NAME.to_owned(),
        window_width: DEFAULT_WINDOW_WIDTH,
        window_height: DEFAULT_WINDOW_HEIGHT,
        // Linux desktop sessions may not scale low-DPI framebuffers automatically.
        high_dpi: true,
        ..Default::default()
    }
}

pub fn share_origin() -> String {
    let override_value = env::var(SHARE_ORIGIN_ENV).ok();
    resolve_share_origin(override_value.as_deref())
}
