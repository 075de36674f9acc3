pub mod app_loop;
pub mod code_choice;
pub mod code_entry;
pub mod press;
pub mod session_file;

use whowho_core::GameCode;

pub const APP_NAME: &str = "WhoWho";
pub const DEFAULT_SHARE_ORIGIN: &str = "https://whowho.app";

/// Pick the share-link origin, preferring a non-blank override.
pub fn resolve_share_origin(override_value: Option<&str>) -> String {
    override_value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_SHARE_ORIGIN)
        .trim_end_matches('/')
        .to_string()
}

/// The link players pass around; opening it shows the same board.
pub fn share_link(origin: &str, code: &GameCode) -> String {
    format!("{}/{code}", origin.trim_end_matches('/'))
}
