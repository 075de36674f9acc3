//! Keyboard and pointer input collection for one rendered frame.

use crate::board_layout::FrameLayout;
use app::app_loop::{AppState, UiInput};
use app::press::{HitTarget, PressOutcome, PressTracker};
use macroquad::prelude::{
    KeyCode, MouseButton, get_char_pressed, get_time, is_key_pressed, is_mouse_button_pressed,
    is_mouse_button_released, mouse_position,
};
use whowho_core::Gesture;

pub fn capture_frame_input(
    app_state: &AppState,
    layout: &FrameLayout,
    tracker: &mut PressTracker,
) -> Vec<UiInput> {
    let mut inputs = Vec::new();

    // Drain the whole character queue each frame.
    while let Some(ch) = get_char_pressed() {
        if ch.is_ascii_digit() {
            inputs.push(UiInput::Digit(ch));
        }
    }
    if is_key_pressed(KeyCode::Backspace) {
        inputs.push(UiInput::Backspace);
    }
    if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter) {
        inputs.push(UiInput::Submit);
    }
    if is_key_pressed(KeyCode::Escape) {
        inputs.push(UiInput::BackToMenu);
    }

    let playing = app_state.open_board().is_some();
    let (x, y) = mouse_position();
    let target = layout.hit_test(playing, x, y);
    let now = get_time();

    if is_mouse_button_pressed(MouseButton::Left) {
        tracker.press(target, now);
    }
    if is_mouse_button_released(MouseButton::Left) {
        match tracker.release(target, now) {
            Some(PressOutcome::Gesture(gesture)) => inputs.push(UiInput::Gesture(gesture)),
            Some(PressOutcome::Button(HitTarget::JoinButton)) => inputs.push(UiInput::Submit),
            Some(PressOutcome::Button(HitTarget::GenerateButton)) => {
                inputs.push(UiInput::Generate);
            }
            Some(PressOutcome::Button(_)) | None => {}
        }
    }
    if is_mouse_button_pressed(MouseButton::Right)
        && let Some(HitTarget::Slot(slot)) = target
    {
        inputs.push(UiInput::Gesture(Gesture::LongPress(slot)));
    }

    inputs
}
