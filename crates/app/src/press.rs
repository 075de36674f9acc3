//! Turns pointer press/release pairs into session gestures.
//!
//! A press released on the same target counts; holding for at least
//! [`LONG_PRESS_SECS`] turns a slot tap into a long press.

use whowho_core::{Gesture, Slot};

pub const LONG_PRESS_SECS: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    Slot(Slot),
    SecretDisplay,
    JoinButton,
    GenerateButton,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PressOutcome {
    Gesture(Gesture),
    Button(HitTarget),
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PressTracker {
    pending: Option<(HitTarget, f64)>,
}

impl PressTracker {
    pub fn press(&mut self, target: Option<HitTarget>, now_secs: f64) {
        self.pending = target.map(|target| (target, now_secs));
    }

    /// Ends the current press. Returns nothing if the pointer left the target.
    pub fn release(&mut self, target: Option<HitTarget>, now_secs: f64) -> Option<PressOutcome> {
        let (pressed, started) = self.pending.take()?;
        if target != Some(pressed) {
            return None;
        }
        let long = now_secs - started >= LONG_PRESS_SECS;
        Some(match pressed {
            HitTarget::Slot(slot) if long => PressOutcome::Gesture(Gesture::LongPress(slot)),
            HitTarget::Slot(slot) => PressOutcome::Gesture(Gesture::Tap(slot)),
            HitTarget::SecretDisplay => PressOutcome::Gesture(Gesture::TapSecretDisplay),
            button => PressOutcome::Button(button),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(index: usize) -> Slot {
        Slot::new(index).expect("slot on board")
    }

    #[test]
    fn quick_release_is_a_tap() {
        let mut tracker = PressTracker::default();
        tracker.press(Some(HitTarget::Slot(slot(4))), 10.0);
        assert_eq!(
            tracker.release(Some(HitTarget::Slot(slot(4))), 10.1),
            Some(PressOutcome::Gesture(Gesture::Tap(slot(4))))
        );
        assert_eq!(tracker.release(Some(HitTarget::Slot(slot(4))), 10.2), None);
    }

    #[test]
    fn held_release_is_a_long_press() {
        let mut tracker = PressTracker::default();
        tracker.press(Some(HitTarget::Slot(slot(4))), 10.0);
        assert_eq!(
            tracker.release(Some(HitTarget::Slot(slot(4))), 10.6),
            Some(PressOutcome::Gesture(Gesture::LongPress(slot(4))))
        );
    }

    #[test]
    fn dragging_off_the_target_cancels() {
        let mut tracker = PressTracker::default();
        tracker.press(Some(HitTarget::Slot(slot(4))), 10.0);
        assert_eq!(tracker.release(Some(HitTarget::Slot(slot(5))), 10.1), None);
        tracker.press(Some(HitTarget::SecretDisplay), 11.0);
        assert_eq!(tracker.release(None, 11.1), None);
    }

    #[test]
    fn secret_display_and_buttons_ignore_hold_time() {
        let mut tracker = PressTracker::default();
        tracker.press(Some(HitTarget::SecretDisplay), 0.0);
        assert_eq!(
            tracker.release(Some(HitTarget::SecretDisplay), 3.0),
            Some(PressOutcome::Gesture(Gesture::TapSecretDisplay))
        );
        tracker.press(Some(HitTarget::JoinButton), 0.0);
        assert_eq!(
            tracker.release(Some(HitTarget::JoinButton), 2.0),
            Some(PressOutcome::Button(HitTarget::JoinButton))
        );
    }

    #[test]
    fn release_without_press_does_nothing() {
        let mut tracker = PressTracker::default();
        assert_eq!(tracker.release(Some(HitTarget::GenerateButton), 1.0), None);
    }
}
