//! Button debounce handling.
//!
//! Time-based edge detection to prevent multiple triggers from contact
//! bounce. Timestamps come from the caller (the platform clock) so the logic
//! tests on the host.

/// Debounce duration in milliseconds.
pub const DEBOUNCE_MS: u64 = 50;

/// Debounce state for one button.
pub struct ButtonState {
    was_pressed: bool,
    last_change_ms: Option<u64>,
}

impl ButtonState {
    /// Create a new button state (not pressed).
    pub const fn new() -> Self {
        Self {
            was_pressed: false,
            last_change_ms: None,
        }
    }

    /// Returns true only on the falling edge (button just pressed).
    ///
    /// Buttons are active-low, so `is_low` means pressed. Changes within
    /// `DEBOUNCE_MS` of the previous edge are ignored.
    pub fn just_pressed(&mut self, is_low: bool, now_ms: u64) -> bool {
        if is_low != self.was_pressed {
            if let Some(last) = self.last_change_ms {
                if now_ms.saturating_sub(last) < DEBOUNCE_MS {
                    return false;
                }
            }

            self.was_pressed = is_low;
            self.last_change_ms = Some(now_ms);

            // Only the press edge counts
            return is_low;
        }

        false
    }
}

impl Default for ButtonState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_edge_fires_once() {
        let mut btn = ButtonState::new();
        assert!(btn.just_pressed(true, 0));
        // Held down: no further events
        assert!(!btn.just_pressed(true, 100));
        assert!(!btn.just_pressed(true, 200));
    }

    #[test]
    fn release_does_not_fire() {
        let mut btn = ButtonState::new();
        assert!(btn.just_pressed(true, 0));
        assert!(!btn.just_pressed(false, 100));
    }

    #[test]
    fn bounce_within_debounce_window_is_ignored() {
        let mut btn = ButtonState::new();
        assert!(btn.just_pressed(true, 0));
        // Contact bounce: released and re-pressed within the window
        assert!(!btn.just_pressed(false, 10));
        assert!(!btn.just_pressed(true, 20));
        // Still held after the window: no new edge
        assert!(!btn.just_pressed(true, 100));
    }

    #[test]
    fn repress_after_debounce_fires_again() {
        let mut btn = ButtonState::new();
        assert!(btn.just_pressed(true, 0));
        assert!(!btn.just_pressed(false, 100));
        assert!(btn.just_pressed(true, 200));
    }
}
