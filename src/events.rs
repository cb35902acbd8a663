//! Input events routed through the scene dispatcher.

use crate::link::MachineState;

/// One input event, delivered synchronously to the active scene.
///
/// Encoder deltas are signed detent counts; if the hardware coalesces several
/// physical detents into one reading, that is the input layer's business and
/// arrives here as a single larger delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Press of the dial (center) button.
    DialButton,
    /// Press of the secondary (green) button.
    GreenButton,
    /// Press of the tertiary (red) button.
    RedButton,
    /// Tap on the touch panel.
    TouchClick,
    /// Rotary encoder movement, in detents.
    Encoder(i32),
    /// The controller-link state changed; payload is the state being left.
    StateChange(MachineState),
}

/// Non-blocking source of input events (buttons, encoder, touch).
pub trait InputSource {
    /// Next pending event, if any. Must never block.
    fn poll(&mut self) -> Option<Event>;
}
