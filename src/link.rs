//! Controller-link types: machine state and the outbound command interface.
//!
//! The serial protocol itself lives behind [`ControllerLink`]; the core only
//! sees the decoded machine state and issues lines/realtime commands through
//! the trait.

use embedded_graphics::pixelcolor::Rgb565;

use crate::ui::colors::{GREEN, LIGHT_GRAY, ORANGE, RED, WHITE, YELLOW};

/// Machine state reported by the motion controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MachineState {
    /// No report received yet, or the link dropped.
    #[default]
    Disconnected,
    Idle,
    Run,
    Hold,
    Jog,
    Alarm,
}

impl MachineState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "Disconnected",
            Self::Idle => "Idle",
            Self::Run => "Run",
            Self::Hold => "Hold",
            Self::Jog => "Jog",
            Self::Alarm => "Alarm",
        }
    }

    /// Display color for the state, used wherever the state name is drawn.
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Disconnected => LIGHT_GRAY,
            Self::Idle => WHITE,
            Self::Run => GREEN,
            Self::Hold => YELLOW,
            Self::Jog => ORANGE,
            Self::Alarm => RED,
        }
    }
}

/// Single-byte realtime commands understood by the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RealtimeCmd {
    /// Ask for an immediate status report.
    StatusReport,
}

impl RealtimeCmd {
    /// Wire byte for the command.
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::StatusReport => b'?',
        }
    }
}

/// Outbound half of the controller link plus the decoded inbound state.
///
/// `poll_state` is non-blocking and returns each newly decoded machine state
/// at most once; the line parser behind it owns reassembly and decoding.
pub trait ControllerLink {
    /// Next decoded machine state, if a report arrived since the last poll.
    fn poll_state(&mut self) -> Option<MachineState>;

    /// Queue a full command line (newline handling is the link's concern).
    fn send_line(&mut self, line: &str);

    /// Send a realtime command byte, bypassing the line buffer.
    fn realtime(&mut self, cmd: RealtimeCmd);
}
