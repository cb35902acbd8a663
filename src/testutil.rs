//! Shared test doubles for host tests.

use std::collections::VecDeque;
use std::string::String;
use std::vec::Vec;

use embedded_graphics::pixelcolor::Rgb565;

use crate::events::{Event, InputSource};
use crate::link::{ControllerLink, MachineState, RealtimeCmd};
use crate::ota::{NetError, NetServices, UpdateEvent};
use crate::ui::screen::{Align, FontSize, Screen};

/// Screen that records every draw call instead of rendering.
pub struct RecordingScreen {
    /// (text, color) of every text draw since the last clear-tracking reset.
    pub lines: Vec<(String, Rgb565)>,
    pub brightness_calls: Vec<u8>,
    pub clears: usize,
    pub refreshes: usize,
}

impl RecordingScreen {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            brightness_calls: Vec::new(),
            clears: 0,
            refreshes: 0,
        }
    }

    /// True if any recorded line contains `needle` in the given color.
    pub fn has_line_containing(&self, needle: &str, color: Rgb565) -> bool {
        self.lines
            .iter()
            .any(|(text, c)| text.contains(needle) && *c == color)
    }

    /// True if any recorded line contains `needle`, regardless of color.
    pub fn any_line_contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|(text, _)| text.contains(needle))
    }
}

impl Screen for RecordingScreen {
    fn clear(&mut self) {
        self.clears += 1;
    }

    fn text(&mut self, s: &str, _x: i32, _y: i32, color: Rgb565, _size: FontSize, _align: Align) {
        self.lines.push((s.into(), color));
    }

    fn refresh(&mut self) {
        self.refreshes += 1;
    }

    fn set_brightness(&mut self, level: u8) {
        self.brightness_calls.push(level);
    }
}

/// Controller link that records outbound traffic and scripts inbound state.
pub struct FakeLink {
    pub sent_lines: Vec<String>,
    pub realtime_cmds: Vec<RealtimeCmd>,
    pub pending_states: VecDeque<MachineState>,
}

impl FakeLink {
    pub fn new() -> Self {
        Self {
            sent_lines: Vec::new(),
            realtime_cmds: Vec::new(),
            pending_states: VecDeque::new(),
        }
    }
}

impl ControllerLink for FakeLink {
    fn poll_state(&mut self) -> Option<MachineState> {
        self.pending_states.pop_front()
    }

    fn send_line(&mut self, line: &str) {
        self.sent_lines.push(line.into());
    }

    fn realtime(&mut self, cmd: RealtimeCmd) {
        self.realtime_cmds.push(cmd);
    }
}

/// Input source fed from a scripted queue.
pub struct ScriptInput {
    pub events: VecDeque<Event>,
}

impl ScriptInput {
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }
}

impl InputSource for ScriptInput {
    fn poll(&mut self) -> Option<Event> {
        self.events.pop_front()
    }
}

/// Scripted network services for OTA tests.
pub struct FakeNet {
    /// Number of `begin_connect` calls observed.
    pub connect_calls: u32,
    /// Fail `begin_connect` outright.
    pub fail_connect: bool,
    /// `connection_up` turns true after this many polls; `None` = never.
    pub up_after_polls: Option<u32>,
    polls: u32,
    pub ip: Option<[u8; 4]>,
    /// Number of `start_listener` calls observed.
    pub listener_starts: u32,
    /// Fail `start_listener`.
    pub fail_listener: bool,
    events: VecDeque<UpdateEvent>,
}

impl FakeNet {
    pub fn new() -> Self {
        Self {
            connect_calls: 0,
            fail_connect: false,
            up_after_polls: None,
            polls: 0,
            ip: None,
            listener_starts: 0,
            fail_listener: false,
            events: VecDeque::new(),
        }
    }

    pub fn push_event(&mut self, event: UpdateEvent) {
        self.events.push_back(event);
    }
}

impl NetServices for FakeNet {
    fn begin_connect(&mut self, _ssid: &str, _password: &str) -> Result<(), NetError> {
        self.connect_calls += 1;
        if self.fail_connect {
            Err(NetError::Radio)
        } else {
            Ok(())
        }
    }

    fn connection_up(&mut self) -> bool {
        self.polls += 1;
        match self.up_after_polls {
            Some(n) => self.polls > n,
            None => false,
        }
    }

    fn local_ip(&mut self) -> Option<[u8; 4]> {
        self.ip
    }

    fn start_listener(
        &mut self,
        _hostname: &str,
        _auth_secret: Option<&str>,
    ) -> Result<(), NetError> {
        self.listener_starts += 1;
        if self.fail_listener {
            Err(NetError::Listener)
        } else {
            Ok(())
        }
    }

    fn poll(&mut self) -> Option<UpdateEvent> {
        self.events.pop_front()
    }
}
