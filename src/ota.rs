//! OTA status subsystem.
//!
//! Owns the optional WiFi connection and the firmware-update listener, and
//! exposes a small read-only status record the UI polls. All state changes
//! happen in two places: the one-shot [`Ota::setup`] during boot and the
//! non-blocking [`Ota::handle`] tick. Network failures never propagate out;
//! they end up as status text and the subsystem goes inert for the rest of
//! the boot session.

use core::fmt::Write as _;

use heapless::String;

use crate::config::{OtaConfig, WIFI_CONNECT_POLL_MS, WIFI_CONNECT_TIMEOUT_MS};
use crate::platform::Platform;

/// Lifecycle of the update subsystem for one boot session.
///
/// `Disabled`, `SkippedBrownout` and `WifiFailed` are terminal: there is no
/// retry within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OtaPhase {
    Disabled,
    SkippedBrownout,
    Initializing,
    WifiConnecting,
    WifiFailed,
    WifiConnected,
    ListenerReady,
    UpdateInProgress,
    UpdateComplete,
    UpdateError,
}

/// Update-listener event reported by the network layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateEvent {
    /// A client started pushing an update.
    Started,
    /// The update was received and staged successfully.
    Completed,
    /// The update failed with a protocol/flash error code.
    Error(u8),
}

/// Network-layer failure, resolved locally into status text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetError {
    /// The radio could not be configured or started.
    Radio,
    /// The update listener could not be started.
    Listener,
}

/// Network services the subsystem drives. The real implementation wraps the
/// WiFi driver and a TCP listener; tests script one.
pub trait NetServices {
    /// Begin association with the given network. Non-blocking.
    fn begin_connect(&mut self, ssid: &str, password: &str) -> Result<(), NetError>;

    /// True once association and addressing are complete.
    fn connection_up(&mut self) -> bool;

    /// Local IPv4 address, once up.
    fn local_ip(&mut self) -> Option<[u8; 4]>;

    /// Start the update listener.
    fn start_listener(&mut self, hostname: &str, auth_secret: Option<&str>) -> Result<(), NetError>;

    /// Drain the next listener event, if any. Must never block.
    fn poll(&mut self) -> Option<UpdateEvent>;
}

/// Read-only status record the UI renders from.
///
/// Strings are empty when there is nothing to show, never absent.
pub struct OtaStatus {
    /// A usable network identity is configured.
    pub enabled: bool,
    /// The update listener is running.
    pub ready: bool,
    /// Human-readable one-line state.
    pub status: String<48>,
    /// Last error, formatted; empty when none.
    pub last_error: String<48>,
    /// Configured listener hostname.
    pub hostname: String<32>,
    /// Resolved local IP, dotted quad.
    pub ip: String<16>,
}

impl OtaStatus {
    const fn new() -> Self {
        Self {
            enabled: false,
            ready: false,
            status: String::new(),
            last_error: String::new(),
            hostname: String::new(),
            ip: String::new(),
        }
    }
}

/// The update subsystem. One instance per boot session.
pub struct Ota {
    phase: OtaPhase,
    status: OtaStatus,
    listener_started: bool,
}

impl Ota {
    pub const fn new() -> Self {
        Self {
            phase: OtaPhase::Disabled,
            status: OtaStatus::new(),
            listener_started: false,
        }
    }

    #[inline]
    pub const fn phase(&self) -> OtaPhase {
        self.phase
    }

    /// Read-only view of the status record.
    #[inline]
    pub const fn status(&self) -> &OtaStatus {
        &self.status
    }

    fn set_status(&mut self, text: &str) {
        self.status.status.clear();
        let _ = self.status.status.push_str(text);
    }

    fn set_error(&mut self, text: &str) {
        self.status.last_error.clear();
        let _ = self.status.last_error.push_str(text);
    }

    /// One-shot boot setup. The association wait is the only blocking step
    /// in the subsystem and is capped at `WIFI_CONNECT_TIMEOUT_MS`.
    pub fn setup(
        &mut self,
        cfg: &OtaConfig,
        was_brownout: bool,
        net: &mut dyn NetServices,
        platform: &mut dyn Platform,
    ) {
        if !cfg.network_configured() {
            self.phase = OtaPhase::Disabled;
            self.set_status("disabled");
            return;
        }

        self.status.enabled = true;
        let _ = self.status.hostname.push_str(cfg.hostname);

        // Right after a brownout the supply is suspect; the radio would only
        // add load. Skip networking for this whole boot session.
        if was_brownout {
            self.phase = OtaPhase::SkippedBrownout;
            self.set_status("skipped (brownout)");
            self.set_error("brownout reset");
            return;
        }

        self.phase = OtaPhase::Initializing;
        if net.begin_connect(cfg.ssid, cfg.password).is_err() {
            self.phase = OtaPhase::WifiFailed;
            self.set_status("WiFi connect failed");
            self.set_error("radio start failed");
            return;
        }

        self.phase = OtaPhase::WifiConnecting;
        self.status.status.clear();
        let _ = write!(self.status.status, "connecting to {}", cfg.ssid);

        let start = platform.now_ms();
        while !net.connection_up() {
            if platform.now_ms().saturating_sub(start) >= WIFI_CONNECT_TIMEOUT_MS {
                self.phase = OtaPhase::WifiFailed;
                self.set_status("WiFi connect failed");
                return;
            }
            platform.delay_ms(WIFI_CONNECT_POLL_MS);
        }

        self.phase = OtaPhase::WifiConnected;
        if let Some(ip) = net.local_ip() {
            self.status.ip.clear();
            let _ = write!(self.status.ip, "{}.{}.{}.{}", ip[0], ip[1], ip[2], ip[3]);
        }

        match net.start_listener(cfg.hostname, cfg.auth_secret) {
            Ok(()) => {
                self.listener_started = true;
                self.phase = OtaPhase::ListenerReady;
                self.status.ready = true;
                self.set_status("ready");
            }
            Err(_) => {
                self.phase = OtaPhase::UpdateError;
                self.set_status("listener failed");
                self.set_error("listener start failed");
            }
        }
    }

    /// Non-blocking tick. No-op whenever the listener never started.
    pub fn handle(&mut self, net: &mut dyn NetServices) {
        if !self.listener_started {
            return;
        }

        match net.poll() {
            Some(UpdateEvent::Started) => {
                self.phase = OtaPhase::UpdateInProgress;
                self.set_status("updating");
                self.status.last_error.clear();
            }
            Some(UpdateEvent::Completed) => {
                self.phase = OtaPhase::UpdateComplete;
                self.set_status("update complete");
            }
            Some(UpdateEvent::Error(code)) => {
                // The listener stays up; record the failure and keep serving
                self.phase = OtaPhase::UpdateError;
                self.set_status("update failed");
                self.status.last_error.clear();
                let _ = write!(self.status.last_error, "update error {code}");
            }
            None => {}
        }
    }
}

impl Default for Ota {
    fn default() -> Self {
        Self::new()
    }
}
