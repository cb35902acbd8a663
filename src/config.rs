//! Application configuration constants and build-time OTA settings.
//!
//! Layout values are pre-computed as `const` so drawing code never repeats
//! the arithmetic. OTA network identity comes in at build time through
//! `build.rs` (which loads a gitignored `.env`); an empty or template value
//! disables the update subsystem entirely.

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (round GC9A01 panel: 240x240)
pub const SCREEN_WIDTH: u32 = 240;

/// Display height in pixels
pub const SCREEN_HEIGHT: u32 = 240;

/// Screen center X coordinate. Used for centered text.
pub const CENTER_X: i32 = (SCREEN_WIDTH / 2) as i32;

/// Screen center Y coordinate.
pub const CENTER_Y: i32 = (SCREEN_HEIGHT / 2) as i32;

/// Baseline Y for the scene title at the top of the screen.
pub const TITLE_Y: i32 = 14;

// =============================================================================
// Brightness
// =============================================================================

/// Lowest brightness the encoder can dial in. Below this the panel is
/// unreadable and looks switched off.
pub const MIN_BRIGHTNESS: i32 = 8;

/// Hardware maximum backlight level.
pub const MAX_BRIGHTNESS: i32 = 255;

/// Brightness used when no preference has ever been stored.
pub const DEFAULT_BRIGHTNESS: i32 = 255;

/// Backlight cap applied after a brownout reset so the unit can boot on a
/// sagging supply.
pub const BROWNOUT_BRIGHTNESS_CAP: i32 = 32;

/// Preference-store key for the persisted brightness value.
pub const BRIGHTNESS_PREF_KEY: &str = "brightness";

// =============================================================================
// OTA / WiFi
// =============================================================================

/// Upper bound on the one-shot WiFi association wait during boot.
pub const WIFI_CONNECT_TIMEOUT_MS: u64 = 10_000;

/// Poll interval while waiting for WiFi association.
pub const WIFI_CONNECT_POLL_MS: u32 = 50;

/// TCP port the firmware-update listener binds to.
pub const OTA_LISTEN_PORT: u16 = 3232;

/// Template SSID shipped in `.env.example`; treated the same as "not
/// configured" so a forgotten template never stalls boot.
pub const PLACEHOLDER_SSID: &str = "YOUR_WIFI_SSID";

/// Hostname advertised by the update listener when none is configured.
pub const DEFAULT_HOSTNAME: &str = "pendant";

// =============================================================================
// Version
// =============================================================================

/// Firmware version shown on the About scene.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Build-time OTA configuration
// =============================================================================

/// OTA network identity, fixed at build time.
///
/// All fields come from `build.rs` re-exported environment variables; they
/// are never runtime-mutable.
#[derive(Clone, Copy, Debug)]
pub struct OtaConfig {
    pub ssid: &'static str,
    pub password: &'static str,
    pub hostname: &'static str,
    /// Optional secret required to start an update.
    pub auth_secret: Option<&'static str>,
}

impl OtaConfig {
    /// Resolve the configuration baked in by `build.rs`.
    pub fn from_build_env() -> Self {
        let hostname = match option_env!("PENDANT_OTA_HOSTNAME") {
            Some(h) if !h.is_empty() => h,
            _ => DEFAULT_HOSTNAME,
        };
        let auth_secret = match option_env!("PENDANT_OTA_AUTH") {
            Some(a) if !a.is_empty() => Some(a),
            _ => None,
        };
        Self {
            ssid: option_env!("PENDANT_WIFI_SSID").unwrap_or(""),
            password: option_env!("PENDANT_WIFI_PASS").unwrap_or(""),
            hostname,
            auth_secret,
        }
    }

    /// True when a usable network identity is present.
    ///
    /// An empty SSID and the unmodified template value both count as
    /// "not configured".
    pub fn network_configured(&self) -> bool {
        !self.ssid.is_empty() && self.ssid != PLACEHOLDER_SSID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ssid_is_not_configured() {
        let cfg = OtaConfig {
            ssid: "",
            password: "",
            hostname: DEFAULT_HOSTNAME,
            auth_secret: None,
        };
        assert!(!cfg.network_configured());
    }

    #[test]
    fn placeholder_ssid_is_not_configured() {
        let cfg = OtaConfig {
            ssid: PLACEHOLDER_SSID,
            password: "secret",
            hostname: DEFAULT_HOSTNAME,
            auth_secret: None,
        };
        assert!(!cfg.network_configured());
    }

    #[test]
    fn real_ssid_is_configured() {
        let cfg = OtaConfig {
            ssid: "workshop",
            password: "secret",
            hostname: "dial",
            auth_secret: Some("changeme"),
        };
        assert!(cfg.network_configured());
    }
}
