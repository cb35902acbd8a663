//! Platform services abstraction.
//!
//! The dispatch core never talks to a HAL directly; it goes through the
//! [`Platform`] trait so the same code runs on the ESP32-C3 target and on the
//! host during tests. The binary provides the real implementation,
//! [`NullPlatform`] provides the simulated one.

/// Why the chip (re)booted, captured once at process start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetCause {
    PowerOn,
    External,
    Software,
    Panic,
    IntWatchdog,
    TaskWatchdog,
    Watchdog,
    DeepSleep,
    Brownout,
    Sdio,
    Unknown,
}

impl ResetCause {
    /// Short lowercase label used on the About scene and in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PowerOn => "poweron",
            Self::External => "external",
            Self::Software => "software",
            Self::Panic => "panic",
            Self::IntWatchdog => "int_wdt",
            Self::TaskWatchdog => "task_wdt",
            Self::Watchdog => "wdt",
            Self::DeepSleep => "deepsleep",
            Self::Brownout => "brownout",
            Self::Sdio => "sdio",
            Self::Unknown => "unknown",
        }
    }

    #[inline]
    pub const fn is_brownout(self) -> bool {
        matches!(self, Self::Brownout)
    }
}

/// Capabilities the core needs from the chip it runs on.
pub trait Platform {
    /// Reset reason of the current boot. Stable for the process lifetime.
    fn reset_cause(&self) -> ResetCause;

    /// Monotonic milliseconds since boot.
    fn now_ms(&self) -> u64;

    /// Busy-wait for the given number of milliseconds.
    fn delay_ms(&mut self, ms: u32);

    /// Reboot the unit.
    fn restart(&mut self);

    /// Enter deep sleep until an external wakeup.
    fn deep_sleep(&mut self);
}

/// Simulated platform for host builds and tests.
///
/// The clock only advances through `delay_ms`, which makes timeout behavior
/// deterministic in tests.
pub struct NullPlatform {
    cause: ResetCause,
    now_ms: u64,
    restarts: u32,
    sleeps: u32,
}

impl NullPlatform {
    pub const fn new() -> Self {
        Self::with_reset_cause(ResetCause::PowerOn)
    }

    pub const fn with_reset_cause(cause: ResetCause) -> Self {
        Self {
            cause,
            now_ms: 0,
            restarts: 0,
            sleeps: 0,
        }
    }

    /// Number of restart requests observed.
    pub const fn restarts(&self) -> u32 {
        self.restarts
    }

    /// Number of deep-sleep requests observed.
    pub const fn sleeps(&self) -> u32 {
        self.sleeps
    }
}

impl Default for NullPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for NullPlatform {
    fn reset_cause(&self) -> ResetCause {
        self.cause
    }

    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn delay_ms(&mut self, ms: u32) {
        self.now_ms += u64::from(ms);
    }

    fn restart(&mut self) {
        self.restarts += 1;
    }

    fn deep_sleep(&mut self) {
        self.sleeps += 1;
    }
}
