//! Pendant library - testable modules for the CNC dial pendant.
//!
//! This library contains the core logic that can be tested on the host machine:
//! the scene/event dispatch core, the OTA status subsystem, the boot diagnostics
//! snapshot and the collaborator traits the hardware plugs into. The binary
//! (`main.rs`) uses this library and adds the ESP32-C3-specific code.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the actual firmware runs as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// === Pure logic modules (testable on host, no HAL dependencies) ===

// Configuration
pub mod config;

// Collaborator interfaces and boot state
pub mod diagnostics;
pub mod events;
pub mod link;
pub mod platform;
pub mod prefs;

// Input helpers
pub mod button;
pub mod encoder;

// Scene/event dispatch core
pub mod scene;
pub mod scenes;

// OTA status subsystem
pub mod ota;

// Top-level application (boot sequence + cooperative tick)
pub mod app;

// Rendering interface and palette
pub mod ui;

// Shared test doubles (host tests only)
#[cfg(test)]
pub(crate) mod testutil;
