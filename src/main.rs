//! CNC dial pendant firmware for the ESP32-C3 rotary-dial hardware.
//!
//! # Architecture
//!
//! All behavior lives in the `dial_pendant` library; this binary only wires
//! the hardware into the library's collaborator traits:
//! - `board`: platform services, panel driver, input pins, UART link
//! - `wifi`: WiFi association and the TCP update listener
//! - `flash_prefs`: flash-backed preference record
//!
//! The main loop is a single cooperative tick: controller link, input
//! events, OTA handler.

#![no_std]
#![no_main]

// Modules only used in the binary (not testable on host)
mod board;
mod flash_prefs;
mod gc9a01;
mod wifi;

use esp_hal::clock::CpuClock;
use esp_println::println;

use dial_pendant::app::{App, Services};
use dial_pendant::config::{OtaConfig, VERSION};

esp_bootloader_esp_idf::esp_app_desc!();

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    println!("panic: {}", info);
    loop {}
}

#[esp_hal::main]
fn main() -> ! {
    let peripherals = esp_hal::init(esp_hal::Config::default().with_cpu_clock(CpuClock::max()));

    // esp-wifi allocates internally
    esp_alloc::heap_allocator!(size: 96 * 1024);

    println!("pendant {} booting", VERSION);

    let cfg = OtaConfig::from_build_env();
    let mut board = board::Board::init(peripherals);

    let mut app = App::boot(
        &cfg,
        &mut Services {
            platform: &mut board.platform,
            screen: &mut board.screen,
            prefs: &mut board.prefs,
            link: &mut board.link,
            input: &mut board.input,
            net: &mut board.net,
        },
    );

    loop {
        app.tick(&mut Services {
            platform: &mut board.platform,
            screen: &mut board.screen,
            prefs: &mut board.prefs,
            link: &mut board.link,
            input: &mut board.input,
            net: &mut board.net,
        });
    }
}
