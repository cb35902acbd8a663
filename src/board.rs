//! Hardware wiring for the ESP32-C3 dial: platform services, panel,
//! backlight, input pins and the controller UART.

use esp_hal::Blocking;
use esp_hal::delay::Delay;
use esp_hal::gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull};
use esp_hal::ledc::channel::{self, ChannelIFace};
use esp_hal::ledc::timer::{self, TimerIFace};
use esp_hal::ledc::{LSGlobalClkSource, Ledc, LowSpeed};
use esp_hal::peripherals::Peripherals;
use esp_hal::rtc_cntl::{Rtc, SocResetReason, reset_reason};
use esp_hal::spi::Mode;
use esp_hal::spi::master::{Config as SpiConfig, Spi};
use esp_hal::system::Cpu;
use esp_hal::time::{Instant, Rate};
use esp_hal::uart::{Config as UartConfig, Uart};
use esp_println::println;

use dial_pendant::button::ButtonState;
use dial_pendant::encoder::QuadratureDecoder;
use dial_pendant::events::{Event, InputSource};
use dial_pendant::link::{ControllerLink, MachineState, RealtimeCmd};
use dial_pendant::platform::{Platform, ResetCause};
use dial_pendant::ui::graphics::{Backlight, GraphicsScreen};

use crate::flash_prefs::FlashPrefs;
use crate::gc9a01::Gc9a01;
use crate::wifi::EspNet;

const FNC_BAUD: u32 = 115_200;

// =============================================================================
// Platform services
// =============================================================================

pub struct EspPlatform {
    delay: Delay,
    rtc: Rtc<'static>,
    cause: ResetCause,
}

impl EspPlatform {
    fn map_reset_reason(reason: Option<SocResetReason>) -> ResetCause {
        match reason {
            Some(SocResetReason::ChipPowerOn) => ResetCause::PowerOn,
            Some(SocResetReason::CoreSw) => ResetCause::Software,
            Some(SocResetReason::CoreDeepSleep) => ResetCause::DeepSleep,
            Some(SocResetReason::SysBrownOut) => ResetCause::Brownout,
            Some(SocResetReason::SysRtcWdt) | Some(SocResetReason::CoreRtcWdt) => {
                ResetCause::Watchdog
            }
            Some(SocResetReason::CoreMwdt0) | Some(SocResetReason::CoreMwdt1) => {
                ResetCause::TaskWatchdog
            }
            _ => ResetCause::Unknown,
        }
    }
}

impl Platform for EspPlatform {
    fn reset_cause(&self) -> ResetCause {
        self.cause
    }

    fn now_ms(&self) -> u64 {
        Instant::now().duration_since_epoch().as_millis()
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_millis(ms);
    }

    fn restart(&mut self) {
        esp_hal::system::software_reset();
    }

    fn deep_sleep(&mut self) {
        // Wake source is the dial button, configured by the bootloader strap;
        // no timer wakeup.
        self.rtc.sleep_deep(&[]);
    }
}

// =============================================================================
// Backlight (LEDC PWM)
// =============================================================================

pub struct PwmBacklight {
    channel: channel::Channel<'static, LowSpeed>,
}

impl Backlight for PwmBacklight {
    fn set_level(&mut self, level: u8) {
        // 8-bit duty resolution: the level maps 1:1
        let percent = (u32::from(level) * 100 / 255) as u8;
        let _ = self.channel.set_duty(percent);
    }
}

// =============================================================================
// Controller UART link
// =============================================================================

pub struct UartLink {
    uart: Uart<'static, Blocking>,
    line: heapless::Vec<u8, 128>,
    in_report: bool,
}

impl UartLink {
    fn new(uart: Uart<'static, Blocking>) -> Self {
        Self {
            uart,
            line: heapless::Vec::new(),
            in_report: false,
        }
    }

    /// Map the state token of a `<State|...>` report.
    fn parse_state(token: &[u8]) -> Option<MachineState> {
        match token {
            b"Idle" => Some(MachineState::Idle),
            b"Run" => Some(MachineState::Run),
            b"Hold" => Some(MachineState::Hold),
            b"Jog" => Some(MachineState::Jog),
            b"Alarm" => Some(MachineState::Alarm),
            _ => None,
        }
    }
}

impl ControllerLink for UartLink {
    fn poll_state(&mut self) -> Option<MachineState> {
        let mut byte = [0u8; 1];
        while self.uart.read_buffered(&mut byte).unwrap_or(0) == 1 {
            match byte[0] {
                b'<' => {
                    self.in_report = true;
                    self.line.clear();
                }
                b'|' | b'>' if self.in_report => {
                    self.in_report = false;
                    return Self::parse_state(&self.line);
                }
                b if self.in_report => {
                    if self.line.push(b).is_err() {
                        // Oversized report: drop it
                        self.in_report = false;
                    }
                }
                _ => {}
            }
        }
        None
    }

    fn send_line(&mut self, line: &str) {
        let _ = self.uart.write(line.as_bytes());
        let _ = self.uart.write(b"\n");
    }

    fn realtime(&mut self, cmd: RealtimeCmd) {
        let _ = self.uart.write(&[cmd.as_byte()]);
    }
}

// =============================================================================
// Input pins (buttons, encoder, touch tap line)
// =============================================================================

pub struct DialInput {
    dial_btn: Input<'static>,
    green_btn: Input<'static>,
    red_btn: Input<'static>,
    touch_int: Input<'static>,
    encoder_a: Input<'static>,
    encoder_b: Input<'static>,
    dial_state: ButtonState,
    green_state: ButtonState,
    red_state: ButtonState,
    touch_state: ButtonState,
    decoder: QuadratureDecoder,
}

impl DialInput {
    fn now_ms() -> u64 {
        Instant::now().duration_since_epoch().as_millis()
    }
}

impl InputSource for DialInput {
    fn poll(&mut self) -> Option<Event> {
        let now = Self::now_ms();

        if self.dial_state.just_pressed(self.dial_btn.is_low(), now) {
            return Some(Event::DialButton);
        }
        if self.green_state.just_pressed(self.green_btn.is_low(), now) {
            return Some(Event::GreenButton);
        }
        if self.red_state.just_pressed(self.red_btn.is_low(), now) {
            return Some(Event::RedButton);
        }
        if self.touch_state.just_pressed(self.touch_int.is_low(), now) {
            return Some(Event::TouchClick);
        }

        let delta = self
            .decoder
            .update(self.encoder_a.is_high(), self.encoder_b.is_high());
        if delta != 0 {
            return Some(Event::Encoder(delta));
        }

        None
    }
}

// =============================================================================
// Board assembly
// =============================================================================

pub struct Board {
    pub platform: EspPlatform,
    pub screen: GraphicsScreen<Gc9a01<'static>, PwmBacklight>,
    pub prefs: FlashPrefs,
    pub link: UartLink,
    pub input: DialInput,
    pub net: EspNet,
}

impl Board {
    pub fn init(peripherals: Peripherals) -> Self {
        let cause = EspPlatform::map_reset_reason(reset_reason(Cpu::ProCpu));
        println!("reset reason: {}", cause.as_str());

        let mut delay = Delay::new();
        let rtc = Rtc::new(peripherals.LPWR);

        // Panel SPI
        let spi = Spi::new(
            peripherals.SPI2,
            SpiConfig::default()
                .with_frequency(Rate::from_mhz(40))
                .with_mode(Mode::_0),
        )
        .expect("SPI init")
        .with_sck(peripherals.GPIO6)
        .with_mosi(peripherals.GPIO5);
        let dc = Output::new(peripherals.GPIO4, Level::High, OutputConfig::default());
        let rst = Output::new(peripherals.GPIO8, Level::High, OutputConfig::default());
        let panel = Gc9a01::new(spi, dc, rst, &mut delay);

        // Backlight PWM
        let mut ledc = Ledc::new(peripherals.LEDC);
        ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);
        let mut lstimer = ledc.timer::<LowSpeed>(timer::Number::Timer0);
        lstimer
            .configure(timer::config::Config {
                duty: timer::config::Duty::Duty8Bit,
                clock_source: timer::LSClockSource::APBClk,
                frequency: Rate::from_khz(5),
            })
            .expect("LEDC timer");
        let lstimer = {
            static TIMER: static_cell::StaticCell<timer::Timer<'static, LowSpeed>> =
                static_cell::StaticCell::new();
            TIMER.init(lstimer)
        };
        let mut channel0 = ledc.channel(channel::Number::Channel0, peripherals.GPIO9);
        channel0
            .configure(channel::config::Config {
                timer: lstimer,
                duty_pct: 100,
                pin_config: channel::config::PinConfig::PushPull,
            })
            .expect("LEDC channel");
        let backlight = PwmBacklight { channel: channel0 };

        // Controller UART
        let uart = Uart::new(
            peripherals.UART1,
            UartConfig::default().with_baudrate(FNC_BAUD),
        )
        .expect("UART init")
        .with_tx(peripherals.GPIO21)
        .with_rx(peripherals.GPIO20);

        // Input pins
        let pull_up = InputConfig::default().with_pull(Pull::Up);
        let input = DialInput {
            dial_btn: Input::new(peripherals.GPIO0, pull_up),
            green_btn: Input::new(peripherals.GPIO1, pull_up),
            red_btn: Input::new(peripherals.GPIO2, pull_up),
            touch_int: Input::new(peripherals.GPIO3, pull_up),
            encoder_a: Input::new(peripherals.GPIO10, pull_up),
            encoder_b: Input::new(peripherals.GPIO7, pull_up),
            dial_state: ButtonState::new(),
            green_state: ButtonState::new(),
            red_state: ButtonState::new(),
            touch_state: ButtonState::new(),
            decoder: QuadratureDecoder::new(),
        };

        let net = EspNet::init(
            peripherals.TIMG0,
            peripherals.RNG,
            peripherals.WIFI,
        );

        Self {
            platform: EspPlatform { delay, rtc, cause },
            screen: GraphicsScreen::new(panel, backlight),
            prefs: FlashPrefs::new(),
            link: UartLink::new(uart),
            input,
            net,
        }
    }
}
