//! About scene: firmware info, diagnostics and brightness adjustment.
//!
//! The informational scene. Reads the diagnostics snapshot and the OTA
//! status record on every redraw and renders only the lines that have
//! something to say. The encoder adjusts the persisted display brightness.

use core::fmt::Write as _;

use heapless::String;

use crate::config::{
    BRIGHTNESS_PREF_KEY, DEFAULT_BRIGHTNESS, MAX_BRIGHTNESS, MIN_BRIGHTNESS, TITLE_Y, VERSION,
};
use crate::link::{MachineState, RealtimeCmd};
use crate::scene::{Scene, SceneContext, SceneId};
use crate::ui::colors::{GREEN, LIGHT_GRAY, RED, WHITE};
use crate::ui::screen::{Align, FontSize};

/// Anchor X for key/value rows: keys right-aligned here, values left-aligned
/// just after.
const KEY_X: i32 = 118;
const VAL_X: i32 = 122;
const Y_SPACING: i32 = 20;
const FIRST_ROW_Y: i32 = 72;

pub struct AboutScene {
    /// In-memory brightness, authoritative when the preference store is
    /// unavailable.
    brightness: i32,
}

impl AboutScene {
    pub const fn new() -> Self {
        Self {
            brightness: DEFAULT_BRIGHTNESS,
        }
    }

    /// Current brightness value (for the boot sequence and tests).
    pub const fn brightness(&self) -> i32 {
        self.brightness
    }

    fn load_brightness(&mut self, ctx: &mut SceneContext<'_>) {
        if let Some(value) = ctx.prefs.get_i32(BRIGHTNESS_PREF_KEY) {
            self.brightness = value;
        }
    }

    fn request_reports(ctx: &mut SceneContext<'_>) {
        ctx.link.send_line("$G");
        ctx.link.send_line("$I");
    }

    fn redraw(&self, ctx: &mut SceneContext<'_>) {
        ctx.screen.clear();
        ctx.screen.centered_text(self.name(), TITLE_Y, WHITE, FontSize::Small);

        let mut y = FIRST_ROW_Y;

        let mut line: String<48> = String::new();
        let _ = write!(line, "Ver {VERSION}");
        ctx.screen.centered_text(&line, y, LIGHT_GRAY, FontSize::Tiny);

        y += Y_SPACING;
        ctx.screen
            .text("Brightness:", KEY_X, y, LIGHT_GRAY, FontSize::Tiny, Align::BottomRight);
        line.clear();
        let _ = write!(line, "{}", self.brightness);
        ctx.screen
            .text(&line, VAL_X, y, GREEN, FontSize::Tiny, Align::BottomLeft);

        // OTA lines: only what is non-empty
        if !ctx.ota.status.is_empty() {
            y += Y_SPACING;
            line.clear();
            let _ = write!(line, "OTA {}", ctx.ota.status);
            ctx.screen.centered_text(&line, y, LIGHT_GRAY, FontSize::Tiny);
        }
        if !ctx.ota.hostname.is_empty() {
            y += Y_SPACING;
            line.clear();
            let _ = write!(line, "OTA host {}", ctx.ota.hostname);
            ctx.screen.centered_text(&line, y, LIGHT_GRAY, FontSize::Tiny);
        }
        if !ctx.ota.ip.is_empty() {
            y += Y_SPACING;
            line.clear();
            let _ = write!(line, "OTA IP {}", ctx.ota.ip);
            ctx.screen.centered_text(&line, y, LIGHT_GRAY, FontSize::Tiny);
        }
        if !ctx.ota.last_error.is_empty() {
            y += Y_SPACING;
            ctx.screen
                .centered_text(&ctx.ota.last_error, y, RED, FontSize::Tiny);
        }

        // Boot/reset diagnostics
        y += Y_SPACING;
        line.clear();
        let _ = write!(line, "Reset {}", ctx.diag.reset_reason_str());
        let reset_color = if ctx.diag.was_brownout() { RED } else { LIGHT_GRAY };
        ctx.screen.centered_text(&line, y, reset_color, FontSize::Tiny);

        if ctx.diag.brightness_was_clamped() {
            y += Y_SPACING;
            line.clear();
            let _ = write!(
                line,
                "Brightness clamped {}->{}",
                ctx.diag.pref_brightness(),
                ctx.diag.applied_brightness()
            );
            ctx.screen.centered_text(&line, y, RED, FontSize::Tiny);
        }

        ctx.screen.refresh();
    }
}

impl Default for AboutScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for AboutScene {
    fn name(&self) -> &'static str {
        "About"
    }

    fn on_entry(&mut self, ctx: &mut SceneContext<'_>, _arg: Option<i32>) {
        self.load_brightness(ctx);

        if ctx.machine != MachineState::Disconnected {
            Self::request_reports(ctx);
        }

        self.redraw(ctx);
    }

    fn on_dial_button(&mut self, ctx: &mut SceneContext<'_>) {
        ctx.request_scene(SceneId::Menu);
    }

    fn on_green_button(&mut self, ctx: &mut SceneContext<'_>) {
        ctx.platform.restart();
    }

    fn on_red_button(&mut self, ctx: &mut SceneContext<'_>) {
        ctx.screen
            .centered_text("Red button wakes the dial", 118, RED, FontSize::Tiny);
        ctx.screen.refresh();
        ctx.platform.delay_ms(2000);
        ctx.platform.deep_sleep();
    }

    fn on_touch_click(&mut self, ctx: &mut SceneContext<'_>) {
        ctx.link.realtime(RealtimeCmd::StatusReport);
        if ctx.machine == MachineState::Idle {
            Self::request_reports(ctx);
        }
    }

    fn on_encoder(&mut self, ctx: &mut SceneContext<'_>, delta: i32) {
        let next = (self.brightness + delta).clamp(MIN_BRIGHTNESS, MAX_BRIGHTNESS);
        if next != self.brightness {
            self.brightness = next;
            ctx.screen.set_brightness(next as u8);
            // Best effort; the in-memory value stays authoritative on failure
            let _ = ctx.prefs.set_i32(BRIGHTNESS_PREF_KEY, next);
        }
        self.redraw(ctx);
    }

    fn on_state_change(&mut self, ctx: &mut SceneContext<'_>, _old: MachineState) {
        self.redraw(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BRIGHTNESS_PREF_KEY;
    use crate::diagnostics::Diagnostics;
    use crate::ota::Ota;
    use crate::platform::{NullPlatform, ResetCause};
    use crate::prefs::{PrefStore as _, RamPrefs};
    use crate::testutil::{FakeLink, RecordingScreen};

    struct Harness {
        screen: RecordingScreen,
        prefs: RamPrefs,
        link: FakeLink,
        platform: NullPlatform,
        ota: Ota,
        diag: Diagnostics,
        machine: MachineState,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                screen: RecordingScreen::new(),
                prefs: RamPrefs::new(),
                link: FakeLink::new(),
                platform: NullPlatform::new(),
                ota: Ota::new(),
                diag: Diagnostics::capture(ResetCause::PowerOn),
                machine: MachineState::Idle,
            }
        }

        fn ctx(&mut self) -> SceneContext<'_> {
            SceneContext::new(
                &mut self.screen,
                &mut self.prefs,
                &mut self.link,
                &mut self.platform,
                self.machine,
                self.ota.status(),
                &self.diag,
            )
        }
    }

    #[test]
    fn entry_loads_persisted_brightness() {
        let mut h = Harness::new();
        h.prefs.set_i32(BRIGHTNESS_PREF_KEY, 100).unwrap();
        let mut scene = AboutScene::new();
        let mut ctx = h.ctx();
        scene.on_entry(&mut ctx, None);
        assert_eq!(scene.brightness(), 100);
    }

    #[test]
    fn entry_without_stored_pref_keeps_in_memory_value() {
        let mut h = Harness::new();
        let mut scene = AboutScene::new();
        let mut ctx = h.ctx();
        scene.on_entry(&mut ctx, None);
        assert_eq!(scene.brightness(), DEFAULT_BRIGHTNESS);
    }

    #[test]
    fn encoder_up_saturates_at_max() {
        let mut h = Harness::new();
        h.prefs.set_i32(BRIGHTNESS_PREF_KEY, 250).unwrap();
        let mut scene = AboutScene::new();
        let mut ctx = h.ctx();
        scene.on_entry(&mut ctx, None);
        for _ in 0..300 {
            let mut ctx = h.ctx();
            scene.on_encoder(&mut ctx, 1);
        }
        assert_eq!(scene.brightness(), MAX_BRIGHTNESS);
        assert_eq!(h.prefs.get_i32(BRIGHTNESS_PREF_KEY), Some(MAX_BRIGHTNESS));
    }

    #[test]
    fn encoder_down_saturates_at_min() {
        let mut h = Harness::new();
        let mut scene = AboutScene::new();
        for _ in 0..300 {
            let mut ctx = h.ctx();
            scene.on_encoder(&mut ctx, -1);
        }
        assert_eq!(scene.brightness(), MIN_BRIGHTNESS);
        assert_eq!(h.prefs.get_i32(BRIGHTNESS_PREF_KEY), Some(MIN_BRIGHTNESS));
        // The panel saw the final value
        assert_eq!(h.screen.brightness_calls.last(), Some(&(MIN_BRIGHTNESS as u8)));
    }

    #[test]
    fn encoder_applies_multi_detent_delta() {
        let mut h = Harness::new();
        let mut scene = AboutScene::new();
        let mut ctx = h.ctx();
        scene.on_encoder(&mut ctx, -10);
        assert_eq!(scene.brightness(), DEFAULT_BRIGHTNESS - 10);
    }

    #[test]
    fn touch_click_requests_status_report() {
        let mut h = Harness::new();
        let mut scene = AboutScene::new();
        let mut ctx = h.ctx();
        scene.on_touch_click(&mut ctx);
        assert_eq!(h.link.realtime_cmds, vec![RealtimeCmd::StatusReport]);
        // Idle: also asks for the parser/build-info reports
        assert_eq!(h.link.sent_lines, vec!["$G", "$I"]);
    }

    #[test]
    fn touch_click_when_busy_skips_report_lines() {
        let mut h = Harness::new();
        h.machine = MachineState::Run;
        let mut scene = AboutScene::new();
        let mut ctx = h.ctx();
        scene.on_touch_click(&mut ctx);
        assert_eq!(h.link.realtime_cmds, vec![RealtimeCmd::StatusReport]);
        assert!(h.link.sent_lines.is_empty());
    }

    #[test]
    fn green_button_restarts() {
        let mut h = Harness::new();
        let mut scene = AboutScene::new();
        let mut ctx = h.ctx();
        scene.on_green_button(&mut ctx);
        assert_eq!(h.platform.restarts(), 1);
    }

    #[test]
    fn red_button_sleeps() {
        let mut h = Harness::new();
        let mut scene = AboutScene::new();
        let mut ctx = h.ctx();
        scene.on_red_button(&mut ctx);
        assert_eq!(h.platform.sleeps(), 1);
    }

    #[test]
    fn redraw_shows_clamp_warning_in_red() {
        let mut h = Harness::new();
        h.diag = Diagnostics::capture(ResetCause::Brownout);
        h.diag.note_brightness(255, 32);
        let mut scene = AboutScene::new();
        let mut ctx = h.ctx();
        scene.on_entry(&mut ctx, None);
        assert!(h.screen.has_line_containing("Reset brownout", RED));
        assert!(h.screen.has_line_containing("Brightness clamped 255->32", RED));
    }

    #[test]
    fn redraw_skips_empty_ota_lines() {
        let mut h = Harness::new();
        let mut scene = AboutScene::new();
        let mut ctx = h.ctx();
        scene.on_entry(&mut ctx, None);
        assert!(!h.screen.any_line_contains("OTA host"));
        assert!(!h.screen.any_line_contains("OTA IP"));
    }
}
