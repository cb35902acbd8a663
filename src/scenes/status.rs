//! Status scene: live controller-link state.
//!
//! Shows the machine state in its state color and refreshes whenever the
//! link reports a change. A tap asks the controller for a fresh report.

use crate::config::{CENTER_Y, TITLE_Y};
use crate::link::{MachineState, RealtimeCmd};
use crate::scene::{Scene, SceneContext, SceneId};
use crate::ui::colors::{LIGHT_GRAY, WHITE};
use crate::ui::screen::FontSize;

const HINT_Y: i32 = 206;

pub struct StatusScene;

impl StatusScene {
    pub const fn new() -> Self {
        Self
    }

    fn redraw(&self, ctx: &mut SceneContext<'_>) {
        ctx.screen.clear();
        ctx.screen.centered_text(self.name(), TITLE_Y, WHITE, FontSize::Small);
        ctx.screen
            .centered_text(ctx.machine.as_str(), CENTER_Y, ctx.machine.color(), FontSize::Large);
        if ctx.machine == MachineState::Disconnected {
            ctx.screen
                .centered_text("tap to retry", HINT_Y, LIGHT_GRAY, FontSize::Tiny);
        }
        ctx.screen.refresh();
    }
}

impl Default for StatusScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for StatusScene {
    fn name(&self) -> &'static str {
        "Status"
    }

    fn on_entry(&mut self, ctx: &mut SceneContext<'_>, _arg: Option<i32>) {
        ctx.link.realtime(RealtimeCmd::StatusReport);
        self.redraw(ctx);
    }

    fn on_dial_button(&mut self, ctx: &mut SceneContext<'_>) {
        ctx.request_scene(SceneId::Menu);
    }

    fn on_touch_click(&mut self, ctx: &mut SceneContext<'_>) {
        ctx.link.realtime(RealtimeCmd::StatusReport);
    }

    fn on_state_change(&mut self, ctx: &mut SceneContext<'_>, _old: MachineState) {
        self.redraw(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;
    use crate::ota::Ota;
    use crate::platform::{NullPlatform, ResetCause};
    use crate::prefs::RamPrefs;
    use crate::testutil::{FakeLink, RecordingScreen};
    use crate::ui::colors::RED;

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
        fn new(machine: MachineState) -> Self {
            Self {
                screen: RecordingScreen::new(),
                prefs: RamPrefs::new(),
                link: FakeLink::new(),
                platform: NullPlatform::new(),
                ota: Ota::new(),
                diag: Diagnostics::capture(ResetCause::PowerOn),
                machine,
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
    fn entry_requests_a_report_and_draws_the_state() {
        let mut h = Harness::new(MachineState::Alarm);
        let mut scene = StatusScene::new();
        let mut ctx = h.ctx();
        scene.on_entry(&mut ctx, None);
        assert_eq!(h.link.realtime_cmds, vec![RealtimeCmd::StatusReport]);
        assert!(h.screen.has_line_containing("Alarm", RED));
    }

    #[test]
    fn disconnected_shows_retry_hint() {
        let mut h = Harness::new(MachineState::Disconnected);
        let mut scene = StatusScene::new();
        let mut ctx = h.ctx();
        scene.on_entry(&mut ctx, None);
        assert!(h.screen.any_line_contains("tap to retry"));
    }

    #[test]
    fn dial_button_returns_to_menu() {
        let mut h = Harness::new(MachineState::Idle);
        let mut scene = StatusScene::new();
        let mut ctx = h.ctx();
        scene.on_dial_button(&mut ctx);
        assert_eq!(ctx.take_requested(), Some((SceneId::Menu, None)));
    }
}
