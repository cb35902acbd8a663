//! Top-level application: boot sequence and the cooperative dispatch tick.
//!
//! One tick polls, in order: the controller link (state changes), the input
//! sources (button/encoder/touch events) and the OTA listener. Every event
//! is delivered synchronously to the scene manager within the same tick;
//! nothing is queued across ticks.

use crate::config::{BRIGHTNESS_PREF_KEY, DEFAULT_BRIGHTNESS, OtaConfig};
use crate::diagnostics::{Diagnostics, boot_brightness};
use crate::events::{Event, InputSource};
use crate::link::{ControllerLink, MachineState, RealtimeCmd};
use crate::ota::{NetServices, Ota, OtaStatus};
use crate::platform::Platform;
use crate::prefs::PrefStore;
use crate::scene::{SceneContext, SceneId, SceneManager};
use crate::scenes::default_scene_set;
use crate::ui::colors::RED;
use crate::ui::screen::{Align, FontSize, Screen};

/// Collaborators the core drives. All singletons, owned by the caller and
/// only ever touched from the dispatch tick.
pub struct Services<'a> {
    pub platform: &'a mut dyn Platform,
    pub screen: &'a mut dyn Screen,
    pub prefs: &'a mut dyn PrefStore,
    pub link: &'a mut dyn ControllerLink,
    pub input: &'a mut dyn InputSource,
    pub net: &'a mut dyn NetServices,
}

/// The pendant application state.
pub struct App {
    manager: SceneManager,
    ota: Ota,
    diag: Diagnostics,
    machine: MachineState,
}

impl App {
    /// Boot the pendant.
    ///
    /// Ordering matters: the diagnostics snapshot is captured first because
    /// both the brightness clamp and the OTA subsystem branch on the reset
    /// cause; the clamp decision is recorded before the display is
    /// configured; OTA setup (the only bounded blocking step) runs before
    /// the controller is kicked and the first scene is activated.
    pub fn boot(cfg: &OtaConfig, svcs: &mut Services<'_>) -> Self {
        let mut diag = Diagnostics::capture(svcs.platform.reset_cause());

        let pref_brightness = svcs
            .prefs
            .get_i32(BRIGHTNESS_PREF_KEY)
            .unwrap_or(DEFAULT_BRIGHTNESS);
        let applied = boot_brightness(pref_brightness, diag.was_brownout());
        diag.note_brightness(pref_brightness, applied);
        svcs.screen.set_brightness(applied as u8);

        if diag.was_brownout() {
            svcs.screen
                .text("BROWNOUT (weak 5V)", 2, 2, RED, FontSize::Tiny, Align::TopLeft);
            svcs.screen.refresh();
            svcs.platform.delay_ms(500);
        }

        let mut ota = Ota::new();
        ota.setup(cfg, diag.was_brownout(), svcs.net, svcs.platform);

        // Kick the controller into reporting
        svcs.link.realtime(RealtimeCmd::StatusReport);

        let mut app = Self {
            manager: SceneManager::new(default_scene_set()),
            ota,
            diag,
            machine: MachineState::Disconnected,
        };

        {
            let App {
                manager,
                ota,
                diag,
                machine,
            } = &mut app;
            let mut ctx = SceneContext::new(
                &mut *svcs.screen,
                &mut *svcs.prefs,
                &mut *svcs.link,
                &mut *svcs.platform,
                *machine,
                ota.status(),
                diag,
            );
            manager.activate(SceneId::Menu, None, &mut ctx);
        }

        app
    }

    /// One cooperative tick: link, input, OTA.
    pub fn tick(&mut self, svcs: &mut Services<'_>) {
        while let Some(new_state) = svcs.link.poll_state() {
            if new_state == self.machine {
                continue;
            }
            let old = self.machine;
            self.machine = new_state;
            self.dispatch(Event::StateChange(old), svcs);
        }

        while let Some(event) = svcs.input.poll() {
            self.dispatch(event, svcs);
        }

        self.ota.handle(svcs.net);
    }

    /// Deliver one event to the active scene.
    fn dispatch(&mut self, event: Event, svcs: &mut Services<'_>) {
        let Self {
            manager,
            ota,
            diag,
            machine,
        } = self;
        let mut ctx = SceneContext::new(
            &mut *svcs.screen,
            &mut *svcs.prefs,
            &mut *svcs.link,
            &mut *svcs.platform,
            *machine,
            ota.status(),
            diag,
        );
        manager.dispatch(event, &mut ctx);
    }

    #[inline]
    pub fn active_scene(&self) -> SceneId {
        self.manager.active_id()
    }

    #[inline]
    pub const fn machine_state(&self) -> MachineState {
        self.machine
    }

    #[inline]
    pub const fn diagnostics(&self) -> &Diagnostics {
        &self.diag
    }

    #[inline]
    pub const fn ota_status(&self) -> &OtaStatus {
        self.ota.status()
    }
}
