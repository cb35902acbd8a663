//! Scene abstraction and the event dispatcher.
//!
//! A scene is one selectable UI/input mode. Exactly one scene is active at a
//! time; the manager's active reference is the single source of truth for
//! "current UI mode". Scenes are constructed once at program start and never
//! destroyed; switching away runs no exit hook, so any scene-owned cleanup
//! must be re-derivable from shared state on the next entry.
//!
//! Handlers never switch scenes directly. They call
//! [`SceneContext::request_scene`] and the manager applies the transition
//! after the handler returns, which is what keeps dispatch re-entrancy safe:
//! the event being handled is never re-routed to the old scene.

use crate::diagnostics::Diagnostics;
use crate::events::Event;
use crate::link::{ControllerLink, MachineState};
use crate::ota::OtaStatus;
use crate::platform::Platform;
use crate::prefs::PrefStore;
use crate::scenes::AnyScene;
use crate::ui::screen::Screen;

/// Identifier of one scene in the fixed set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneId {
    Menu,
    About,
    Status,
}

impl SceneId {
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Menu => 0,
            Self::About => 1,
            Self::Status => 2,
        }
    }

    const fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Menu,
            1 => Self::About,
            _ => Self::Status,
        }
    }
}

/// Number of scenes in the fixed set.
pub const SCENE_COUNT: usize = 3;

/// Everything a handler may touch: collaborator interfaces, read-only status
/// views and the transition request slot.
pub struct SceneContext<'a> {
    pub screen: &'a mut dyn Screen,
    pub prefs: &'a mut dyn PrefStore,
    pub link: &'a mut dyn ControllerLink,
    pub platform: &'a mut dyn Platform,
    /// Current controller-link state. A freshly entered scene reads this
    /// instead of waiting for a change notification it may have missed.
    pub machine: MachineState,
    pub ota: &'a OtaStatus,
    pub diag: &'a Diagnostics,
    next_scene: Option<(SceneId, Option<i32>)>,
}

impl<'a> SceneContext<'a> {
    pub fn new(
        screen: &'a mut dyn Screen,
        prefs: &'a mut dyn PrefStore,
        link: &'a mut dyn ControllerLink,
        platform: &'a mut dyn Platform,
        machine: MachineState,
        ota: &'a OtaStatus,
        diag: &'a Diagnostics,
    ) -> Self {
        Self {
            screen,
            prefs,
            link,
            platform,
            machine,
            ota,
            diag,
            next_scene: None,
        }
    }

    /// Request a transition to `id`. Takes effect after the current handler
    /// returns; the last request wins.
    pub fn request_scene(&mut self, id: SceneId) {
        self.next_scene = Some((id, None));
    }

    /// Request a transition with an entry argument.
    pub fn request_scene_with(&mut self, id: SceneId, arg: i32) {
        self.next_scene = Some((id, Some(arg)));
    }

    pub(crate) fn take_requested(&mut self) -> Option<(SceneId, Option<i32>)> {
        self.next_scene.take()
    }
}

/// Lifecycle and input handlers of one scene.
///
/// Every handler has an empty default body, so an event category a scene
/// does not care about silently no-ops.
pub trait Scene {
    /// Stable name, used as the UI title and in diagnostics.
    fn name(&self) -> &'static str;

    /// Entered: the scene was just activated. `arg` carries the optional
    /// value passed along with the transition request.
    fn on_entry(&mut self, _ctx: &mut SceneContext<'_>, _arg: Option<i32>) {}

    fn on_dial_button(&mut self, _ctx: &mut SceneContext<'_>) {}
    fn on_green_button(&mut self, _ctx: &mut SceneContext<'_>) {}
    fn on_red_button(&mut self, _ctx: &mut SceneContext<'_>) {}
    fn on_touch_click(&mut self, _ctx: &mut SceneContext<'_>) {}
    fn on_encoder(&mut self, _ctx: &mut SceneContext<'_>, _delta: i32) {}
    fn on_state_change(&mut self, _ctx: &mut SceneContext<'_>, _old: MachineState) {}
}

/// Owns the fixed scene set and routes events to the active one.
pub struct SceneManager {
    scenes: [AnyScene; SCENE_COUNT],
    active: usize,
}

impl SceneManager {
    pub fn new(scenes: [AnyScene; SCENE_COUNT]) -> Self {
        Self { scenes, active: 0 }
    }

    /// Identifier of the active scene.
    pub fn active_id(&self) -> SceneId {
        SceneId::from_index(self.active)
    }

    /// Name of the active scene.
    pub fn active_name(&self) -> &'static str {
        self.scenes[self.active].as_dyn().name()
    }

    /// Make `id` the active scene and run its entry handler. The entry
    /// handler may itself request a further transition.
    pub fn activate(&mut self, id: SceneId, arg: Option<i32>, ctx: &mut SceneContext<'_>) {
        self.active = id.index();
        self.scenes[self.active].as_dyn_mut().on_entry(ctx, arg);
        self.apply_requested(ctx);
    }

    /// Route one event to the active scene's matching handler, then apply
    /// any transition the handler requested.
    pub fn dispatch(&mut self, event: Event, ctx: &mut SceneContext<'_>) {
        let scene = self.scenes[self.active].as_dyn_mut();
        match event {
            Event::DialButton => scene.on_dial_button(ctx),
            Event::GreenButton => scene.on_green_button(ctx),
            Event::RedButton => scene.on_red_button(ctx),
            Event::TouchClick => scene.on_touch_click(ctx),
            Event::Encoder(delta) => scene.on_encoder(ctx, delta),
            Event::StateChange(old) => scene.on_state_change(ctx, old),
        }
        self.apply_requested(ctx);
    }

    /// Apply pending transitions. Entry handlers may chain; the fixed scene
    /// set keeps the chain finite in practice.
    fn apply_requested(&mut self, ctx: &mut SceneContext<'_>) {
        while let Some((id, arg)) = ctx.take_requested() {
            self.active = id.index();
            self.scenes[self.active].as_dyn_mut().on_entry(ctx, arg);
        }
    }
}
