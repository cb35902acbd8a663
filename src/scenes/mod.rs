//! Concrete scenes.
//!
//! The scene set is closed and statically known; [`AnyScene`] is the tagged
//! union the manager stores, with the [`Scene`] trait providing the uniform
//! handler surface.

mod about;
mod menu;
mod status;

pub use about::AboutScene;
pub use menu::MenuScene;
pub use status::StatusScene;

use crate::scene::{Scene, SCENE_COUNT};

/// One slot in the manager's fixed scene array.
pub enum AnyScene {
    Menu(MenuScene),
    About(AboutScene),
    Status(StatusScene),
}

impl AnyScene {
    pub fn as_dyn(&self) -> &dyn Scene {
        match self {
            Self::Menu(s) => s,
            Self::About(s) => s,
            Self::Status(s) => s,
        }
    }

    pub fn as_dyn_mut(&mut self) -> &mut dyn Scene {
        match self {
            Self::Menu(s) => s,
            Self::About(s) => s,
            Self::Status(s) => s,
        }
    }
}

/// The pendant's scene set, ordered by [`crate::scene::SceneId`] index.
pub fn default_scene_set() -> [AnyScene; SCENE_COUNT] {
    [
        AnyScene::Menu(MenuScene::new()),
        AnyScene::About(AboutScene::new()),
        AnyScene::Status(StatusScene::new()),
    ]
}
