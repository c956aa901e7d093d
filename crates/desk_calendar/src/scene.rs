mod camera;
mod lighting;
mod stand;

use bevy::prelude::*;

pub use camera::CalendarCameraPlugin;
pub use lighting::LightingPlugin;
pub use stand::StandPlugin;

/// Everything around the pages: light, camera, stand and floor.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((LightingPlugin, CalendarCameraPlugin, StandPlugin));
    }
}
