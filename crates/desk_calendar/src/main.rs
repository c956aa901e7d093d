mod app;
mod calendar_app;
mod controls;
mod pages;
mod scene;
mod utils;

use crate::calendar_app::DeskCalendarApp;
use crate::controls::ControlsPlugin;
use crate::pages::PagesPlugin;
use crate::scene::ScenePlugin;

use ::app::{AppBuilder, BoxError};
use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

/// Where the calendar is in its lifecycle.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CalendarState {
    /// Page images are loading; the stand is already visible.
    #[default]
    Loading,
    /// Pages exist and react to navigation.
    Ready,
}

fn main() -> Result<(), BoxError> {
    let mut calendar = AppBuilder::<DeskCalendarApp>::new(env!("CARGO_PKG_VERSION"))?
        .build_with_bevy(app::configure)?;

    calendar
        .app_mut()
        .init_state::<CalendarState>()
        .add_plugins((EnhancedInputPlugin, ScenePlugin, PagesPlugin, ControlsPlugin));

    calendar.run();
    Ok(())
}
