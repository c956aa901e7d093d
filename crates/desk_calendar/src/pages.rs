mod loading;
mod spawn;
mod sync;

use crate::CalendarState;
use bevy::prelude::*;
use calendar_logic::{CalendarWidget, NavigationState};

pub use spawn::{PageFace, PagePivot, PagesRoot};

/// Loads the page images, builds the page entities and animates them.
pub struct PagesPlugin;

impl Plugin for PagesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NavigationStatus>()
            .configure_sets(
                Update,
                (CalendarSet::Input, CalendarSet::Animate)
                    .chain()
                    .run_if(in_state(CalendarState::Ready)),
            )
            .add_plugins((loading::LoadingPlugin, spawn::SpawnPlugin))
            .add_systems(Update, sync::drive_calendar.in_set(CalendarSet::Animate));
    }
}

/// Per-frame ordering: navigation requests are applied before the widget
/// ticks, so a flip starts animating in the frame it was requested.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarSet {
    Input,
    Animate,
}

/// The calendar aggregate, available once all page images have settled.
#[derive(Resource, Deref, DerefMut)]
pub struct CalendarWidgetResource(pub CalendarWidget);

/// Enabled state of the navigation controls as last reported by the widget.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationStatus(pub NavigationState);

impl Default for NavigationStatus {
    /// Nothing to navigate before the pages exist.
    fn default() -> Self {
        Self(NavigationState {
            previous_enabled: false,
            next_enabled: false,
        })
    }
}
