//! Keyboard shortcuts for page navigation.

use super::NavigationRequest;
use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;
use calendar_logic::{FlipDirection, LOG_INPUT};
use tracing::debug;

pub(super) struct KeyboardPlugin;

impl Plugin for KeyboardPlugin {
    fn build(&self, app: &mut App) {
        app.add_input_context::<CalendarInputContext>()
            .add_systems(Startup, spawn_input_context)
            .add_observer(handle_next_page)
            .add_observer(handle_previous_page);
    }
}

/// Input context active for the whole lifetime of the calendar.
#[derive(Component, Default)]
struct CalendarInputContext;

#[derive(InputAction)]
#[action_output(bool)]
struct NextPage;

#[derive(InputAction)]
#[action_output(bool)]
struct PreviousPage;

fn spawn_input_context(mut commands: Commands) {
    commands.spawn((
        Name::new("Calendar Input Context"),
        CalendarInputContext,
        actions!(
            CalendarInputContext[
                (
                    Action::<NextPage>::new(),
                    bindings![KeyCode::ArrowRight, KeyCode::PageDown],
                ),
                (
                    Action::<PreviousPage>::new(),
                    bindings![KeyCode::ArrowLeft, KeyCode::PageUp],
                ),
            ]
        ),
    ));

    debug!(target: LOG_INPUT, "calendar keyboard bindings ready");
}

fn handle_next_page(_trigger: On<Start<NextPage>>, mut requests: MessageWriter<NavigationRequest>) {
    requests.write(NavigationRequest(FlipDirection::Forward));
}

fn handle_previous_page(
    _trigger: On<Start<PreviousPage>>,
    mut requests: MessageWriter<NavigationRequest>,
) {
    requests.write(NavigationRequest(FlipDirection::Backward));
}
