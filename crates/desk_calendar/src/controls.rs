//! Navigation input: on-screen buttons and keyboard shortcuts both funnel into
//! [`NavigationRequest`] messages that are applied to the calendar widget.

mod buttons;
mod keyboard;

use crate::pages::{CalendarSet, CalendarWidgetResource};
use bevy::prelude::*;
use calendar_logic::{FlipDirection, LOG_INPUT};
use tracing::{debug, info};

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<NavigationRequest>()
            .add_plugins((buttons::ButtonsPlugin, keyboard::KeyboardPlugin))
            .add_systems(
                Update,
                handle_navigation_requests.in_set(CalendarSet::Input),
            );
    }
}

/// Ask the calendar to flip one page.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationRequest(pub FlipDirection);

fn handle_navigation_requests(
    time: Res<Time>,
    mut requests: MessageReader<NavigationRequest>,
    mut widget: ResMut<CalendarWidgetResource>,
) {
    let now = time.elapsed();
    for NavigationRequest(direction) in requests.read() {
        let accepted = match direction {
            FlipDirection::Forward => widget.request_next(now),
            FlipDirection::Backward => widget.request_previous(now),
        };

        if accepted {
            info!(
                target: LOG_INPUT,
                "flipping {direction:?} from page {}",
                widget.current_page()
            );
        } else {
            debug!(target: LOG_INPUT, "ignored {direction:?} navigation request");
        }
    }
}
