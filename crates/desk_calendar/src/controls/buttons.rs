//! Previous / Next buttons below the calendar.

use super::NavigationRequest;
use crate::pages::NavigationStatus;
use bevy::prelude::*;
use calendar_logic::{FlipDirection, NavigationState};

pub(super) struct ButtonsPlugin;

impl Plugin for ButtonsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_buttons).add_systems(
            Update,
            (
                handle_button_interactions,
                apply_navigation_state.run_if(resource_changed::<NavigationStatus>),
            ),
        );
    }
}

pub const NORMAL_BUTTON: Color = Color::srgb(0.15, 0.15, 0.15);
pub const HOVERED_BUTTON: Color = Color::srgb(0.25, 0.25, 0.25);
pub const PRESSED_BUTTON: Color = Color::srgb(0.35, 0.35, 0.35);
pub const DISABLED_BUTTON: Color = Color::srgba(0.15, 0.15, 0.15, 0.4);

const LABEL_COLOR: Color = Color::srgb(0.9, 0.9, 0.9);
const DISABLED_LABEL_COLOR: Color = Color::srgba(0.9, 0.9, 0.9, 0.4);

#[derive(Component)]
struct NavigationBar;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct NavButton {
    direction: FlipDirection,
    enabled: bool,
}

impl NavButton {
    fn label(&self) -> &'static str {
        match self.direction {
            FlipDirection::Forward => "Next",
            FlipDirection::Backward => "Previous",
        }
    }

    fn enabled_in(&self, state: &NavigationState) -> bool {
        match self.direction {
            FlipDirection::Forward => state.next_enabled,
            FlipDirection::Backward => state.previous_enabled,
        }
    }
}

fn spawn_buttons(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(24.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                column_gap: Val::Px(16.0),
                ..default()
            },
            NavigationBar,
            Name::new("Navigation Bar"),
        ))
        .with_children(|bar| {
            for direction in [FlipDirection::Backward, FlipDirection::Forward] {
                let button = NavButton {
                    direction,
                    enabled: false,
                };
                bar.spawn((
                    Button,
                    Node {
                        width: Val::Px(140.0),
                        height: Val::Px(44.0),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BorderRadius::all(Val::Px(8.0)),
                    BackgroundColor(DISABLED_BUTTON),
                    button,
                ))
                .with_children(|parent| {
                    parent.spawn((
                        Text::new(button.label()),
                        TextFont {
                            font_size: 20.0,
                            ..default()
                        },
                        TextColor(DISABLED_LABEL_COLOR),
                    ));
                });
            }
        });
}

fn handle_button_interactions(
    mut buttons: Query<(&Interaction, &NavButton, &mut BackgroundColor), Changed<Interaction>>,
    mut requests: MessageWriter<NavigationRequest>,
) {
    for (interaction, button, mut color) in &mut buttons {
        if !button.enabled {
            continue;
        }
        match *interaction {
            Interaction::Pressed => {
                *color = PRESSED_BUTTON.into();
                requests.write(NavigationRequest(button.direction));
            }
            Interaction::Hovered => *color = HOVERED_BUTTON.into(),
            Interaction::None => *color = NORMAL_BUTTON.into(),
        }
    }
}

fn apply_navigation_state(
    status: Res<NavigationStatus>,
    mut buttons: Query<(&mut NavButton, &mut BackgroundColor, &Children)>,
    mut labels: Query<&mut TextColor>,
) {
    for (mut button, mut background, children) in &mut buttons {
        button.enabled = button.enabled_in(&status.0);
        let (fill, ink) = if button.enabled {
            (NORMAL_BUTTON, LABEL_COLOR)
        } else {
            (DISABLED_BUTTON, DISABLED_LABEL_COLOR)
        };
        *background = fill.into();
        for child in children.iter() {
            if let Ok(mut color) = labels.get_mut(child) {
                color.0 = ink;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::message::Messages;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_message::<NavigationRequest>()
            .init_resource::<NavigationStatus>()
            .add_plugins(ButtonsPlugin);
        app.update();
        app
    }

    fn buttons(app: &mut App) -> Vec<(Entity, NavButton)> {
        let mut query = app.world_mut().query::<(Entity, &NavButton)>();
        query.iter(app.world()).map(|(e, b)| (e, *b)).collect()
    }

    fn drain_requests(app: &mut App) -> Vec<NavigationRequest> {
        app.world_mut()
            .resource_mut::<Messages<NavigationRequest>>()
            .drain()
            .collect()
    }

    #[test]
    fn both_buttons_start_disabled() {
        let mut app = app();
        let buttons = buttons(&mut app);

        assert_eq!(buttons.len(), 2);
        assert!(buttons.iter().all(|(_, b)| !b.enabled));
    }

    #[test]
    fn navigation_state_enables_buttons() {
        let mut app = app();
        app.world_mut().resource_mut::<NavigationStatus>().0 = NavigationState {
            previous_enabled: false,
            next_enabled: true,
        };
        app.update();

        for (entity, button) in buttons(&mut app) {
            let expected = button.direction == FlipDirection::Forward;
            assert_eq!(button.enabled, expected);
            let background = app.world().get::<BackgroundColor>(entity).unwrap().0;
            let fill = if expected { NORMAL_BUTTON } else { DISABLED_BUTTON };
            assert_eq!(background, fill);
        }
    }

    #[test]
    fn pressing_a_disabled_button_sends_nothing() {
        let mut app = app();
        for (entity, _) in buttons(&mut app) {
            app.world_mut()
                .entity_mut(entity)
                .insert(Interaction::Pressed);
        }
        app.update();

        assert!(drain_requests(&mut app).is_empty());
    }

    #[test]
    fn pressing_next_requests_a_forward_flip() {
        let mut app = app();
        app.world_mut().resource_mut::<NavigationStatus>().0 = NavigationState {
            previous_enabled: true,
            next_enabled: true,
        };
        app.update();

        let (next, _) = buttons(&mut app)
            .into_iter()
            .find(|(_, b)| b.direction == FlipDirection::Forward)
            .unwrap();
        app.world_mut().entity_mut(next).insert(Interaction::Pressed);
        app.update();

        assert_eq!(
            drain_requests(&mut app),
            vec![NavigationRequest(FlipDirection::Forward)]
        );
    }
}
