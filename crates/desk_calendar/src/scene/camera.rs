use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};
use calendar_logic::SceneSettings;
use settings::SettingsArc;

/// Damped orbit camera looking at the calendar.
pub struct CalendarCameraPlugin;

impl Plugin for CalendarCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PanOrbitCameraPlugin)
            .add_systems(Startup, setup);
    }
}

/// Orbit parameters (yaw, pitch, radius) of `position` around `focus`.
///
/// Yaw 0 looks down -Z, positive pitch looks down onto the focus.
fn orbit_of(position: Vec3, focus: Vec3) -> (f32, f32, f32) {
    let offset = position - focus;
    let radius = offset.length();
    if radius <= f32::EPSILON {
        return (0.0, 0.0, 0.0);
    }
    let yaw = offset.x.atan2(offset.z);
    let pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();
    (yaw, pitch, radius)
}

fn setup(mut commands: Commands, scene: Res<SettingsArc<SceneSettings>>) {
    let focus = Vec3::from_array(scene.camera_target);
    let position = Vec3::from_array(scene.camera_position);
    let (yaw, pitch, radius) = orbit_of(position, focus);
    let [r, g, b] = scene.background;

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: scene.fov_degrees.to_radians(),
            near: scene.near,
            far: scene.far,
            ..default()
        }),
        Tonemapping::AcesFitted,
        Transform::from_translation(position).looking_at(focus, Vec3::Y),
        DistanceFog {
            color: Color::srgb_u8(r, g, b),
            falloff: FogFalloff::Linear {
                start: scene.fog_start,
                end: scene.fog_end,
            },
            ..default()
        },
        PanOrbitCamera {
            focus,
            yaw: Some(yaw),
            pitch: Some(pitch),
            radius: Some(radius),

            // Limits
            zoom_lower_limit: scene.min_distance,
            zoom_upper_limit: Some(scene.max_distance),

            // Damping
            orbit_smoothness: 0.8,
            zoom_smoothness: 0.8,
            pan_smoothness: 0.6,
            ..default()
        },
        Name::new("Calendar Camera"),
    ));
}
