use bevy::prelude::*;

/// Plugin for managing scene lighting
pub struct LightingPlugin;

impl Plugin for LightingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_lighting);
    }
}

/// Marker component for lighting entities
#[derive(Component)]
pub struct LightingEntity;

const AMBIENT_BRIGHTNESS: f32 = 600.0;
const KEY_ILLUMINANCE: f32 = 6_000.0;
const FILL_ILLUMINANCE: f32 = 2_000.0;

fn setup_lighting(mut commands: Commands, ambient_light: Option<ResMut<AmbientLight>>) {
    if let Some(mut ambient_light) = ambient_light {
        ambient_light.brightness = AMBIENT_BRIGHTNESS;
        ambient_light.color = Color::WHITE;
    }

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            illuminance: KEY_ILLUMINANCE,
            ..default()
        },
        Transform::from_xyz(2.6, 4.2, 3.4).looking_at(Vec3::ZERO, Vec3::Y),
        LightingEntity,
        Name::new("Key Light"),
    ));

    // warm, shadowless light from behind-left
    commands.spawn((
        DirectionalLight {
            shadows_enabled: false,
            illuminance: FILL_ILLUMINANCE,
            color: Color::srgb_u8(0xff, 0xf0, 0xdd),
            ..default()
        },
        Transform::from_xyz(-3.0, 2.6, -2.4).looking_at(Vec3::ZERO, Vec3::Y),
        LightingEntity,
        Name::new("Fill Light"),
    ));
}
