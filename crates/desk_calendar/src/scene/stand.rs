use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use calendar_logic::{LayoutSettings, SceneSettings};
use settings::SettingsArc;

/// Triangular stand, spiral binding and the floor it rests on.
pub struct StandPlugin;

impl Plugin for StandPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_stand, spawn_spiral, spawn_floor));
    }
}

#[derive(Component)]
pub struct Stand;

#[derive(Component)]
pub struct SpiralRing;

const FLOOR_SIZE: f32 = 12.0;

fn spawn_stand(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    layout: Res<SettingsArc<LayoutSettings>>,
) {
    // profile in the XY plane, extruded along Z, then turned so the
    // extrusion runs across the page width
    let profile = Triangle2d::new(
        Vec2::new(-layout.stand_depth / 2.0, 0.0),
        Vec2::new(layout.stand_depth / 2.0, 0.0),
        Vec2::new(0.0, layout.stand_height),
    );
    let mesh = meshes.add(Extrusion::new(profile, layout.stand_width).mesh().build());
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0x11, 0x11, 0x11),
        perceptual_roughness: 0.7,
        metallic: 0.1,
        clearcoat: 0.15,
        clearcoat_perceptual_roughness: 0.7,
        ..default()
    });

    commands.spawn((
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::from_xyz(0.0, 0.01, 0.0).with_rotation(Quat::from_rotation_y(FRAC_PI_2)),
        Stand,
        Name::new("Stand"),
    ));
}

fn spawn_spiral(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    layout: Res<SettingsArc<LayoutSettings>>,
) {
    let ring = meshes.add(Torus {
        minor_radius: layout.ring_tube,
        major_radius: layout.ring_radius,
    });
    let metal = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0xb9, 0xb9, 0xb9),
        perceptual_roughness: 0.25,
        metallic: 0.9,
        ..default()
    });

    let y = layout.stand_height + 0.03;
    let z = layout.stand_depth * 0.01;
    commands
        .spawn((Transform::default(), Visibility::default(), Name::new("Spiral")))
        .with_children(|spiral| {
            for x in layout.ring_positions() {
                // Torus lies in XZ; stand it up so the wire wraps around X
                spiral.spawn((
                    Mesh3d(ring.clone()),
                    MeshMaterial3d(metal.clone()),
                    Transform::from_xyz(x, y, z).with_rotation(Quat::from_rotation_z(FRAC_PI_2)),
                    SpiralRing,
                ));
            }
        });
}

fn spawn_floor(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scene: Res<SettingsArc<SceneSettings>>,
) {
    let [r, g, b] = scene.background;
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(FLOOR_SIZE, FLOOR_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(r, g, b),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::default(),
        Name::new("Floor"),
    ));
}
