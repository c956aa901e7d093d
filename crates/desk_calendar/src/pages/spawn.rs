//! Builds the page entities once all images have settled.

use super::loading::LoadedPageAssets;
use super::CalendarWidgetResource;
use crate::CalendarState;
use bevy::asset::RenderAssetUsages;
use bevy::image::{ImageAddressMode, ImageSampler, ImageSamplerDescriptor};
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::pbr::UvChannel;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use calendar_logic::{
    AssetSettings, FaceGeometry, FaceKind, LayoutSettings, PageTexture, PaperGrain,
    PlaceholderImage, LOG_CALENDAR,
};
use settings::SettingsArc;
use tracing::{info, warn};

pub(super) struct SpawnPlugin;

impl Plugin for SpawnPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(CalendarState::Ready), spawn_pages);
    }
}

/// Group the page pivots hang from, placed on the binding.
#[derive(Component)]
pub struct PagesRoot;

/// Pivot of page `n`; rotates around X at the binding.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePivot(pub usize);

/// One face mesh of a page.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageFace {
    pub page: usize,
    pub kind: FaceKind,
}

const GRAIN_SIZE: u32 = 256;
/// How often the grain tiles across a page.
const GRAIN_REPEAT: f32 = 6.0;
const GRAIN_STRENGTH: f32 = 1.5;

/// Uploads fresh normals and tangents after the positions changed.
pub(super) fn refresh_shading(mesh: &mut Mesh) {
    mesh.compute_normals();
    if let Err(err) = mesh.generate_tangents() {
        warn!(target: LOG_CALENDAR, "page mesh without tangents: {err}");
    }
}

pub(super) fn face_mesh(face: &FaceGeometry) -> Mesh {
    let grain_uvs: Vec<[f32; 2]> = face
        .uvs()
        .iter()
        .map(|[u, v]| [u * GRAIN_REPEAT, v * GRAIN_REPEAT])
        .collect();

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, face.positions().to_vec())
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, face.uvs().to_vec())
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_1, grain_uvs)
        .with_inserted_indices(Indices::U32(face.indices().to_vec()));
    refresh_shading(&mut mesh);
    mesh
}

fn rgba_image(size: u32, pixels: Vec<u8>, format: TextureFormat) -> Image {
    Image::new(
        Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        pixels,
        format,
        RenderAssetUsages::default(),
    )
}

pub(super) fn placeholder_image(label: &str) -> Image {
    let placeholder = PlaceholderImage::render(label);
    rgba_image(
        placeholder.size(),
        placeholder.into_pixels(),
        TextureFormat::Rgba8UnormSrgb,
    )
}

pub(super) fn grain_normal_map() -> Image {
    let grain = PaperGrain::generate(GRAIN_SIZE, &mut rand::thread_rng());
    let mut image = rgba_image(
        grain.size(),
        grain.normal_map(GRAIN_STRENGTH),
        TextureFormat::Rgba8Unorm,
    );
    image.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
        address_mode_u: ImageAddressMode::Repeat,
        address_mode_v: ImageAddressMode::Repeat,
        ..ImageSamplerDescriptor::linear()
    });
    image
}

fn page_material(kind: FaceKind, texture: Option<Handle<Image>>, grain: Handle<Image>) -> StandardMaterial {
    let (base_color, roughness) = match kind {
        FaceKind::Front | FaceKind::Back => (Color::WHITE, 0.55),
        FaceKind::Edge => (Color::srgb_u8(0xf4, 0xf2, 0xed), 0.75),
    };
    StandardMaterial {
        base_color,
        base_color_texture: texture,
        perceptual_roughness: roughness,
        metallic: 0.0,
        normal_map_texture: Some(grain),
        normal_map_channel: UvChannel::Uv1,
        ..default()
    }
}

fn spawn_pages(
    mut commands: Commands,
    loaded: Res<LoadedPageAssets>,
    widget: Res<CalendarWidgetResource>,
    layout: Res<SettingsArc<LayoutSettings>>,
    asset_settings: Res<SettingsArc<AssetSettings>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
) {
    let assets = &loaded.0;
    let placeholder = (assets.placeholder_count() > 0)
        .then(|| images.add(placeholder_image(&asset_settings.placeholder_label)));
    let grain = images.add(grain_normal_map());
    let texture_of = |texture: Option<&PageTexture<Handle<Image>>>| match texture {
        Some(PageTexture::Image(handle)) => Some(handle.clone()),
        _ => placeholder.clone(),
    };

    let root = commands
        .spawn((
            Transform::from_xyz(0.0, layout.stand_height, layout.stand_depth * 0.01)
                .with_rotation(Quat::from_rotation_x(layout.binding_tilt)),
            Visibility::default(),
            PagesRoot,
            Name::new("Pages"),
        ))
        .id();

    for page in widget.stack().pages() {
        let index = page.index();
        let geometry = page.geometry();
        let pivot = commands
            .spawn((
                Transform::from_xyz(0.0, 0.0, page.depth())
                    .with_rotation(Quat::from_rotation_x(page.rotation())),
                Visibility::default(),
                PagePivot(index),
                Name::new(format!("Page {}", index + 1)),
                ChildOf(root),
            ))
            .id();

        for face in geometry.faces() {
            let texture = match face.kind() {
                FaceKind::Front => texture_of(assets.front(index)),
                FaceKind::Back => texture_of(assets.back(index)),
                FaceKind::Edge => None,
            };
            commands.spawn((
                Mesh3d(meshes.add(face_mesh(face))),
                MeshMaterial3d(materials.add(page_material(face.kind(), texture, grain.clone()))),
                // pages hang below the binding
                Transform::from_xyz(0.0, -geometry.half_height(), 0.0),
                PageFace {
                    page: index,
                    kind: face.kind(),
                },
                ChildOf(pivot),
            ));
        }
    }

    info!(
        target: LOG_CALENDAR,
        "spawned {} pages, {} placeholder image(s)",
        widget.stack().len(),
        assets.placeholder_count()
    );
    commands.remove_resource::<LoadedPageAssets>();
}
