//! Page image loading and the loading overlay.

use crate::utils::{despawn_all, remove_resource};
use crate::CalendarState;
use bevy::asset::LoadState;
use bevy::image::{ImageLoaderSettings, ImageSampler, ImageSamplerDescriptor};
use bevy::prelude::*;
use calendar_logic::{
    AssetManifest, AssetSettings, LoadStatus, PageAssetLoader, PageAssets, LOG_ASSETS,
};
use settings::SettingsArc;
use tracing::info;

pub(super) struct LoadingPlugin;

impl Plugin for LoadingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(CalendarState::Loading), start_loading)
            .add_systems(
                Update,
                poll_page_assets.run_if(in_state(CalendarState::Loading)),
            )
            .add_systems(
                OnExit(CalendarState::Loading),
                (despawn_all::<LoadingOverlay>, remove_resource::<PendingPageAssets>),
            );
    }
}

/// Loads still in flight.
#[derive(Resource)]
pub(super) struct PendingPageAssets(PageAssetLoader<Handle<Image>>);

/// Every page image settled; consumed when the pages are spawned.
#[derive(Resource)]
pub(super) struct LoadedPageAssets(pub PageAssets<Handle<Image>>);

#[derive(Component)]
struct LoadingOverlay;

#[derive(Component)]
struct LoadingText;

const MAX_ANISOTROPY: u16 = 16;

fn progress_label(settled: usize, total: usize) -> String {
    format!("Loading calendar… {settled} / {total}")
}

fn to_load_status(state: &LoadState) -> LoadStatus {
    match state {
        LoadState::Loaded => LoadStatus::Loaded,
        LoadState::Failed(_) => LoadStatus::Failed,
        LoadState::NotLoaded | LoadState::Loading => LoadStatus::Pending,
    }
}

fn start_loading(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    asset_settings: Res<SettingsArc<AssetSettings>>,
) {
    let manifest = AssetManifest::from_settings(&asset_settings);
    let loader = PageAssetLoader::issue(&manifest, |request| {
        let handle: Handle<Image> = asset_server.load_with_settings(
            request.path.clone(),
            |settings: &mut ImageLoaderSettings| {
                settings.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
                    anisotropy_clamp: MAX_ANISOTROPY,
                    ..ImageSamplerDescriptor::linear()
                });
            },
        );
        handle
    });

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
            LoadingOverlay,
            Name::new("Loading Overlay"),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(progress_label(0, loader.total())),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::srgb_u8(0x74, 0x68, 0x5c)),
                LoadingText,
            ));
        });

    commands.insert_resource(PendingPageAssets(loader));
}

fn poll_page_assets(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut pending: ResMut<PendingPageAssets>,
    mut labels: Query<&mut Text, With<LoadingText>>,
    mut next_state: ResMut<NextState<CalendarState>>,
) {
    let loader = &mut pending.0;
    let assets = loader.poll(|handle| to_load_status(&asset_server.load_state(handle.id())));

    let label = progress_label(loader.settled_count(), loader.total());
    for mut text in &mut labels {
        if text.0 != label {
            text.0 = label.clone();
        }
    }

    if let Some(assets) = assets {
        info!(target: LOG_ASSETS, "all page images settled");
        commands.insert_resource(LoadedPageAssets(assets));
        next_state.set(CalendarState::Ready);
    }
}
