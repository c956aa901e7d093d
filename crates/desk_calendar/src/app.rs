use ::app::{AppContext, BoxError, LOG_MAIN};
use bevy::{log::LogPlugin, prelude::*};
use crate::pages::CalendarWidgetResource;
use calendar_logic::{
    AnimationSettings, AssetSettings, CalendarWidget, LayoutError, LayoutSettings, SceneSettings,
};
use settings::{AppSettingsExt, SettingsArc, SettingsStore, SettingsStoreRef};
use tracing::{info, warn};

/// Installs settings and engine plugins.
///
/// Fails when the settings file cannot be read or holds values the calendar
/// cannot be built from.
pub fn configure(mut app: App, ctx: &AppContext) -> Result<App, BoxError> {
    let settings_file = ctx.path_context().settings_file(None);
    let store = SettingsStore::builder()
        .with_settings_file(&settings_file)
        .build()?;
    info!(target: LOG_MAIN, "settings file: {}", settings_file.display());

    app.insert_settings_store(store)
        .register_settings_section::<LayoutSettings>()?
        .register_settings_section::<AnimationSettings>()?
        .register_settings_section::<SceneSettings>()?
        .register_settings_section::<AssetSettings>()?;

    insert_calendar_widget(&mut app)?;
    let world = app.world();
    let scene = world.resource::<SettingsArc<SceneSettings>>().clone();
    scene.validate()?;
    for section in world.resource::<SettingsStoreRef>().unknown_sections() {
        warn!(target: LOG_MAIN, "ignoring unknown settings section [{section}]");
    }

    let assets_dir = ctx.path_context().assets_dir();
    info!(target: LOG_MAIN, "page images are read from {}", assets_dir.display());

    let [r, g, b] = scene.background;
    app.insert_resource(ClearColor(Color::srgb_u8(r, g, b)))
        .add_plugins(
            DefaultPlugins
                .build()
                .disable::<LogPlugin>()
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Desk Calendar".to_string(),
                        ..default()
                    }),
                    ..default()
                })
                .set(AssetPlugin {
                    file_path: assets_dir.to_string_lossy().into_owned(),
                    ..default()
                }),
        );

    Ok(app)
}

/// Builds the calendar from the registered sections, so invalid layout or
/// animation values stop start-up instead of surfacing once images are in.
fn insert_calendar_widget(app: &mut App) -> Result<(), LayoutError> {
    let world = app.world();
    let widget = CalendarWidget::from_settings(
        world.resource::<SettingsArc<LayoutSettings>>(),
        world.resource::<SettingsArc<AnimationSettings>>(),
    )?;
    app.insert_resource(CalendarWidgetResource(widget));
    Ok(())
}
