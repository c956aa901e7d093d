#![cfg(feature = "bevy")]

use bevy::{
    app::App,
    ecs::resource::Resource,
    prelude::{Deref, DerefMut},
};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

use crate::{Settings, SettingsError, SettingsStore};

/// The store itself, kept in the world for diagnostics such as
/// [`SettingsStore::unknown_sections`].
#[derive(Resource, Deref, DerefMut)]
pub struct SettingsStoreRef(pub SettingsStore);

/// Snapshot of one registered section, available as a Bevy resource.
#[derive(Resource, Deref, DerefMut, Clone)]
pub struct SettingsArc<T: Send + Sync + 'static>(pub Arc<T>);

pub trait AppSettingsExt {
    fn insert_settings_store(&mut self, store: SettingsStore) -> &mut Self;

    /// Registers `S` with the store and seeds `SettingsArc<S>`.
    fn register_settings_section<S>(&mut self) -> Result<&mut Self, SettingsError>
    where
        S: Settings + Default + Serialize + DeserializeOwned;
}

impl AppSettingsExt for App {
    fn insert_settings_store(&mut self, store: SettingsStore) -> &mut Self {
        self.insert_resource(SettingsStoreRef(store))
    }

    fn register_settings_section<S>(&mut self) -> Result<&mut Self, SettingsError>
    where
        S: Settings + Default + Serialize + DeserializeOwned,
    {
        let section = {
            let mut store = self.world_mut().resource_mut::<SettingsStoreRef>();
            store.register::<S>()?;
            store.get::<S>()?
        };
        Ok(self.insert_resource(SettingsArc(section)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct Paper {
        grain: u32,
    }

    impl Settings for Paper {
        const SECTION: &'static str = "paper";
    }

    #[test]
    fn registered_section_becomes_a_resource() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.settings.toml");
        std::fs::write(&path, "[paper]\ngrain = 3\n").unwrap();
        let store = SettingsStore::builder().with_settings_file(path).build().unwrap();

        let mut app = App::new();
        app.insert_settings_store(store)
            .register_settings_section::<Paper>()
            .unwrap();

        assert_eq!(app.world().resource::<SettingsArc<Paper>>().grain, 3);
        assert!(app.register_settings_section::<Paper>().is_err());
    }
}
