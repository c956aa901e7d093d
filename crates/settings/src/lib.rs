#[cfg(feature = "bevy")]
mod bevy_adapter;

mod errors;
mod store;

#[cfg(feature = "bevy")]
pub use bevy_adapter::*;

pub use errors::SettingsError;
pub use store::{SettingsStore, SettingsStoreBuilder};

/// A typed settings section.
///
/// Each section is one struct; its `Default` impl carries the defaults and the
/// settings file only stores deviations under `[SECTION]`.
pub trait Settings: 'static + Send + Sync {
    /// Name of the TOML table this section is read from.
    const SECTION: &'static str;

    fn name() -> &'static str {
        Self::SECTION
    }
}
