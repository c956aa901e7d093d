use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{Settings, SettingsError};

use serde::{de::DeserializeOwned, Serialize};
use toml::{Table, Value};
use tracing::{debug, warn};

/// Convert a serializable section into a TOML table.
fn to_table<T: Settings + Serialize>(value: &T) -> Result<Table, SettingsError> {
    match Value::try_from(value)? {
        Value::Table(table) => Ok(table),
        _ => Err(SettingsError::Invalid {
            section: T::SECTION,
            reason: "section must serialize to a table",
        }),
    }
}

/// Merge default + delta recursively (tables only).
fn merge_tables(default: &Table, delta: &Table) -> Table {
    let mut merged = default.clone();
    for (k, v_delta) in delta.iter() {
        match (merged.get(k), v_delta) {
            (Some(Value::Table(def_t)), Value::Table(delta_t)) => {
                let rec = merge_tables(def_t, delta_t);
                merged.insert(k.clone(), Value::Table(rec));
            }
            _ => {
                merged.insert(k.clone(), v_delta.clone());
            }
        }
    }
    merged
}

fn read_deltas(path: &Path) -> Result<Table, SettingsError> {
    if !path.exists() {
        return Ok(Table::new());
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Table::new());
    }
    Ok(content.parse::<Table>()?)
}

/// Builder for `SettingsStore` (single delta file).
#[derive(Default)]
pub struct SettingsStoreBuilder {
    settings_file: Option<PathBuf>,
}

impl SettingsStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.settings_file = Some(path.into());
        self
    }

    pub fn build(self) -> Result<SettingsStore, SettingsError> {
        let file_path = self.settings_file.ok_or(SettingsError::Invalid {
            section: "<store>",
            reason: "settings file not specified",
        })?;

        if let Some(dir) = file_path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let deltas = read_deltas(&file_path)?;
        debug!(
            "settings file {} provides {} section(s)",
            file_path.display(),
            deltas.len()
        );

        Ok(SettingsStore {
            deltas,
            defaults: HashMap::new(),
            values: HashMap::new(),
        })
    }
}

/// Settings store.
///
/// Each registered section is the merge of its `Default` value and the
/// matching `[section]` table of the settings file. The file is never written;
/// it only holds the user's deviations.
pub struct SettingsStore {
    deltas: Table,                            // section -> delta table from the file
    defaults: HashMap<&'static str, Table>,   // section -> full default table
    values: HashMap<&'static str, Table>,     // section -> effective merged table
}

impl SettingsStore {
    pub fn builder() -> SettingsStoreBuilder {
        SettingsStoreBuilder::new()
    }

    /// Register a section type (loads defaults and applies the file delta if present).
    pub fn register<T>(&mut self) -> Result<(), SettingsError>
    where
        T: Settings + Default + Serialize + DeserializeOwned,
    {
        let section = T::name();
        if self.values.contains_key(section) {
            return Err(SettingsError::AlreadyRegistered(section));
        }

        let default_table = to_table(&T::default())?;
        let merged = self.merge_section(section, &default_table)?;

        // Validate shape once so later `get` calls cannot fail on bad input.
        let _: T = Value::Table(merged.clone()).try_into()?;

        self.defaults.insert(section, default_table);
        self.values.insert(section, merged);
        Ok(())
    }

    /// Snapshot get (Arc).
    pub fn get<T>(&self) -> Result<Arc<T>, SettingsError>
    where
        T: Settings + DeserializeOwned,
    {
        self.try_get::<T>()?
            .ok_or(SettingsError::NotRegistered(T::name()))
    }

    /// Optional variant: None if not registered.
    pub fn try_get<T>(&self) -> Result<Option<Arc<T>>, SettingsError>
    where
        T: Settings + DeserializeOwned,
    {
        let Some(table) = self.values.get(T::name()) else {
            return Ok(None);
        };
        let inst: T = Value::Table(table.clone()).try_into()?;
        Ok(Some(Arc::new(inst)))
    }

    /// Sections present in the file that no registered type claims.
    pub fn unknown_sections(&self) -> Vec<&str> {
        self.deltas
            .keys()
            .map(String::as_str)
            .filter(|key| !self.defaults.contains_key(*key))
            .collect()
    }

    fn merge_section(
        &self,
        section: &'static str,
        default_table: &Table,
    ) -> Result<Table, SettingsError> {
        match self.deltas.get(section) {
            Some(Value::Table(delta)) => Ok(merge_tables(default_table, delta)),
            Some(_) => {
                warn!("settings section [{section}] is not a table");
                Err(SettingsError::Invalid {
                    section,
                    reason: "expected a table",
                })
            }
            None => Ok(default_table.clone()),
        }
    }
}
