//! Directory layout of the desk calendar.
//!
//! Everything the application writes or reads at runtime lives below one
//! project root: `<base>/<studio>/<project>/`.
//!
//! ```text
//! <project root>/
//!   <app>.settings.toml
//!   assets/<app>/calendario/calendario-01.jpg.jpeg ...
//!   logs/<app>.<timestamp>.log
//! ```

use std::path::{Path, PathBuf};

/// Where the binary was started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnvironment {
    /// Started through cargo, data stays inside the workspace.
    Development,
    /// Installed binary, data goes to the platform's local data directory.
    Production,
}

impl RuntimeEnvironment {
    pub fn detect() -> Self {
        let from_target_dir = std::env::current_exe()
            .map(|exe| exe.components().any(|c| c.as_os_str() == "target"))
            .unwrap_or(false);
        let under_cargo =
            std::env::var_os("CARGO").is_some() || std::env::var_os("CARGO_MANIFEST_DIR").is_some();

        if from_target_dir || under_cargo {
            Self::Development
        } else {
            Self::Production
        }
    }

    fn default_base(self) -> PathBuf {
        match self {
            Self::Development => std::env::var_os("CARGO_MANIFEST_DIR")
                .map(PathBuf::from)
                .or_else(|| std::env::current_dir().ok())
                .unwrap_or_else(|| PathBuf::from(".")),
            Self::Production => dirs::data_local_dir()
                .map(|dir| dir.join("DeskCalendar"))
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

/// Directories the application creates on start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppDir {
    Root,
    Assets,
    Logs,
}

impl AppDir {
    pub const ALL: [AppDir; 3] = [AppDir::Root, AppDir::Assets, AppDir::Logs];
}

#[derive(Debug, Clone)]
pub struct PathContext {
    environment: RuntimeEnvironment,
    root: PathBuf,
    app_id: &'static str,
}

impl PathContext {
    /// Layout below the default base of the detected environment.
    pub fn new(studio: &str, project_id: &str, app_id: &'static str) -> Self {
        let environment = RuntimeEnvironment::detect();
        Self::at(environment, &environment.default_base(), studio, project_id, app_id)
    }

    /// Layout below an explicit base directory.
    pub fn with_base_path(
        base: impl AsRef<Path>,
        studio: &str,
        project_id: &str,
        app_id: &'static str,
    ) -> Self {
        Self::at(RuntimeEnvironment::detect(), base.as_ref(), studio, project_id, app_id)
    }

    fn at(
        environment: RuntimeEnvironment,
        base: &Path,
        studio: &str,
        project_id: &str,
        app_id: &'static str,
    ) -> Self {
        Self {
            environment,
            root: base.join(studio).join(project_id),
            app_id,
        }
    }

    pub fn environment(&self) -> RuntimeEnvironment {
        self.environment
    }

    pub fn app_id(&self) -> &'static str {
        self.app_id
    }

    pub fn project_root(&self) -> &Path {
        &self.root
    }

    pub fn dir(&self, kind: AppDir) -> PathBuf {
        match kind {
            AppDir::Root => self.root.clone(),
            AppDir::Assets => self.root.join("assets").join(self.app_id),
            AppDir::Logs => self.root.join("logs"),
        }
    }

    /// `<root>/<app>.settings.toml`, or the file of another app of the project.
    pub fn settings_file(&self, app_id: Option<&str>) -> PathBuf {
        self.root
            .join(format!("{}.settings.toml", app_id.unwrap_or(self.app_id)))
    }

    /// Asset root handed to the engine; image paths are relative to it.
    pub fn assets_dir(&self) -> PathBuf {
        self.dir(AppDir::Assets)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.dir(AppDir::Logs)
    }

    pub fn log_file(&self, timestamp: &str) -> PathBuf {
        self.logs_dir()
            .join(format!("{}.{timestamp}.log", self.app_id))
    }

    /// Log file named after the local start time.
    pub fn log_file_now(&self) -> PathBuf {
        self.log_file(&chrono::Local::now().format("%Y%m%d-%H%M%S").to_string())
    }

    pub fn ensure_directories(&self) -> std::io::Result<()> {
        AppDir::ALL
            .iter()
            .try_for_each(|kind| std::fs::create_dir_all(self.dir(*kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> PathContext {
        PathContext::with_base_path("/base", "studio", "desk", "desk_calendar")
    }

    #[test]
    fn project_root_joins_studio_and_project() {
        assert_eq!(context().project_root(), Path::new("/base/studio/desk"));
        assert_eq!(context().app_id(), "desk_calendar");
    }

    #[test]
    fn settings_file_defaults_to_own_app() {
        let ctx = context();

        assert_eq!(
            ctx.settings_file(None),
            PathBuf::from("/base/studio/desk/desk_calendar.settings.toml")
        );
        assert_eq!(
            ctx.settings_file(Some("viewer")),
            PathBuf::from("/base/studio/desk/viewer.settings.toml")
        );
    }

    #[test]
    fn assets_are_scoped_per_app() {
        assert_eq!(
            context().assets_dir(),
            PathBuf::from("/base/studio/desk/assets/desk_calendar")
        );
    }

    #[test]
    fn log_file_carries_timestamp() {
        assert_eq!(
            context().log_file("20240315-120000"),
            PathBuf::from("/base/studio/desk/logs/desk_calendar.20240315-120000.log")
        );
        assert!(context().log_file_now().starts_with("/base/studio/desk/logs"));
    }

    #[test]
    fn ensure_directories_creates_every_app_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = PathContext::with_base_path(tmp.path(), "studio", "desk", "desk_calendar");

        ctx.ensure_directories().unwrap();

        for kind in AppDir::ALL {
            assert!(ctx.dir(kind).is_dir(), "{kind:?} missing");
        }
    }
}
