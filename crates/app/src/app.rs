//! Start-up scaffolding shared by the calendar binaries: directory layout,
//! logging, and the hand-off to a configured Bevy `App`.

use paths::PathContext;
use std::marker::PhantomData;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub const LOG_MAIN: &str = "main";

#[cfg(debug_assertions)]
const DEFAULT_LEVEL: LevelFilter = LevelFilter::INFO;
#[cfg(not(debug_assertions))]
const DEFAULT_LEVEL: LevelFilter = LevelFilter::WARN;

/// Identity of an application within the studio/project layout.
pub trait Application: Sized + 'static {
    const APP_ID: &'static str;
    const STUDIO: &'static str = "chicken105";
    const PROJECT_ID: &'static str = "desk_calendar";

    fn path_context() -> PathContext {
        if cfg!(debug_assertions) {
            let workspace_out = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../.out");
            PathContext::with_base_path(workspace_out, Self::STUDIO, Self::PROJECT_ID, Self::APP_ID)
        } else {
            PathContext::new(Self::STUDIO, Self::PROJECT_ID, Self::APP_ID)
        }
    }
}

/// Runtime context that outlives the engine: paths and the log writer.
pub struct AppContext {
    path_context: PathContext,
    version: &'static str,
    log_file: PathBuf,
    // Dropping the guard flushes and stops the file writer.
    _log_guard: WorkerGuard,
}

impl AppContext {
    pub fn app_id(&self) -> &str {
        self.path_context.app_id()
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    pub fn path_context(&self) -> &PathContext {
        &self.path_context
    }

    pub fn log_file(&self) -> &PathBuf {
        &self.log_file
    }
}

/// Installs the console and file subscribers.
///
/// `RUST_LOG` overrides the build's default level.
fn init_logging(log_file: &std::path::Path) -> Result<WorkerGuard, BoxError> {
    let dir = log_file.parent().ok_or("log file has no parent directory")?;
    let name = log_file.file_name().ok_or("log file has no file name")?;
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));

    let filter = EnvFilter::builder()
        .with_default_directive(DEFAULT_LEVEL.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_ansi(false).with_writer(writer))
        .with(fmt::layer().with_target(true))
        .try_init()?;

    Ok(guard)
}

/// Prepares directories and logging before any engine code runs.
pub struct AppBuilder<A: Application> {
    context: AppContext,
    _marker: PhantomData<A>,
}

impl<A: Application> AppBuilder<A> {
    pub fn new(version: &'static str) -> Result<Self, BoxError> {
        let path_context = A::path_context();
        path_context.ensure_directories()?;

        let log_file = path_context.log_file_now();
        let guard = init_logging(&log_file)?;
        tracing::info!(
            target: LOG_MAIN,
            "{} {version} logging to {}",
            A::APP_ID,
            log_file.display()
        );

        Ok(Self {
            context: AppContext {
                path_context,
                version,
                log_file,
                _log_guard: guard,
            },
            _marker: PhantomData,
        })
    }

    /// Hands a fresh `App` to `configure` together with the context.
    #[cfg(feature = "bevy")]
    pub fn build_with_bevy<E>(
        self,
        configure: impl FnOnce(bevy::prelude::App, &AppContext) -> Result<bevy::prelude::App, E>,
    ) -> Result<BevyApp<A>, E> {
        let app = configure(bevy::prelude::App::new(), &self.context)?;
        Ok(BevyApp {
            context: self.context,
            app,
            _marker: PhantomData,
        })
    }
}

/// A configured engine app; keeps the context alive until the app exits.
#[cfg(feature = "bevy")]
pub struct BevyApp<A: Application> {
    context: AppContext,
    app: bevy::prelude::App,
    _marker: PhantomData<A>,
}

#[cfg(feature = "bevy")]
impl<A: Application> BevyApp<A> {
    pub fn run(&mut self) -> bevy::app::AppExit {
        tracing::info!(target: LOG_MAIN, "starting {}", self.context.app_id());
        self.app.run()
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn app_mut(&mut self) -> &mut bevy::prelude::App {
        &mut self.app
    }
}
