//! Bot bootstrap orchestration.

use std::sync::Arc;
use std::time::Instant;

use ortho_config::{OrthoConfig, OrthoError};
use thiserror::Error;

use parrot_config::{Config, ConfigValidationError, StorePathsError};

use crate::dispatch::ChatEngine;
use crate::health::HealthReporter;
use crate::roulette::{BulletRoller, OsBulletRoller, Revolver, RollError, RouletteEngine};
use crate::store::{FlushSchedule, StoreError, Stores};
use crate::telemetry::{self, TelemetryError};
use crate::translation::{HttpTranslator, TranslateError, TranslationGate, Translator};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the bot configuration.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Loader returning a configuration resolved earlier.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Wraps `config`.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Builds the external collaborators the engine talks to.
pub trait ServiceFactory {
    /// Creates the translation client.
    fn translator(&self, config: &Config) -> Result<Box<dyn Translator>, TranslateError>;

    /// Creates the bullet roller.
    fn roller(&self) -> Box<dyn BulletRoller>;
}

/// Production services: the HTTP translator and OS entropy.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemServices;

impl ServiceFactory for SystemServices {
    fn translator(&self, config: &Config) -> Result<Box<dyn Translator>, TranslateError> {
        let translator =
            HttpTranslator::new(&config.translator_endpoint, config.translator_timeout())?;
        Ok(Box::new(translator))
    }

    fn roller(&self) -> Box<dyn BulletRoller> {
        Box::new(OsBulletRoller)
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Configuration loaded but holds unusable values.
    #[error("invalid configuration: {source}")]
    Validation {
        /// Underlying validation error.
        #[source]
        source: ConfigValidationError,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// The data directory could not be created.
    #[error("failed to prepare data directory: {source}")]
    DataDirectory {
        /// Underlying filesystem error.
        #[source]
        source: StorePathsError,
    },
    /// A persisted store could not be loaded.
    #[error("failed to load stores: {source}")]
    Stores {
        /// Underlying store error.
        #[source]
        source: StoreError,
    },
    /// The translation client could not be built.
    #[error("failed to build translator: {source}")]
    Translator {
        /// Underlying client error.
        #[source]
        source: TranslateError,
    },
    /// The revolver could not be loaded.
    #[error("failed to load revolver: {source}")]
    Revolver {
        /// Underlying randomness error.
        #[source]
        source: RollError,
    },
}

/// Result of a successful bootstrap invocation.
pub struct Bot {
    config: Config,
    engine: ChatEngine,
    reporter: Arc<dyn HealthReporter>,
}

impl Bot {
    /// Accessor for the resolved configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Accessor for the engine.
    #[must_use]
    pub fn engine(&self) -> &ChatEngine {
        &self.engine
    }

    /// Splits the bot into what the supervision loop needs.
    #[must_use]
    pub fn into_parts(self) -> (Config, ChatEngine, Arc<dyn HealthReporter>) {
        (self.config, self.engine, self.reporter)
    }
}

/// Bootstraps the bot using the supplied collaborators.
///
/// # Errors
///
/// Returns a [`BootstrapError`] for the first step that fails; the reporter
/// sees the same error.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
    services: &dyn ServiceFactory,
) -> Result<Bot, BootstrapError> {
    reporter.bootstrap_starting();
    match assemble(loader, services) {
        Ok((config, engine)) => {
            reporter.bootstrap_succeeded(&config);
            Ok(Bot {
                config,
                engine,
                reporter,
            })
        }
        Err(error) => {
            reporter.bootstrap_failed(&error);
            Err(error)
        }
    }
}

fn assemble(
    loader: &dyn ConfigLoader,
    services: &dyn ServiceFactory,
) -> Result<(Config, ChatEngine), BootstrapError> {
    let config = loader
        .load()
        .map_err(|source| BootstrapError::Configuration { source })?;
    config
        .validate()
        .map_err(|source| BootstrapError::Validation { source })?;
    telemetry::initialise(&config).map_err(|source| BootstrapError::Telemetry { source })?;

    let paths = config.store_paths();
    paths
        .prepare()
        .map_err(|source| BootstrapError::DataDirectory { source })?;
    let stores = Stores::load(paths).map_err(|source| BootstrapError::Stores { source })?;

    let translator = services
        .translator(&config)
        .map_err(|source| BootstrapError::Translator { source })?;
    let mut roller = services.roller();
    let revolver = Revolver::new(config.roulette_chambers, roller.as_mut())
        .map_err(|source| BootstrapError::Revolver { source })?;

    let engine = ChatEngine::new(
        &config.bot_username,
        stores,
        FlushSchedule::new(config.save_interval(), Instant::now()),
        TranslationGate::new(
            translator,
            config.target_language.clone(),
            config.translate_cooldown(),
        ),
        RouletteEngine::new(
            revolver,
            roller,
            config.roulette_cooldown(),
            config.roulette_timeout_secs,
        ),
    );
    Ok((config, engine))
}
