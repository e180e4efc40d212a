//! Test configuration loaders for scenarios covering success and failure paths.

use std::ffi::OsString;
use std::sync::Arc;

use camino::Utf8PathBuf;
use ortho_config::{OrthoConfig, OrthoError};
use parrot_config::Config;

use crate::bootstrap::ConfigLoader;

/// Loader rooting the data directory in a caller-owned temporary directory.
pub struct TestConfigLoader {
    data_dir: Utf8PathBuf,
    chambers: u8,
}

impl TestConfigLoader {
    #[must_use]
    pub fn new(data_dir: Utf8PathBuf) -> Self {
        Self {
            data_dir,
            chambers: 6,
        }
    }

    /// Overrides the revolver size, including invalid values.
    #[must_use]
    pub fn with_chambers(mut self, chambers: u8) -> Self {
        self.chambers = chambers;
        self
    }
}

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(Config {
            data_dir: self.data_dir.clone(),
            channel: "streamer".to_owned(),
            roulette_chambers: self.chambers,
            ..Config::default()
        })
    }
}

/// Loader that intentionally fails by passing an unsupported server scheme.
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("parrotd"),
            OsString::from("--server"),
            OsString::from("ftp://irc.example:6667"),
        ];
        Config::load_from_iter(args)
    }
}
