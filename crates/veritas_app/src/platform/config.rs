//! Configuration: optional RON file merged with command line flags.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use veritas_core::{ModelType, SampleCatalog, SampleError, SampleProvider};
use veritas_engine::{ClientSettings, DEFAULT_ENDPOINT};
use veritas_logging::LogDestination;

pub const DEFAULT_CONFIG_FILE: &str = "veritas.ron";

#[derive(Debug, Parser)]
#[command(name = "veritas", about = "Check article text against a fake news classifier")]
pub struct Cli {
    /// RON configuration file [default: ./veritas.ron, optional]
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Prediction endpoint, overrides the config file.
    #[arg(long)]
    pub endpoint: Option<String>,
    /// Initial model: ml or dl.
    #[arg(long)]
    pub model: Option<ModelType>,
    /// Where log output goes: terminal, file or both.
    #[arg(long, default_value = "file")]
    pub log: LogDestination,
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("invalid sample catalog: {0}")]
    Samples(#[from] SampleError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    /// Minimum time a successful result stays behind the "Analyzing..." state.
    pub min_visible_ms: u64,
    pub default_model: ModelType,
    pub samples: Option<SampleCatalog>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout_ms: 5_000,
            request_timeout_ms: 30_000,
            min_visible_ms: 600,
            default_model: ModelType::Dl,
            samples: None,
        }
    }
}

impl AppConfig {
    /// Loads `path`; a missing file yields defaults unless `required` is set.
    pub fn load(path: &Path, required: bool) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(content)
    }

    /// Resolves the config file named by `cli` (or the default) and applies overrides.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path, true)?,
            None => Self::load(Path::new(DEFAULT_CONFIG_FILE), false)?,
        };
        if let Some(endpoint) = &cli.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(model) = cli.model {
            config.default_model = model;
        }
        Ok(config)
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
        }
    }

    pub fn min_visible(&self) -> Duration {
        Duration::from_millis(self.min_visible_ms)
    }

    pub fn sample_provider(&self) -> Result<SampleProvider, ConfigError> {
        let catalog = self.samples.clone().unwrap_or_default();
        Ok(SampleProvider::new(catalog)?)
    }
}
