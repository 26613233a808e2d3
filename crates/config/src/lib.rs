//! Layered configuration for firmrel.
//!
//! Sources are merged lowest to highest precedence:
//!
//! 1. built-in defaults ([`Config::default`]),
//! 2. the per-user `config.toml` in the platform config directory,
//! 3. an explicitly requested file (TOML, YAML or JSON, picked by extension),
//! 4. the `MODEL` and `GITHUB_REPOSITORY` environment variables,
//! 5. `FIRMREL_*` environment variables (e.g. `FIRMREL_HISTORY_FILE`),
//! 6. [`Overrides`] supplied by the command-line.

pub mod error;
mod repository;

use crate::error::{ErrorKind, Result};
pub use crate::repository::Repository;
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "mt6000";
pub const DEFAULT_API_URL: &str = "https://firmware-api.gl-inet.com/cloud-api/model/info";
pub const DEFAULT_HISTORY_FILE: &str = "release_history.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const ENV_PREFIX: &str = "FIRMREL_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Router model identifier, as understood by the vendor API.
    pub model: String,
    /// Release target in `owner/repo` form; validated by [`Config::repository`].
    pub repository: Option<String>,
    /// Vendor firmware-metadata endpoint; the model is appended as a query parameter.
    pub api_url: String,
    pub history_file: PathBuf,
    /// Where firmware binaries are downloaded to before being attached.
    pub work_dir: PathBuf,
    /// Product name used in release titles. Defaults to `GL-<MODEL>`.
    pub product_name: Option<String>,
    pub request_timeout_secs: u64,
    /// Explicit path to the `gh` executable, otherwise discovered on `PATH`.
    pub gh_binary: Option<PathBuf>,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            repository: None,
            api_url: DEFAULT_API_URL.to_string(),
            history_file: PathBuf::from(DEFAULT_HISTORY_FILE),
            work_dir: PathBuf::from("."),
            product_name: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            gh_binary: None,
        }
    }
}

/// Command-line values that take precedence over every other source.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from every source, see the [module docs](crate).
    pub fn load(explicit: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(user) = Self::user_config_file() {
            tracing::debug!(path = %user.display(), "Merging user configuration file (if present)");
            figment = figment.merge(Toml::file(user));
        }
        if let Some(path) = explicit {
            figment = Self::merge_file(figment, path)?;
        }
        let figment = figment
            .merge(Env::raw().only(&["MODEL"]))
            .merge(Env::raw().only(&["GITHUB_REPOSITORY"]).map(|_| "repository".into()))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides));
        Self::from_figment(&figment)
    }

    /// Extract and validate a [`Config`] from an already-assembled [`Figment`].
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let config: Config = figment.extract().or_raise(|| ErrorKind::Invalid)?;
        config.validate()?;
        Ok(config)
    }

    fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
        if !path.is_file() {
            exn::bail!(ErrorKind::FileNotFound(path.to_path_buf()));
        }
        let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
        Ok(match extension.as_deref() {
            Some("toml") => figment.merge(Toml::file(path)),
            Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
            Some("json") => figment.merge(Json::file(path)),
            _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
        })
    }

    fn user_config_file() -> Option<PathBuf> {
        ProjectDirs::from("", "", "firmrel").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            exn::bail!(ErrorKind::InvalidValue { field: "model", reason: "must not be empty".to_string() });
        }
        if self.api_url.trim().is_empty() {
            exn::bail!(ErrorKind::InvalidValue { field: "api_url", reason: "must not be empty".to_string() });
        }
        if self.request_timeout_secs == 0 {
            exn::bail!(ErrorKind::InvalidValue {
                field: "request_timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// The validated release target. Missing or malformed values are a hard
    /// configuration error; nothing should be downloaded without a target.
    pub fn repository(&self) -> Result<Repository> {
        match self.repository.as_deref().map(str::trim) {
            None | Some("") => exn::bail!(ErrorKind::MissingRepository),
            Some(repo) => repo.parse(),
        }
    }

    pub fn product_name(&self) -> String {
        match self.product_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("GL-{}", self.model.trim().to_uppercase()),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
