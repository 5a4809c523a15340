//! Client configuration.
//!
//! [`AppConfig`] is resolved once at startup from four layers, later layers
//! winning field by field:
//!
//! 1. built-in defaults,
//! 2. `<config_dir>/karipap/config.json`,
//! 3. `KARIPAP_*` environment variables,
//! 4. command line flags.
//!
//! The result is handed to the controller and the HTTP client; nothing reads
//! configuration after that.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use karipap_sdk::{BackendContract, Endpoints, DEFAULT_ORIGIN};
use serde::Deserialize;

use crate::i18n::Locale;

const APP_DIR: &str = "karipap";
const CONFIG_FILE: &str = "config.json";
const MIB: u64 = 1024 * 1024;

/// One configuration layer. Every field is optional; unset fields fall
/// through to the layer below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Overrides {
    pub backend_url: Option<String>,
    pub contract: Option<BackendContract>,
    pub max_image_mb: Option<u64>,
    pub lang: Option<Locale>,
    pub timeout_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Overrides {
    /// Read the layer from `KARIPAP_*` variables through `lookup`.
    ///
    /// | Variable               | Example                  |
    /// |------------------------|--------------------------|
    /// | `KARIPAP_BACKEND_URL`  | `http://10.0.0.5:8000`   |
    /// | `KARIPAP_CONTRACT`     | `versioned` / `legacy`   |
    /// | `KARIPAP_MAX_IMAGE_MB` | `10`                     |
    /// | `KARIPAP_LANG`         | `en` / `zh`              |
    /// | `KARIPAP_TIMEOUT_SECS` | `30`                     |
    /// | `KARIPAP_LOG_FILE`     | `/tmp/karipap.log`       |
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        fn parsed<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
        ) -> anyhow::Result<Option<T>>
        where
            T::Err: std::fmt::Display,
        {
            match lookup(key) {
                None => Ok(None),
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map(Some)
                    .map_err(|e| anyhow::anyhow!("invalid {key}={raw:?}: {e}")),
            }
        }

        Ok(Self {
            backend_url: lookup("KARIPAP_BACKEND_URL"),
            contract: parsed(&lookup, "KARIPAP_CONTRACT")?,
            max_image_mb: parsed(&lookup, "KARIPAP_MAX_IMAGE_MB")?,
            lang: parsed(&lookup, "KARIPAP_LANG")?,
            timeout_secs: parsed(&lookup, "KARIPAP_TIMEOUT_SECS")?,
            log_file: lookup("KARIPAP_LOG_FILE").map(PathBuf::from),
        })
    }

    /// Read the layer from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the layer from a JSON file. A missing file is an empty layer.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Stack `self` on top of `below`.
    fn over(self, below: Self) -> Self {
        Self {
            backend_url: self.backend_url.or(below.backend_url),
            contract: self.contract.or(below.contract),
            max_image_mb: self.max_image_mb.or(below.max_image_mb),
            lang: self.lang.or(below.lang),
            timeout_secs: self.timeout_secs.or(below.timeout_secs),
            log_file: self.log_file.or(below.log_file),
        }
    }
}

/// Default location of the configuration file.
pub fn default_config_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join(APP_DIR).join(CONFIG_FILE))
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub endpoints: Endpoints,
    pub max_image_bytes: u64,
    pub locale: Locale,
    /// Unset by default: requests wait for the backend indefinitely.
    pub request_timeout: Option<Duration>,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Resolve file, environment and `cli` layers over the defaults.
    pub fn load(cli: Overrides) -> anyhow::Result<Self> {
        let file = match default_config_path() {
            Some(path) => Overrides::from_file(&path)?,
            None => Overrides::default(),
        };
        let env = Overrides::from_env()?;
        Self::resolve(cli.over(env.over(file)))
    }

    /// Fill unset fields of `layer` with defaults.
    ///
    /// The image ceiling defaults to the contract's own limit. The locale
    /// defaults to Chinese on the legacy contract, whose UI never had an
    /// English version.
    pub fn resolve(layer: Overrides) -> anyhow::Result<Self> {
        let contract = layer.contract.unwrap_or_default();
        let origin = layer.backend_url.as_deref().unwrap_or(DEFAULT_ORIGIN);
        let endpoints = Endpoints::new(origin, contract)?;

        let max_image_bytes = match layer.max_image_mb {
            Some(0) => anyhow::bail!("max image size must be at least 1 MB"),
            Some(mb) => mb.saturating_mul(MIB),
            None => contract.default_max_image_bytes(),
        };

        let locale = layer.lang.unwrap_or(match contract {
            BackendContract::Versioned => Locale::En,
            BackendContract::Legacy => Locale::Zh,
        });

        Ok(Self {
            endpoints,
            max_image_bytes,
            locale,
            request_timeout: layer.timeout_secs.filter(|s| *s > 0).map(Duration::from_secs),
            log_file: layer.log_file,
        })
    }

    pub fn contract(&self) -> BackendContract {
        self.endpoints.contract()
    }
}
