//! Configuration loading and instance folder resolution
//!
//! The instance folder holds everything the board owns on disk:
//!
//! ```text
//! <instance>/
//!   mboard.db                 settings database
//!   photos/                   one image per missionary, `<surname>-<id>.<ext>`
//!   extra/missionaries.json   optional records not present upstream
//! ```
//!
//! Instance folder priority order:
//! 1. Explicit argument (highest priority)
//! 2. `MBOARD_INSTANCE_DIR` environment variable
//! 3. `instance_dir` key in the TOML config file
//! 4. OS-dependent compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Environment variable overriding the instance folder
pub const INSTANCE_DIR_ENV: &str = "MBOARD_INSTANCE_DIR";

/// Engine configuration
///
/// Every field has a built-in default, so an empty TOML document is a valid
/// configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Root folder for the database, photos and extra records
    pub instance_dir: PathBuf,

    /// Minimum time between full roster syncs
    pub refresh_interval_secs: u64,

    /// Age (in 365-day years) above which a missionary counts as senior
    /// when the roster does not say
    pub senior_age: i64,

    /// Slides per page for presentation callers
    pub page_size: usize,

    /// URL prefix prepended to a located photo filename
    pub photo_url_prefix: String,

    /// Placeholder shown for a merged couple without a photo
    pub couple_placeholder: String,

    /// Placeholder shown for a sister without a photo
    pub sister_placeholder: String,

    /// Placeholder shown for an elder (or unknown gender) without a photo
    pub elder_placeholder: String,

    /// Roster source connection settings
    pub roster: RosterConfig,
}

/// Church website roster connection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Scheme and host of the membership records site
    pub base_url: String,

    /// Parent unit (stake) number whose missionaries are listed
    pub parent_unit: u64,

    /// Pre-obtained OAuth id token, sent as a bearer token
    pub bearer_token: Option<String>,

    /// Pre-obtained session cookie header
    pub cookie: Option<String>,

    /// HTTP request timeout
    pub timeout_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            instance_dir: default_instance_dir(),
            refresh_interval_secs: 120,
            senior_age: 40,
            page_size: 6,
            photo_url_prefix: "/photos/".to_string(),
            couple_placeholder: "/static/couple.png".to_string(),
            sister_placeholder: "/static/sister.png".to_string(),
            elder_placeholder: "/static/elder.png".to_string(),
            roster: RosterConfig::default(),
        }
    }
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            base_url: "https://lcr.churchofjesuschrist.org".to_string(),
            parent_unit: 0,
            bearer_token: None,
            cookie: None,
            timeout_secs: 10,
        }
    }
}

impl SyncConfig {
    /// Config rooted at `instance_dir` with all other values defaulted
    pub fn with_instance_dir(instance_dir: impl Into<PathBuf>) -> Self {
        Self {
            instance_dir: instance_dir.into(),
            ..Self::default()
        }
    }

    /// Parse configuration from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SyncConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    ///
    /// A missing file is not an error: defaults are used and a warning is
    /// logged. A file that exists but cannot be parsed is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(
                "Config file {} not found, using built-in defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration and apply instance folder priority order
    pub fn resolve(cli_instance_dir: Option<&str>, config_path: Option<&Path>) -> Result<Self> {
        let from_file = match config_path {
            Some(path) => Some(Self::load(path)?),
            None => None,
        };
        let file_dir = from_file.as_ref().map(|c| c.instance_dir.clone());
        let mut config = from_file.unwrap_or_default();
        config.instance_dir = resolve_instance_dir(cli_instance_dir, INSTANCE_DIR_ENV, file_dir);
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.refresh_interval_secs == 0 {
            return Err(Error::InvalidInput(
                "refresh_interval_secs must be greater than zero".to_string(),
            ));
        }
        if self.page_size == 0 {
            return Err(Error::InvalidInput(
                "page_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn photos_dir(&self) -> PathBuf {
        self.instance_dir.join("photos")
    }

    pub fn extra_records_path(&self) -> PathBuf {
        self.instance_dir.join("extra").join("missionaries.json")
    }

    pub fn database_path(&self) -> PathBuf {
        self.instance_dir.join("mboard.db")
    }
}

/// Instance folder resolution in priority order
pub fn resolve_instance_dir(
    cli_arg: Option<&str>,
    env_var_name: &str,
    config_value: Option<PathBuf>,
) -> PathBuf {
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = config_value {
        return path;
    }

    default_instance_dir()
}

/// OS-dependent default instance folder
fn default_instance_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("mboard"))
        .unwrap_or_else(|| PathBuf::from("./instance"))
}
