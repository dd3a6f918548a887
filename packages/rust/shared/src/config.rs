//! Application configuration for PaperWright.
//!
//! User config lives at `~/.paperwright/paperwright.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PaperwrightError, Result};
use crate::types::WorkKind;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "paperwright.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".paperwright";

// ---------------------------------------------------------------------------
// Config structs (matching paperwright.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Pricing table.
    #[serde(default)]
    pub pricing: PricingConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default document length in pages.
    #[serde(default = "default_page_count")]
    pub page_count: u32,

    /// Sources requested from the provider per document.
    #[serde(default = "default_source_limit")]
    pub source_limit: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            page_count: default_page_count(),
            source_limit: default_source_limit(),
        }
    }
}

fn default_page_count() -> u32 {
    crate::types::DEFAULT_PAGE_COUNT
}
fn default_source_limit() -> usize {
    5
}

/// `[pricing]` section — per-deployment pricing table.
///
/// Amounts are whole currency units, constant per work kind. Page count
/// does not scale the amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Price of a coursework.
    #[serde(default = "default_coursework_amount")]
    pub coursework: u64,

    /// Price of a report.
    #[serde(default = "default_report_amount")]
    pub report: u64,

    /// Currency code attached to every quote and payment request.
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            coursework: default_coursework_amount(),
            report: default_report_amount(),
            currency: default_currency(),
        }
    }
}

impl PricingConfig {
    /// Look up the configured amount for a work kind.
    pub fn amount_for(&self, kind: WorkKind) -> u64 {
        match kind {
            WorkKind::Coursework => self.coursework,
            WorkKind::Report => self.report,
        }
    }
}

fn default_coursework_amount() -> u64 {
    500
}
fn default_report_amount() -> u64 {
    300
}
fn default_currency() -> String {
    "RUB".into()
}

// ---------------------------------------------------------------------------
// Compose config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime composition defaults — merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct ComposeConfig {
    /// Document length in pages when the request does not specify one.
    pub page_count: u32,
    /// Number of sources requested from the provider.
    pub source_limit: usize,
}

impl From<&AppConfig> for ComposeConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            page_count: config.defaults.page_count,
            source_limit: config.defaults.source_limit,
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.paperwright/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| PaperwrightError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.paperwright/paperwright.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| PaperwrightError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        PaperwrightError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| PaperwrightError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| PaperwrightError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| PaperwrightError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
