//! Application configuration for goldkey.
//!
//! User config lives at `~/.goldkey/goldkey.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{GoldkeyError, Result};
use crate::types::Source;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "goldkey.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".goldkey";

// ---------------------------------------------------------------------------
// Config structs (matching goldkey.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Naver open search API settings.
    #[serde(default)]
    pub naver: NaverConfig,

    /// Keyword tool (search volume / related keywords / CPC) settings.
    #[serde(default)]
    pub keyword_tool: KeywordToolConfig,

    /// Scoring and ranking policy.
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Seed sources, queried in the order listed.
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Directory where `data.json` is written.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Maximum related keywords taken per seed.
    #[serde(default = "default_expansion_limit")]
    pub expansion_limit: usize,

    /// Minimum ms between successive calls to the same provider.
    #[serde(default = "default_request_delay")]
    pub request_delay_ms: u64,

    /// Per-request HTTP timeout.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Whether to run the one-hop expansion stage.
    #[serde(default = "default_true")]
    pub expand: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            expansion_limit: default_expansion_limit(),
            request_delay_ms: default_request_delay(),
            timeout_secs: default_timeout(),
            expand: true,
        }
    }
}

fn default_output_dir() -> String {
    "output".into()
}
fn default_expansion_limit() -> usize {
    3
}
fn default_request_delay() -> u64 {
    100
}
fn default_timeout() -> u64 {
    5
}
fn default_true() -> bool {
    true
}

/// `[naver]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaverConfig {
    #[serde(default = "default_naver_base_url")]
    pub base_url: String,

    /// Name of the env var holding the client id (never store the value itself).
    #[serde(default = "default_naver_id_env")]
    pub client_id_env: String,

    /// Name of the env var holding the client secret.
    #[serde(default = "default_naver_secret_env")]
    pub client_secret_env: String,
}

impl Default for NaverConfig {
    fn default() -> Self {
        Self {
            base_url: default_naver_base_url(),
            client_id_env: default_naver_id_env(),
            client_secret_env: default_naver_secret_env(),
        }
    }
}

fn default_naver_base_url() -> String {
    "https://openapi.naver.com".into()
}
fn default_naver_id_env() -> String {
    "NAVER_CLIENT_ID".into()
}
fn default_naver_secret_env() -> String {
    "NAVER_CLIENT_SECRET".into()
}

/// `[keyword_tool]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordToolConfig {
    #[serde(default = "default_keyword_tool_base_url")]
    pub base_url: String,

    #[serde(default = "default_ad_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_ad_customer_env")]
    pub customer_id_env: String,

    /// Look up cost-per-click for every candidate.
    #[serde(default)]
    pub cpc: bool,
}

impl Default for KeywordToolConfig {
    fn default() -> Self {
        Self {
            base_url: default_keyword_tool_base_url(),
            api_key_env: default_ad_key_env(),
            customer_id_env: default_ad_customer_env(),
            cpc: false,
        }
    }
}

fn default_keyword_tool_base_url() -> String {
    "https://api.searchad.naver.com".into()
}
fn default_ad_key_env() -> String {
    "NAVER_AD_API_KEY".into()
}
fn default_ad_customer_env() -> String {
    "NAVER_AD_CUSTOMER_ID".into()
}

/// How ties on equal score are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Search volume descending, then canonical keyword ascending.
    #[default]
    VolumeThenKeyword,
    /// Score only; equal scores keep collection order.
    ScoreOnly,
}

impl std::str::FromStr for TieBreak {
    type Err = GoldkeyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "volume-then-keyword" => Ok(Self::VolumeThenKeyword),
            "score-only" => Ok(Self::ScoreOnly),
            other => Err(GoldkeyError::config(format!(
                "unknown tie_break '{other}': expected 'volume-then-keyword' or 'score-only'"
            ))),
        }
    }
}

/// `[scoring]` section.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Clamp the final golden score to 100. Off: the `+10` branch may exceed 100.
    #[serde(default)]
    pub clamp_score: bool,

    #[serde(default)]
    pub tie_break: TieBreak,
}

/// `[[sources]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SourceConfig {
    /// Product titles from the Naver shopping search API.
    NaverShopping {
        #[serde(default = "default_naver_source")]
        source: Source,
        queries: Vec<String>,
        #[serde(default = "default_display")]
        display: u32,
    },
    /// Element text scraped from a trending page.
    Html {
        source: Source,
        url: String,
        selector: String,
    },
    /// A fixed keyword list.
    Static {
        source: Source,
        keywords: Vec<String>,
    },
}

impl SourceConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NaverShopping { .. } => "naver-shopping",
            Self::Html { .. } => "html",
            Self::Static { .. } => "static",
        }
    }
}

fn default_naver_source() -> Source {
    Source::Naver
}
fn default_display() -> u32 {
    20
}

// ---------------------------------------------------------------------------
// Pipeline config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime pipeline configuration - merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum related keywords taken per seed.
    pub expansion_limit: usize,
    /// Whether to run the expansion stage at all.
    pub expand: bool,
    /// Pacing delay between calls to the same provider.
    pub request_delay: Duration,
    pub scoring: ScoringConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for PipelineConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            expansion_limit: config.defaults.expansion_limit,
            expand: config.defaults.expand,
            request_delay: Duration::from_millis(config.defaults.request_delay_ms),
            scoring: config.scoring,
        }
    }
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Read a credential from the env var named in config.
/// Returns `None` when unset or empty.
pub fn read_credential(var_name: &str) -> Option<String> {
    match std::env::var(var_name) {
        Ok(val) if !val.trim().is_empty() => Some(val),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.goldkey/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| GoldkeyError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.goldkey/goldkey.toml`).
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
    let content = std::fs::read_to_string(path).map_err(|e| GoldkeyError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| GoldkeyError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| GoldkeyError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| GoldkeyError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| GoldkeyError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
