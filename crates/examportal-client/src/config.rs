//! Client configuration and service factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use examportal_core::navigation::DEFAULT_RESULT_PAGE;
use examportal_core::traits::ScoringService;

use crate::http::HttpScoringService;

/// Top-level examportal configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamportalConfig {
    /// Base URL of the scoring service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds. Unset means no timeout.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Page the submission flow navigates to.
    #[serde(default = "default_result_page")]
    pub result_page: String,
    /// Where rendered result pages are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}
fn default_result_page() -> String {
    DEFAULT_RESULT_PAGE.to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./examportal-results")
}

impl Default for ExamportalConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            result_page: default_result_page(),
            output_dir: default_output_dir(),
        }
    }
}

/// Expand `${VAR}` references in a config value.
///
/// Unset variables expand to nothing; expanded text is not scanned again. An
/// unterminated `${` is kept literally.
fn resolve_env_vars(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(open) = rest.find("${") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        match after.find('}') {
            Some(close) => {
                out.push_str(&std::env::var(&after[..close]).unwrap_or_default());
                rest = &after[close + 1..];
            }
            None => {
                rest = &rest[open..];
                break;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Load configuration from well-known paths.
///
/// `examportal.toml` in the current directory wins over
/// `~/.config/examportal/config.toml`. `EXAMPORTAL_BASE_URL` overrides the
/// configured base URL.
pub fn load_config() -> Result<ExamportalConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ExamportalConfig> {
    let mut config = match find_config_file(path)? {
        Some(found) => read_config_file(&found)?,
        None => ExamportalConfig::default(),
    };

    let base_url = std::env::var("EXAMPORTAL_BASE_URL").unwrap_or(config.base_url);
    config.base_url = resolve_env_vars(&base_url);
    Ok(config)
}

fn find_config_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(p) = explicit {
        anyhow::ensure!(p.exists(), "config file not found: {}", p.display());
        return Ok(Some(p.to_path_buf()));
    }
    let candidates = [
        Some(PathBuf::from("examportal.toml")),
        dirs_path().map(|dir| dir.join("config.toml")),
    ];
    Ok(candidates.into_iter().flatten().find(|p| p.exists()))
}

fn read_config_file(path: &Path) -> Result<ExamportalConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("failed to parse config: {}", path.display()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("examportal"))
}

/// Create the scoring service described by the configuration.
pub fn create_service(config: &ExamportalConfig) -> Result<Arc<dyn ScoringService>> {
    let service = HttpScoringService::new(&config.base_url, config.timeout_secs)
        .with_context(|| format!("failed to create client for {}", config.base_url))?;
    Ok(Arc::new(service))
}
