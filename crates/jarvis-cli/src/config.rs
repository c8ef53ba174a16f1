//! Application configuration.
//!
//! Loaded from an optional TOML file (`--config` or `config/default.toml`)
//! and then overridden by environment variables.  A `.env` file in the
//! working directory is read into the environment first.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jarvis_agent::GeminiConfig;
use jarvis_agent::gemini::{DEFAULT_HISTORY_LEN, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};

/// Configuration file used when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub dispatch: DispatchConfig,
    pub ai: AiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Directory screenshots are written to.
    pub screenshot_dir: PathBuf,
    /// Timeout for process enumeration and termination.
    pub process_timeout_secs: u64,
    /// Look for a screen capture tool at startup.
    pub enable_screenshots: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            screenshot_dir: PathBuf::from("."),
            process_timeout_secs: 10,
            enable_screenshots: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Gemini API key.  The AI is disabled when empty.
    pub api_key: String,
    pub model: String,
    pub use_search_grounding: bool,
    /// Exchanges kept in the rolling conversation history.
    pub history_len: usize,
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.into(),
            use_search_grounding: true,
            history_len: DEFAULT_HISTORY_LEN,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AiConfig {
    /// The Gemini client configuration, or `None` without an API key.
    pub fn gemini(&self) -> Option<GeminiConfig> {
        if self.api_key.trim().is_empty() {
            return None;
        }

        let mut config = GeminiConfig::new(self.api_key.trim());
        config.model = self.model.clone();
        config.use_search_grounding = self.use_search_grounding;
        config.history_len = self.history_len;
        config.timeout_secs = self.timeout_secs;
        Some(config)
    }
}

impl AppConfig {
    /// Load the configuration.
    ///
    /// An explicit `path` must exist.  Without one, [`DEFAULT_CONFIG_PATH`]
    /// is used when present and built-in defaults otherwise.  Returns the
    /// config and the file it was read from.
    pub fn load(path: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        // A missing .env is normal.
        let _ = dotenvy::dotenv();

        let source = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Some(PathBuf::from(DEFAULT_CONFIG_PATH)).filter(|p| p.is_file()),
        };

        let mut config = match &source {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok((config, source))
    }

    /// Parse a TOML configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Apply environment overrides read through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(level) = lookup("JARVIS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(dir) = lookup("JARVIS_SCREENSHOT_DIR") {
            self.dispatch.screenshot_dir = PathBuf::from(dir);
        }
        if let Some(secs) = lookup("JARVIS_PROCESS_TIMEOUT_SECS") {
            self.dispatch.process_timeout_secs = secs
                .trim()
                .parse::<u64>()
                .with_context(|| format!("invalid JARVIS_PROCESS_TIMEOUT_SECS: {secs}"))?;
        }
        if let Some(key) = lookup("GEMINI_API_KEY") {
            self.ai.api_key = key;
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            self.ai.model = model;
        }
        if let Some(flag) = lookup("USE_SEARCH_GROUNDING") {
            self.ai.use_search_grounding = flag.trim().eq_ignore_ascii_case("true");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.dispatch.process_timeout_secs, 10);
        assert_eq!(config.ai.model, "gemini-2.5-flash");
        assert!(config.ai.gemini().is_none());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jarvis.toml");
        std::fs::write(
            &path,
            "[dispatch]\nscreenshot_dir = \"/tmp/shots\"\n\n[ai]\nhistory_len = 4\n",
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.dispatch.screenshot_dir, PathBuf::from("/tmp/shots"));
        assert_eq!(config.dispatch.process_timeout_secs, 10);
        assert_eq!(config.ai.history_len, 4);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[dispatch\n").unwrap();
        assert!(AppConfig::from_file(&path).is_err());
    }

    #[test]
    fn environment_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(env(&[
                ("JARVIS_LOG_LEVEL", "debug"),
                ("JARVIS_PROCESS_TIMEOUT_SECS", " 3 "),
                ("GEMINI_API_KEY", "secret"),
                ("USE_SEARCH_GROUNDING", "FALSE"),
            ]))
            .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.dispatch.process_timeout_secs, 3);
        assert!(!config.ai.use_search_grounding);

        let gemini = config.ai.gemini().unwrap();
        assert_eq!(gemini.api_key, "secret");
        assert!(!gemini.use_search_grounding);
    }

    #[test]
    fn bad_timeout_override() {
        let mut config = AppConfig::default();
        let result = config.apply_overrides(env(&[("JARVIS_PROCESS_TIMEOUT_SECS", "soon")]));
        assert!(result.is_err());
    }

    #[test]
    fn shipped_default_config_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/default.toml");
        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
