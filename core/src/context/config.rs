//! Engine configuration
//!
//! Persisted with confy as TOML under the `holocron` app name. Every field has
//! a serde default so older or partial config files keep loading.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::error::ConfigError;

const APP_NAME: &str = "holocron";
const CONFIG_NAME: &str = "config";

fn default_log_directory() -> String {
    #[cfg(target_os = "windows")]
    {
        dirs::document_dir()
            .map(|p| p.join("Star Wars - The Old Republic/CombatLogs"))
            .and_then(|p| p.to_str().map(String::from))
            .unwrap_or_default()
    }
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        dirs::home_dir()
            .map(|p| {
                p.join(".local/share/Steam/steamapps/compatdata/1286830/pfx/drive_c/users/steamuser/Documents/Star Wars - The Old Republic/CombatLogs")
            })
            .and_then(|p| p.to_str().map(String::from))
            .unwrap_or_default()
    }
    #[cfg(target_os = "macos")]
    {
        String::new()
    }
}

fn default_poll_interval_ms() -> u64 {
    250
}
fn default_stale_after_secs() -> u64 {
    300
}
fn default_combat_timeout_secs() -> i64 {
    60
}
fn default_post_combat_grace_ms() -> i64 {
    5_000
}
fn default_shield_grace_ms() -> i64 {
    4_250
}
fn default_max_reaction_ms() -> i64 {
    10_000
}
fn default_fast_reaction_ms() -> i64 {
    2_000
}
fn default_burst_window_secs() -> usize {
    20
}
fn default_burst_refresh_secs() -> i64 {
    50
}
fn default_big_hit_fraction() -> f64 {
    0.05
}
fn default_cooldown_min_samples() -> usize {
    2
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_log_directory")]
    pub log_directory: String,
    /// Keep polling a log even when it has not been written to for a while
    #[serde(default)]
    pub force_log_updates: bool,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_stale_after_secs")]
    pub stale_after_secs: u64,
    #[serde(default = "default_combat_timeout_secs")]
    pub combat_timeout_secs: i64,
    #[serde(default = "default_post_combat_grace_ms")]
    pub post_combat_grace_ms: i64,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Tunables for the derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// How long after a shield drops an absorb can still be credited to it
    #[serde(default = "default_shield_grace_ms")]
    pub shield_grace_ms: i64,
    #[serde(default = "default_max_reaction_ms")]
    pub max_reaction_ms: i64,
    #[serde(default = "default_fast_reaction_ms")]
    pub fast_reaction_ms: i64,
    #[serde(default = "default_burst_window_secs")]
    pub burst_window_secs: usize,
    #[serde(default = "default_burst_refresh_secs")]
    pub burst_refresh_secs: i64,
    /// Share of the target's max health a hit (or one second of hits) needs to count as big
    #[serde(default = "default_big_hit_fraction")]
    pub big_hit_fraction: f64,
    /// Hits per ability needed on both sides of a cooldown before savings are estimated
    #[serde(default = "default_cooldown_min_samples")]
    pub cooldown_min_samples: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_directory: default_log_directory(),
            force_log_updates: false,
            poll_interval_ms: default_poll_interval_ms(),
            stale_after_secs: default_stale_after_secs(),
            combat_timeout_secs: default_combat_timeout_secs(),
            post_combat_grace_ms: default_post_combat_grace_ms(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            shield_grace_ms: default_shield_grace_ms(),
            max_reaction_ms: default_max_reaction_ms(),
            fast_reaction_ms: default_fast_reaction_ms(),
            burst_window_secs: default_burst_window_secs(),
            burst_refresh_secs: default_burst_refresh_secs(),
            big_hit_fraction: default_big_hit_fraction(),
            cooldown_min_samples: default_cooldown_min_samples(),
        }
    }
}

impl EngineConfig {
    /// Load the stored config, falling back to defaults when none exists or it
    /// is unreadable or invalid.
    pub fn load() -> Self {
        let loaded: Result<Self, confy::ConfyError> = confy::load(APP_NAME, CONFIG_NAME);
        match loaded {
            Ok(config) => match config.validate() {
                Ok(()) => config,
                Err(err) => {
                    tracing::warn!(error = %err, "invalid config, using defaults");
                    Self::default()
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "failed to load config, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.validate()?;
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Store)
    }

    pub fn config_path() -> Result<PathBuf, ConfigError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).map_err(ConfigError::Locate)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the streamer or the metrics cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });
        if self.poll_interval_ms == 0 {
            return invalid("poll_interval_ms", "must be positive");
        }
        if self.combat_timeout_secs <= 0 {
            return invalid("combat_timeout_secs", "must be positive");
        }
        if self.post_combat_grace_ms < 0 {
            return invalid("post_combat_grace_ms", "must not be negative");
        }
        let analysis = &self.analysis;
        if analysis.shield_grace_ms < 0 {
            return invalid("analysis.shield_grace_ms", "must not be negative");
        }
        if analysis.burst_window_secs == 0 {
            return invalid("analysis.burst_window_secs", "must be positive");
        }
        if !(analysis.big_hit_fraction > 0.0 && analysis.big_hit_fraction <= 1.0) {
            return invalid("analysis.big_hit_fraction", "must be in (0, 1]");
        }
        if analysis.fast_reaction_ms > analysis.max_reaction_ms {
            return invalid("analysis.fast_reaction_ms", "must not exceed max_reaction_ms");
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_after_secs)
    }

    /// Resolve a log file path, joining with log_directory if relative.
    pub fn resolve_log_path(&self, path: &std::path::Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::path::Path::new(&self.log_directory).join(path)
        }
    }
}
