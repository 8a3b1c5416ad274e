//! Configuration for animation defaults and draft seeds.
//!
//! Files are YAML (`.yaml`/`.yml`) or TOML (`.toml`). Every field has a
//! default, so a partial file only overrides what it names.

use crate::animation::{Easing, DEFAULT_DURATION_MS};
use crate::count_up::CountUpOptions;
use crate::draft::{CampaignDraft, DEFAULT_RATE_PER_K_VIEWS, DEFAULT_TOTAL_BUDGET};
use crate::error::ConfigError;
use crate::format::DisplayFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Longest run a config may ask for.
pub const MAX_DURATION_MS: f64 = 60_000.0;

/// Highest frame rate a headless driver will step at.
pub const MAX_FPS: u32 = 240;

/// Count-up animation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Run length in milliseconds.
    pub duration_ms: f64,
    pub easing: Easing,
    /// When false, values are shown without counting up.
    pub animate: bool,
    /// Frame rate used by headless drivers.
    pub fps: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            easing: Easing::CubicOut,
            animate: true,
            fps: 60,
        }
    }
}

impl AnimationConfig {
    /// Milliseconds between frames at the configured rate.
    #[must_use]
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / f64::from(self.fps.max(1))
    }
}

/// Seed values for a new campaign draft.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftDefaults {
    pub rate_per_k_views: f64,
    pub total_budget: f64,
}

impl Default for DraftDefaults {
    fn default() -> Self {
        Self {
            rate_per_k_views: DEFAULT_RATE_PER_K_VIEWS,
            total_budget: DEFAULT_TOTAL_BUDGET,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignKitConfig {
    pub animation: AnimationConfig,
    pub draft: DraftDefaults,
}

impl CampaignKitConfig {
    /// Search paths, in order: `$XDG_CONFIG_HOME/campaignkit/config.yaml`,
    /// `~/.config/campaignkit/config.yaml`.
    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg_config).join("campaignkit/config.yaml"));
        }
        if let Ok(home) = std::env::var("HOME") {
            paths.push(PathBuf::from(home).join(".config/campaignkit/config.yaml"));
        }
        paths
    }

    /// Load the first config found on the search paths, falling back to
    /// defaults. Unreadable or invalid files are skipped with a warning.
    pub fn load() -> Self {
        for path in Self::config_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(config) => {
                    log::debug!("loaded config from {}", path.display());
                    return config;
                }
                Err(e) => log::warn!("ignoring config {}: {e}", path.display()),
            }
        }
        Self::default()
    }

    /// Load and validate a config file, choosing the parser by extension.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let contents = match extension.as_str() {
            "yaml" | "yml" | "toml" => fs::read_to_string(path)?,
            other => return Err(ConfigError::UnsupportedExtension(other.to_string())),
        };
        if extension == "toml" {
            Self::from_toml_str(&contents)
        } else {
            Self::from_yaml_str(&contents)
        }
    }

    /// Parse and validate YAML.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate TOML.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no animation or draft could use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let duration = self.animation.duration_ms;
        if !duration.is_finite() || duration < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "animation.duration_ms must be a non-negative number, got {duration}"
            )));
        }
        if duration > MAX_DURATION_MS {
            return Err(ConfigError::Invalid(format!(
                "animation.duration_ms must be at most {MAX_DURATION_MS}, got {duration}"
            )));
        }
        let fps = self.animation.fps;
        if fps == 0 || fps > MAX_FPS {
            return Err(ConfigError::Invalid(format!(
                "animation.fps must be between 1 and {MAX_FPS}, got {fps}"
            )));
        }
        if !self.draft.rate_per_k_views.is_finite() || !self.draft.total_budget.is_finite() {
            return Err(ConfigError::Invalid("draft seeds must be finite".into()));
        }
        Ok(())
    }

    /// Empty draft carrying the configured seeds.
    #[must_use]
    pub const fn seed_draft(&self) -> CampaignDraft {
        CampaignDraft::seeded(self.draft.rate_per_k_views, self.draft.total_budget)
    }

    /// Count-up options for `format` under this config.
    #[must_use]
    pub const fn count_up_options(&self, format: DisplayFormat) -> CountUpOptions {
        CountUpOptions {
            format,
            duration_ms: self.animation.duration_ms,
            easing: self.animation.easing,
            animate: self.animation.animate,
        }
    }

    /// Default configuration as a commented YAML document.
    pub fn default_yaml() -> String {
        r"# campaignkit configuration
# Location: ~/.config/campaignkit/config.yaml

animation:
  duration_ms: 1000   # at most 60000
  easing: cubic_out   # linear | quad_out | cubic_in | cubic_out | cubic_in_out
  animate: true
  fps: 60             # 1 to 240

draft:
  rate_per_k_views: 1.5
  total_budget: 1000
"
        .to_string()
    }
}
