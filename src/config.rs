use crate::analysis::recommender::BanPhasePolicy;
use crate::analysis::roles::RoleTargets;
use crate::analysis::scoring::{CoefficientBounds, ScoreWeights};
use crate::error::DraftError;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Environment-level settings for the CLI surface.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the hero catalog and statistics snapshots.
    pub data_dir: PathBuf,
    /// Lookback window for the meta reduction, in days.
    pub lookback_days: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, DraftError> {
        dotenvy::dotenv().ok();

        let data_dir = match env::var("DRAFT_DATA_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".draft_sensei"),
        };

        let lookback_days = match env::var("DRAFT_LOOKBACK_DAYS") {
            Ok(value) => value.parse().map_err(|_| {
                DraftError::ConfigError(format!(
                    "DRAFT_LOOKBACK_DAYS must be a number of days, got '{}'",
                    value
                ))
            })?,
            Err(_) => 30,
        };

        Ok(Config {
            data_dir,
            lookback_days,
        })
    }
}

/// The engine's tunable constants: scoring weights, role targets, ban-phase
/// policy, and the coefficient normalization bounds. Every field defaults to
/// the documented policy values; the surrounding system may override them
/// (the CLI reads `engine.json` from the data directory).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub weights: ScoreWeights,
    pub bounds: CoefficientBounds,
    pub role_targets: RoleTargets,
    pub ban_policy: BanPhasePolicy,
    /// How many suggestions to return when the caller does not say.
    pub suggestion_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            weights: ScoreWeights::default(),
            bounds: CoefficientBounds::default(),
            role_targets: RoleTargets::default(),
            ban_policy: BanPhasePolicy::default(),
            suggestion_limit: 5,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), DraftError> {
        if !self.weights.is_normalized() {
            return Err(DraftError::ConfigError(format!(
                "scoring weights must sum to 1.0, got {:.4}",
                self.weights.sum()
            )));
        }
        if self.bounds.max <= self.bounds.min {
            return Err(DraftError::ConfigError(
                "coefficient bounds must satisfy min < max".to_string(),
            ));
        }
        if self.role_targets.total() == 0 {
            return Err(DraftError::ConfigError(
                "role targets must cover at least one slot".to_string(),
            ));
        }
        if self.suggestion_limit == 0 {
            return Err(DraftError::ConfigError(
                "suggestion limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
