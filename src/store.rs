use crate::analysis::meta::{MatchRecord, MetaStat, MetaTracker, PreferenceWeight};
use crate::catalog::{Hero, HeroCatalog};
use crate::config::EngineConfig;
use crate::error::DraftError;
use chrono::Utc;
use log::{debug, warn};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const CATALOG_FILE: &str = "heroes.json";
const MATCHES_FILE: &str = "matches.json";
const PREFERENCES_FILE: &str = "preferences.json";
const ENGINE_FILE: &str = "engine.json";

/// Shape of preferences.json: player id -> hero name -> preference.
type PreferenceFile = HashMap<String, HashMap<String, PreferenceWeight>>;

/// File-backed snapshot store. Owns nothing but a directory path; every
/// fetch reads the current snapshot from disk so the core always works on
/// the data the surrounding system last wrote.
pub struct DataStore {
    data_dir: PathBuf,
}

impl DataStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        DataStore {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full hero catalog snapshot.
    pub fn fetch_catalog(&self) -> Result<HeroCatalog, DraftError> {
        let path = self.data_dir.join(CATALOG_FILE);
        let content = fs::read_to_string(&path).map_err(|_| {
            DraftError::DataUnavailable(format!("hero catalog not found at {}", path.display()))
        })?;

        let heroes: Vec<Hero> = serde_json::from_str(&content)
            .map_err(|e| DraftError::JsonError(format!("failed to parse hero catalog: {}", e)))?;

        debug!("loaded {} heroes from {}", heroes.len(), path.display());
        HeroCatalog::from_heroes(heroes)
    }

    /// Meta statistics for the requested heroes, reduced over the lookback
    /// window. Heroes without in-window history are absent from the map;
    /// the scoring engine treats them as neutral.
    pub fn fetch_meta_stats(
        &self,
        hero_ids: &[String],
        lookback_days: i64,
    ) -> Result<HashMap<String, MetaStat>, DraftError> {
        let path = self.data_dir.join(MATCHES_FILE);
        let content = fs::read_to_string(&path).map_err(|_| {
            DraftError::DataUnavailable(format!("match history not found at {}", path.display()))
        })?;

        let records: Vec<MatchRecord> = serde_json::from_str(&content)
            .map_err(|e| DraftError::JsonError(format!("failed to parse match history: {}", e)))?;

        let mut tracker = MetaTracker::new();
        for record in records {
            tracker.add_record(record);
        }

        let stats = tracker.stats(hero_ids, lookback_days, Utc::now());
        debug!(
            "reduced meta stats for {}/{} heroes over {} days",
            stats.len(),
            hero_ids.len(),
            lookback_days
        );
        Ok(stats)
    }

    /// Preference weights for one player, filtered to the requested heroes.
    /// Weights outside [0,2] are clamped rather than rejected.
    pub fn fetch_preferences(
        &self,
        player_id: &str,
        hero_ids: &[String],
    ) -> Result<HashMap<String, PreferenceWeight>, DraftError> {
        let path = self.data_dir.join(PREFERENCES_FILE);
        let content = fs::read_to_string(&path).map_err(|_| {
            DraftError::DataUnavailable(format!("preferences not found at {}", path.display()))
        })?;

        let all: PreferenceFile = serde_json::from_str(&content)
            .map_err(|e| DraftError::JsonError(format!("failed to parse preferences: {}", e)))?;

        let player = all.get(player_id).ok_or_else(|| {
            DraftError::DataUnavailable(format!("no preferences recorded for '{}'", player_id))
        })?;

        let mut preferences = HashMap::new();
        for hero in hero_ids {
            if let Some(pref) = player.get(hero) {
                let mut pref = *pref;
                if !(0.0..=2.0).contains(&pref.weight) {
                    warn!(
                        "clamping out-of-range preference weight {} for '{}'",
                        pref.weight, hero
                    );
                    pref.weight = pref.weight.clamp(0.0, 2.0);
                }
                preferences.insert(hero.clone(), pref);
            }
        }
        Ok(preferences)
    }

    /// Engine constants, with documented defaults when no override file
    /// exists. A present-but-invalid override is a configuration error,
    /// never silently ignored.
    pub fn load_engine_config(&self) -> Result<EngineConfig, DraftError> {
        let path = self.data_dir.join(ENGINE_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => return Ok(EngineConfig::default()),
        };

        let config: EngineConfig = serde_json::from_str(&content).map_err(|e| {
            DraftError::ConfigError(format!("failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        debug!("loaded engine overrides from {}", path.display());
        Ok(config)
    }
}
