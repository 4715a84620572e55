use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One recorded match outcome for a hero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub hero: String,
    /// Performance score on a 0-100 scale.
    pub performance: f64,
    pub won: bool,
    pub timestamp: DateTime<Utc>,
}

/// A hero's rolling-window reduction: average performance and win rate over
/// the records inside the lookback window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetaStat {
    pub games: usize,
    /// 0-100 scale.
    pub avg_performance: f64,
    /// 0.0-1.0 fraction.
    pub win_rate: f64,
}

impl MetaStat {
    /// Reduces the records with timestamps at or after `cutoff`.
    /// Returns None when nothing falls inside the window; the scoring
    /// engine treats that as neutral rather than as an error.
    pub fn from_records<'a>(
        records: impl IntoIterator<Item = &'a MatchRecord>,
        cutoff: DateTime<Utc>,
    ) -> Option<MetaStat> {
        let mut games = 0usize;
        let mut performance_total = 0.0;
        let mut wins = 0usize;

        for record in records {
            if record.timestamp < cutoff {
                continue;
            }
            games += 1;
            performance_total += record.performance;
            if record.won {
                wins += 1;
            }
        }

        if games == 0 {
            return None;
        }

        Some(MetaStat {
            games,
            avg_performance: performance_total / games as f64,
            win_rate: wins as f64 / games as f64,
        })
    }
}

/// Per-(player, hero) preference: a weight in [0.0, 2.0] where 1.0 is
/// neutral, plus the observed win rate (0-100) on that hero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PreferenceWeight {
    pub weight: f64,
    pub win_rate: f64,
}

/// Accumulates match records per hero and reduces them to MetaStats over a
/// caller-specified lookback window.
#[derive(Debug, Default)]
pub struct MetaTracker {
    records: HashMap<String, Vec<MatchRecord>>,
}

impl MetaTracker {
    pub fn new() -> Self {
        MetaTracker {
            records: HashMap::new(),
        }
    }

    pub fn add_record(&mut self, record: MatchRecord) {
        self.records
            .entry(record.hero.clone())
            .or_default()
            .push(record);
    }

    /// Reduces every requested hero that has in-window history. Heroes with
    /// no usable records are simply absent from the result map.
    pub fn stats(
        &self,
        hero_ids: &[String],
        lookback_days: i64,
        now: DateTime<Utc>,
    ) -> HashMap<String, MetaStat> {
        let cutoff = now - Duration::days(lookback_days);
        let mut stats = HashMap::new();
        for hero in hero_ids {
            if let Some(records) = self.records.get(hero) {
                if let Some(stat) = MetaStat::from_records(records, cutoff) {
                    stats.insert(hero.clone(), stat);
                }
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(hero: &str, performance: f64, won: bool, days_ago: i64, now: DateTime<Utc>) -> MatchRecord {
        MatchRecord {
            hero: hero.to_string(),
            performance,
            won,
            timestamp: now - Duration::days(days_ago),
        }
    }

    #[test]
    fn reduces_only_records_inside_window() {
        let now = Utc::now();
        let mut tracker = MetaTracker::new();
        tracker.add_record(record("Yin", 80.0, true, 5, now));
        tracker.add_record(record("Yin", 40.0, false, 10, now));
        tracker.add_record(record("Yin", 90.0, true, 60, now));

        let stats = tracker.stats(&["Yin".to_string()], 30, now);
        let stat = stats["Yin"];
        assert_eq!(stat.games, 2);
        assert!((stat.avg_performance - 60.0).abs() < 1e-12);
        assert!((stat.win_rate - 0.5).abs() < 1e-12);
    }

    #[test]
    fn hero_with_no_usable_history_is_absent() {
        let now = Utc::now();
        let mut tracker = MetaTracker::new();
        tracker.add_record(record("Yin", 80.0, true, 90, now));

        let stats = tracker.stats(&["Yin".to_string(), "Atlas".to_string()], 30, now);
        assert!(stats.is_empty());
    }

    #[test]
    fn empty_record_set_reduces_to_none() {
        let now = Utc::now();
        assert_eq!(MetaStat::from_records(std::iter::empty::<&MatchRecord>(), now), None);
    }
}
