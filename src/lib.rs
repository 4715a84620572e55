//! Hero draft recommendation engine for 5v5 drafting.
//!
//! The core ranks candidate heroes against a draft state using five weighted
//! signals (synergy, counter, role balance, meta, player preference) and
//! evaluates finished compositions. All operations are pure, synchronous
//! computations over immutable catalog and statistics snapshots supplied by
//! the caller, so concurrent calls need no coordination.

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod display;
pub mod draft;
pub mod error;
pub mod store;

// Re-export the surface most callers need.
pub use analysis::analyzer::{BestPartner, CompositionAnalyzer, CompositionReport, CounterThreat};
pub use analysis::matrix::SynergyMatrix;
pub use analysis::meta::{MatchRecord, MetaStat, MetaTracker, PreferenceWeight};
pub use analysis::recommender::{BanPhasePolicy, DraftRecommender};
pub use analysis::roles::{RoleBalance, RoleTargets};
pub use analysis::scoring::{
    CoefficientBounds, FactorScores, ScoreWeights, ScoredCandidate, ScoringContext, ScoringEngine,
};
pub use catalog::{BaseStats, Hero, HeroCatalog, Role};
pub use config::{Config, EngineConfig};
pub use draft::{BanPhase, DraftState, MAX_TEAM_SIZE};
pub use error::DraftError;
pub use store::DataStore;
