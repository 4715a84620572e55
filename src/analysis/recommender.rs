use crate::analysis::matrix::SynergyMatrix;
use crate::analysis::scoring::{ScoreWeights, ScoredCandidate, ScoringContext, ScoringEngine};
use crate::catalog::{Hero, HeroCatalog};
use crate::config::EngineConfig;
use crate::draft::{BanPhase, DraftState};
use crate::error::DraftError;
use log::debug;
use serde::Deserialize;
use std::cmp::Ordering;

/// How much scoring weight shifts between counter and synergy per ban
/// phase. First phase leans toward denying raw counter threats, second
/// phase toward breaking the synergy core the enemy is assembling.
/// A tunable policy, not a structural change to the algorithm.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct BanPhasePolicy {
    pub counter_shift: f64,
    pub synergy_shift: f64,
}

impl Default for BanPhasePolicy {
    fn default() -> Self {
        BanPhasePolicy {
            counter_shift: 0.05,
            synergy_shift: 0.05,
        }
    }
}

impl BanPhasePolicy {
    /// Moves weight between the counter and synergy factors; the sum of
    /// weights is preserved, so composite scores stay in [0,1].
    pub fn adjust(&self, base: ScoreWeights, phase: BanPhase) -> ScoreWeights {
        let mut weights = base;
        match phase {
            BanPhase::First => {
                let shift = self.counter_shift.min(weights.synergy);
                weights.counter += shift;
                weights.synergy -= shift;
            }
            BanPhase::Second => {
                let shift = self.synergy_shift.min(weights.counter);
                weights.synergy += shift;
                weights.counter -= shift;
            }
        }
        weights
    }
}

/// Orchestrates the scoring engine over the legal candidate pool and
/// returns ranked pick or ban suggestions. Pure per catalog snapshot:
/// identical inputs yield identical ordered output.
pub struct DraftRecommender<'a> {
    catalog: &'a HeroCatalog,
    matrix: &'a SynergyMatrix,
    config: EngineConfig,
}

impl<'a> DraftRecommender<'a> {
    pub fn new(catalog: &'a HeroCatalog, matrix: &'a SynergyMatrix, config: EngineConfig) -> Self {
        DraftRecommender {
            catalog,
            matrix,
            config,
        }
    }

    /// Ranks every legal candidate for the ally team's next pick.
    pub fn suggest_picks(
        &self,
        draft: &DraftState,
        ctx: &ScoringContext,
        limit: Option<usize>,
    ) -> Result<Vec<ScoredCandidate>, DraftError> {
        draft.validate(self.catalog)?;

        let pool: Vec<&Hero> = self
            .catalog
            .heroes()
            .filter(|hero| !draft.is_unavailable(&hero.name))
            .filter(|hero| {
                draft
                    .role_preference
                    .map(|role| hero.role == role)
                    .unwrap_or(true)
            })
            .collect();

        if pool.is_empty() {
            return Err(DraftError::InvalidRequest(
                "no candidate heroes remain for this draft state".to_string(),
            ));
        }
        debug!("scoring {} pick candidates", pool.len());

        let engine = ScoringEngine::new(
            self.catalog,
            self.matrix,
            self.config.weights,
            self.config.bounds,
            self.config.role_targets.clone(),
        );

        let mut scored: Vec<ScoredCandidate> = pool
            .into_iter()
            .map(|hero| engine.score_candidate(hero, &draft.ally_picks, &draft.enemy_picks, ctx))
            .collect();

        rank(&mut scored);
        scored.truncate(limit.unwrap_or(self.config.suggestion_limit));
        Ok(scored)
    }

    /// Ranks ban targets by the threat each hero would pose if the enemy
    /// picked it: the same scoring formula run from the enemy's perspective
    /// (team roles swapped, no player preference), with the phase policy
    /// leaning the weights toward counter- or synergy-denial.
    pub fn suggest_bans(
        &self,
        draft: &DraftState,
        phase: BanPhase,
        ctx: &ScoringContext,
        limit: Option<usize>,
    ) -> Result<Vec<ScoredCandidate>, DraftError> {
        draft.validate(self.catalog)?;

        // Picked heroes are never eligible regardless of phase; neither are
        // heroes already banned.
        let pool: Vec<&Hero> = self
            .catalog
            .heroes()
            .filter(|hero| !draft.is_unavailable(&hero.name))
            .collect();

        if pool.is_empty() {
            return Err(DraftError::InvalidRequest(
                "no heroes remain eligible to ban".to_string(),
            ));
        }
        debug!("scoring {} ban candidates for {} phase", pool.len(), phase);

        let weights = self.config.ban_policy.adjust(self.config.weights, phase);
        let engine = ScoringEngine::new(
            self.catalog,
            self.matrix,
            weights,
            self.config.bounds,
            self.config.role_targets.clone(),
        );

        let ban_ctx = ctx.without_preferences();
        let mut scored: Vec<ScoredCandidate> = pool
            .into_iter()
            .map(|hero| {
                engine.score_candidate(hero, &draft.enemy_picks, &draft.ally_picks, &ban_ctx)
            })
            .collect();

        rank(&mut scored);
        scored.truncate(limit.unwrap_or(self.config.suggestion_limit));
        Ok(scored)
    }
}

/// Descending by composite score; equal scores fall back to ascending hero
/// name so the ranking is deterministic.
fn rank(scored: &mut [ScoredCandidate]) {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.hero.cmp(&b.hero))
    });
}
