use crate::analysis::matrix::SynergyMatrix;
use crate::analysis::meta::{MetaStat, PreferenceWeight};
use crate::analysis::roles::RoleTargets;
use crate::catalog::{Hero, HeroCatalog, Role};
use serde::Deserialize;
use std::collections::HashMap;

/// A sub-score above this marks the factor as notable enough to explain
/// in the candidate's reason list (top quartile of the normalized range).
pub const NOTABLE_THRESHOLD: f64 = 0.75;

/// Sub-score used when a signal source has nothing to say: no enemy picks
/// yet, no match history, no player context.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Weights of the five scoring factors. Counter carries the most weight:
/// reacting to known enemy picks is the primary draft lever.
///
/// Tunable configuration, fixed for the duration of a call; must sum to 1.0
/// so the composite stays in [0,1].
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub synergy: f64,
    pub counter: f64,
    pub role_balance: f64,
    pub meta: f64,
    pub preference: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            synergy: 0.25,
            counter: 0.30,
            role_balance: 0.20,
            meta: 0.15,
            preference: 0.10,
        }
    }
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.synergy + self.counter + self.role_balance + self.meta + self.preference
    }

    pub fn is_normalized(&self) -> bool {
        (self.sum() - 1.0).abs() < 1e-6
    }
}

/// Range the catalog's synergy/counter coefficients live in. Used to map raw
/// coefficients onto [0,1], so a neutral 0.0 lands on the 0.5 midpoint.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct CoefficientBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for CoefficientBounds {
    fn default() -> Self {
        CoefficientBounds {
            min: -1.0,
            max: 1.0,
        }
    }
}

impl CoefficientBounds {
    pub fn normalize(&self, value: f64) -> f64 {
        if self.max <= self.min {
            return NEUTRAL_SCORE;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

/// The five normalized sub-scores behind one composite score.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FactorScores {
    pub synergy: f64,
    pub counter: f64,
    pub role_balance: f64,
    pub meta: f64,
    pub preference: f64,
}

/// One ranked suggestion: the candidate, its composite score, and the
/// reasons that earned it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub hero: String,
    pub role: Role,
    /// Composite score in [0,1].
    pub score: f64,
    /// Confidence in the recommendation, in [0,1].
    pub confidence: f64,
    /// Human-readable justifications, strongest contribution first.
    pub reasons: Vec<String>,
    pub factors: FactorScores,
}

/// Snapshot of the statistics context for one call: recent meta stats per
/// hero, and per-hero preference weights when a player context exists.
#[derive(Debug, Default, Clone)]
pub struct ScoringContext {
    pub meta: HashMap<String, MetaStat>,
    pub preferences: Option<HashMap<String, PreferenceWeight>>,
}

impl ScoringContext {
    /// The same statistics with the player context stripped. Used when
    /// scoring from the enemy's perspective, where our player's comfort
    /// picks say nothing.
    pub fn without_preferences(&self) -> ScoringContext {
        ScoringContext {
            meta: self.meta.clone(),
            preferences: None,
        }
    }
}

/// Computes composite scores for candidate heroes against a draft state.
/// Pure: same catalog snapshot, same inputs, same output.
pub struct ScoringEngine<'a> {
    catalog: &'a HeroCatalog,
    matrix: &'a SynergyMatrix,
    weights: ScoreWeights,
    bounds: CoefficientBounds,
    targets: RoleTargets,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(
        catalog: &'a HeroCatalog,
        matrix: &'a SynergyMatrix,
        weights: ScoreWeights,
        bounds: CoefficientBounds,
        targets: RoleTargets,
    ) -> Self {
        ScoringEngine {
            catalog,
            matrix,
            weights,
            bounds,
            targets,
        }
    }

    /// Scores one candidate against the given ally/enemy picks. The caller
    /// is responsible for excluding picked and banned heroes beforehand.
    pub fn score_candidate(
        &self,
        hero: &Hero,
        allies: &[String],
        enemies: &[String],
        ctx: &ScoringContext,
    ) -> ScoredCandidate {
        let factors = FactorScores {
            synergy: self.synergy_score(hero, allies),
            counter: self.counter_score(hero, enemies),
            role_balance: self.role_score(hero, allies),
            meta: self.meta_score(hero, ctx),
            preference: self.preference_score(hero, ctx),
        };

        let score = self.weights.synergy * factors.synergy
            + self.weights.counter * factors.counter
            + self.weights.role_balance * factors.role_balance
            + self.weights.meta * factors.meta
            + self.weights.preference * factors.preference;

        let reasons = self.collect_reasons(hero, allies, enemies, &factors);
        let confidence = confidence(score, reasons.len());

        ScoredCandidate {
            hero: hero.name.clone(),
            role: hero.role,
            score,
            confidence,
            reasons,
            factors,
        }
    }

    fn synergy_score(&self, hero: &Hero, allies: &[String]) -> f64 {
        let mut team = allies.to_vec();
        team.push(hero.name.clone());
        self.bounds.normalize(self.matrix.team_synergy(&team))
    }

    fn counter_score(&self, hero: &Hero, enemies: &[String]) -> f64 {
        self.bounds
            .normalize(self.matrix.counter_advantage(&hero.name, enemies))
    }

    fn role_score(&self, hero: &Hero, allies: &[String]) -> f64 {
        let ally_roles: Vec<Role> = allies
            .iter()
            .filter_map(|name| self.catalog.role_of(name))
            .collect();
        self.targets.coverage_gain(&ally_roles, hero.role)
    }

    fn meta_score(&self, hero: &Hero, ctx: &ScoringContext) -> f64 {
        match ctx.meta.get(&hero.name) {
            Some(stat) => {
                let performance = (stat.avg_performance / 100.0).clamp(0.0, 1.0);
                let win_rate = stat.win_rate.clamp(0.0, 1.0);
                0.7 * performance + 0.3 * win_rate
            }
            None => NEUTRAL_SCORE,
        }
    }

    fn preference_score(&self, hero: &Hero, ctx: &ScoringContext) -> f64 {
        let preference = ctx
            .preferences
            .as_ref()
            .and_then(|prefs| prefs.get(&hero.name));
        match preference {
            Some(pref) => {
                let weight = (pref.weight / 2.0).clamp(0.0, 1.0);
                let win_rate = (pref.win_rate / 100.0).clamp(0.0, 1.0);
                0.7 * weight + 0.3 * win_rate
            }
            None => NEUTRAL_SCORE,
        }
    }

    /// One reason per notable sub-score, ordered by descending weighted
    /// contribution so the strongest argument leads.
    fn collect_reasons(
        &self,
        hero: &Hero,
        allies: &[String],
        enemies: &[String],
        factors: &FactorScores,
    ) -> Vec<String> {
        let mut entries: Vec<(f64, String)> = Vec::new();

        if factors.synergy >= NOTABLE_THRESHOLD {
            if let Some((partner, _)) = self.matrix.best_partner(&hero.name, allies) {
                entries.push((
                    self.weights.synergy * factors.synergy,
                    format!("Strong synergy with {}", partner),
                ));
            }
        }

        if factors.counter >= NOTABLE_THRESHOLD {
            if let Some(target) = self.most_countered(hero, enemies) {
                entries.push((
                    self.weights.counter * factors.counter,
                    format!("Counters {}", target),
                ));
            }
        }

        if factors.role_balance >= NOTABLE_THRESHOLD {
            entries.push((
                self.weights.role_balance * factors.role_balance,
                format!("Fills the missing {} role", hero.role),
            ));
        }

        if factors.meta >= NOTABLE_THRESHOLD {
            entries.push((
                self.weights.meta * factors.meta,
                "Strong in the recent meta".to_string(),
            ));
        }

        if factors.preference >= NOTABLE_THRESHOLD {
            entries.push((
                self.weights.preference * factors.preference,
                "Comfort pick for this player".to_string(),
            ));
        }

        entries.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        entries.into_iter().map(|(_, reason)| reason).collect()
    }

    fn most_countered(&self, hero: &Hero, enemies: &[String]) -> Option<String> {
        let mut best: Option<(String, f64)> = None;
        for enemy in enemies {
            let strength = self.matrix.counter_of(&hero.name, enemy);
            let better = match &best {
                None => true,
                Some((name, value)) => strength > *value || (strength == *value && enemy < name),
            };
            if better {
                best = Some((enemy.clone(), strength));
            }
        }
        best.map(|(name, _)| name)
    }
}

fn confidence(score: f64, reason_count: usize) -> f64 {
    let from_reasons = (reason_count as f64 / 5.0).min(1.0);
    let combined = 0.7 * score.clamp(0.0, 1.0) + 0.3 * from_reasons;
    (combined * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn hero(name: &str, role: Role) -> Hero {
        Hero {
            name: name.to_string(),
            role,
            stats: Default::default(),
            synergy: HashMap::new(),
            counters: HashMap::new(),
        }
    }

    fn catalog() -> HeroCatalog {
        let mut atlas = hero("Atlas", Role::Tank);
        atlas.synergy.insert("Mira".to_string(), 0.9);
        let mut vex = hero("Vex", Role::Mage);
        vex.counters.insert("Atlas".to_string(), 0.8);
        HeroCatalog::from_heroes(vec![
            atlas,
            vex,
            hero("Mira", Role::Support),
            hero("Rook", Role::Marksman),
        ])
        .unwrap()
    }

    fn engine<'a>(catalog: &'a HeroCatalog, matrix: &'a SynergyMatrix) -> ScoringEngine<'a> {
        ScoringEngine::new(
            catalog,
            matrix,
            ScoreWeights::default(),
            CoefficientBounds::default(),
            RoleTargets::default(),
        )
    }

    #[test]
    fn default_weights_sum_to_one() {
        assert!(ScoreWeights::default().is_normalized());
    }

    #[test]
    fn neutral_coefficient_normalizes_to_midpoint() {
        let bounds = CoefficientBounds::default();
        assert_eq!(bounds.normalize(0.0), 0.5);
        assert_eq!(bounds.normalize(1.0), 1.0);
        assert_eq!(bounds.normalize(-1.0), 0.0);
        assert_eq!(bounds.normalize(5.0), 1.0);
    }

    #[test]
    fn composite_stays_in_unit_interval() {
        let catalog = catalog();
        let matrix = SynergyMatrix::build(&catalog);
        let engine = engine(&catalog, &matrix);
        let ctx = ScoringContext::default();

        let allies = vec!["Atlas".to_string()];
        let enemies = vec!["Vex".to_string()];
        for candidate in catalog.heroes() {
            let scored = engine.score_candidate(candidate, &allies, &enemies, &ctx);
            assert!((0.0..=1.0).contains(&scored.score), "{}", scored.hero);
            assert!((0.0..=1.0).contains(&scored.confidence));
        }
    }

    #[test]
    fn empty_context_scores_neutral_meta_and_preference() {
        let catalog = catalog();
        let matrix = SynergyMatrix::build(&catalog);
        let engine = engine(&catalog, &matrix);
        let scored =
            engine.score_candidate(catalog.get("Rook").unwrap(), &[], &[], &ScoringContext::default());
        assert_eq!(scored.factors.meta, NEUTRAL_SCORE);
        assert_eq!(scored.factors.preference, NEUTRAL_SCORE);
        // No allies and no enemies: both relation factors sit on the midpoint.
        assert_eq!(scored.factors.synergy, NEUTRAL_SCORE);
        assert_eq!(scored.factors.counter, NEUTRAL_SCORE);
    }

    #[test]
    fn deficit_fill_outscores_redundant_role() {
        let catalog = catalog();
        let matrix = SynergyMatrix::build(&catalog);
        let engine = engine(&catalog, &matrix);
        let ctx = ScoringContext::default();
        let allies = vec!["Atlas".to_string()];

        let support = engine.score_candidate(catalog.get("Mira").unwrap(), &allies, &[], &ctx);
        assert_eq!(support.factors.role_balance, 1.0);

        let second_tank = hero("Grok", Role::Tank);
        let tank_score = engine.score_candidate(&second_tank, &allies, &[], &ctx);
        assert_eq!(tank_score.factors.role_balance, 0.0);
    }

    #[test]
    fn notable_factors_produce_ordered_reasons() {
        let catalog = catalog();
        let matrix = SynergyMatrix::build(&catalog);
        let engine = engine(&catalog, &matrix);
        let ctx = ScoringContext::default();

        // Mira with Atlas picked: synergy 0.9 -> 0.95 normalized, fills the
        // missing Support role. Both factors are notable.
        let scored = engine.score_candidate(
            catalog.get("Mira").unwrap(),
            &["Atlas".to_string()],
            &[],
            &ctx,
        );
        assert_eq!(scored.reasons.len(), 2);
        assert_eq!(scored.reasons[0], "Strong synergy with Atlas");
        assert_eq!(scored.reasons[1], "Fills the missing Support role");
    }

    #[test]
    fn counter_reason_names_the_countered_enemy() {
        let catalog = catalog();
        let matrix = SynergyMatrix::build(&catalog);
        let engine = engine(&catalog, &matrix);
        let ctx = ScoringContext::default();

        let scored = engine.score_candidate(
            catalog.get("Vex").unwrap(),
            &[],
            &["Atlas".to_string()],
            &ctx,
        );
        // counter 0.8 -> 0.9 normalized, notable.
        assert!(scored.reasons.contains(&"Counters Atlas".to_string()));
    }

    #[test]
    fn meta_and_preference_blend_into_unit_scores() {
        let catalog = catalog();
        let matrix = SynergyMatrix::build(&catalog);
        let engine = engine(&catalog, &matrix);

        let mut ctx = ScoringContext::default();
        ctx.meta.insert(
            "Rook".to_string(),
            MetaStat {
                games: 10,
                avg_performance: 80.0,
                win_rate: 0.6,
            },
        );
        let mut prefs = HashMap::new();
        prefs.insert(
            "Rook".to_string(),
            PreferenceWeight {
                weight: 1.6,
                win_rate: 70.0,
            },
        );
        ctx.preferences = Some(prefs);

        let scored = engine.score_candidate(catalog.get("Rook").unwrap(), &[], &[], &ctx);
        assert!((scored.factors.meta - (0.7 * 0.8 + 0.3 * 0.6)).abs() < 1e-12);
        assert!((scored.factors.preference - (0.7 * 0.8 + 0.3 * 0.7)).abs() < 1e-12);
    }
}
