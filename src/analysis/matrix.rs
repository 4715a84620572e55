use crate::catalog::HeroCatalog;
use std::collections::HashMap;

/// Pair-keyed adjacency over the catalog's synergy/counter relations.
/// Rebuilt deterministically from a flat snapshot; read-only afterwards, so
/// it can be shared across concurrent recommendation calls.
#[derive(Debug, Clone)]
pub struct SynergyMatrix {
    synergy: HashMap<(String, String), f64>,
    counter: HashMap<(String, String), f64>,
}

impl SynergyMatrix {
    pub fn build(catalog: &HeroCatalog) -> Self {
        let mut synergy = HashMap::new();
        let mut counter = HashMap::new();

        for hero in catalog.heroes() {
            for (partner, coefficient) in &hero.synergy {
                synergy.insert((hero.name.clone(), partner.clone()), *coefficient);
            }
            for (target, coefficient) in &hero.counters {
                counter.insert((hero.name.clone(), target.clone()), *coefficient);
            }
        }

        SynergyMatrix { synergy, counter }
    }

    /// Synergy between two heroes. Symmetric by convention: the reverse entry
    /// is consulted when no direct one exists. Unknown pair means neutral.
    pub fn synergy_of(&self, a: &str, b: &str) -> f64 {
        if let Some(coefficient) = self.synergy.get(&(a.to_string(), b.to_string())) {
            return *coefficient;
        }
        self.synergy
            .get(&(b.to_string(), a.to_string()))
            .copied()
            .unwrap_or(0.0)
    }

    /// How strongly `a` disadvantages `b` on the opposing team. Directional:
    /// counter(A→B) need not equal counter(B→A). Unknown pair means neutral.
    pub fn counter_of(&self, a: &str, b: &str) -> f64 {
        self.counter
            .get(&(a.to_string(), b.to_string()))
            .copied()
            .unwrap_or(0.0)
    }

    /// Mean synergy over all unordered pairs in the set. Empty and singleton
    /// sets score 0.
    pub fn team_synergy(&self, heroes: &[String]) -> f64 {
        if heroes.len() < 2 {
            return 0.0;
        }

        let mut total = 0.0;
        let mut pairs = 0usize;
        for i in 0..heroes.len() {
            for j in (i + 1)..heroes.len() {
                total += self.synergy_of(&heroes[i], &heroes[j]);
                pairs += 1;
            }
        }

        total / pairs as f64
    }

    /// Mean of counter(candidate → e) over the enemy set. Empty set scores 0.
    pub fn counter_advantage(&self, candidate: &str, enemies: &[String]) -> f64 {
        if enemies.is_empty() {
            return 0.0;
        }

        let total: f64 = enemies
            .iter()
            .map(|enemy| self.counter_of(candidate, enemy))
            .sum();
        total / enemies.len() as f64
    }

    /// Best synergy partner for `hero` among `candidates`, skipping the hero
    /// itself. Ties resolve to the lexicographically smaller name so the
    /// choice is stable across calls.
    pub fn best_partner(&self, hero: &str, candidates: &[String]) -> Option<(String, f64)> {
        let mut best: Option<(String, f64)> = None;
        for candidate in candidates {
            if candidate == hero {
                continue;
            }
            let coefficient = self.synergy_of(hero, candidate);
            let better = match &best {
                None => true,
                Some((name, value)) => {
                    coefficient > *value || (coefficient == *value && candidate < name)
                }
            };
            if better {
                best = Some((candidate.clone(), coefficient));
            }
        }
        best
    }
}
