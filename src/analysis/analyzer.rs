use crate::analysis::matrix::SynergyMatrix;
use crate::analysis::roles::RoleTargets;
use crate::catalog::{HeroCatalog, Role};
use crate::config::EngineConfig;
use crate::draft::MAX_TEAM_SIZE;
use crate::error::DraftError;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// A hero's strongest synergy partner among its own teammates.
#[derive(Debug, Clone, PartialEq)]
pub struct BestPartner {
    pub hero: String,
    pub partner: String,
    pub synergy: f64,
}

/// One enemy-over-ally counter relationship worth knowing about.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterThreat {
    pub enemy: String,
    pub ally: String,
    /// Raw counter coefficient, positive means the enemy has the edge.
    pub strength: f64,
}

/// Structured strengths/weaknesses report for a fixed team.
#[derive(Debug, Clone)]
pub struct CompositionReport {
    /// Normalized overall team synergy in [0,1]; 0.5 is neutral.
    pub team_synergy: f64,
    pub best_partners: Vec<BestPartner>,
    /// Role coverage against the configured targets, in [0,1].
    pub role_coverage: f64,
    pub missing_roles: Vec<Role>,
    pub role_counts: HashMap<Role, u32>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    /// Composition archetype label derived from the role distribution.
    pub archetype: String,
    /// Ally heroes most strongly countered by enemy picks, strongest first.
    /// Empty when no enemy team was supplied.
    pub counter_threats: Vec<CounterThreat>,
}

/// Runs the same signal sources as the recommender over a fixed team and
/// reports strengths and weaknesses instead of a ranking.
pub struct CompositionAnalyzer<'a> {
    catalog: &'a HeroCatalog,
    matrix: &'a SynergyMatrix,
    config: EngineConfig,
}

impl<'a> CompositionAnalyzer<'a> {
    pub fn new(catalog: &'a HeroCatalog, matrix: &'a SynergyMatrix, config: EngineConfig) -> Self {
        CompositionAnalyzer {
            catalog,
            matrix,
            config,
        }
    }

    pub fn analyze(
        &self,
        allies: &[String],
        enemies: Option<&[String]>,
    ) -> Result<CompositionReport, DraftError> {
        self.validate(allies, enemies)?;

        let team_synergy = self
            .config
            .bounds
            .normalize(self.matrix.team_synergy(allies));

        let best_partners = allies
            .iter()
            .filter_map(|hero| {
                self.matrix
                    .best_partner(hero, allies)
                    .map(|(partner, synergy)| BestPartner {
                        hero: hero.clone(),
                        partner,
                        synergy,
                    })
            })
            .collect();

        let roles: Vec<Role> = allies
            .iter()
            .filter_map(|name| self.catalog.role_of(name))
            .collect();
        let balance = self.config.role_targets.evaluate(&roles);

        let (strengths, weaknesses) = self.read_profile(allies, &balance.counts);
        let archetype = archetype(&balance.counts).to_string();

        let counter_threats = match enemies {
            Some(enemies) => self.counter_threats(allies, enemies),
            None => Vec::new(),
        };

        Ok(CompositionReport {
            team_synergy,
            best_partners,
            role_coverage: balance.coverage,
            missing_roles: balance.missing_roles,
            role_counts: balance.counts,
            strengths,
            weaknesses,
            archetype,
            counter_threats,
        })
    }

    fn validate(&self, allies: &[String], enemies: Option<&[String]>) -> Result<(), DraftError> {
        if allies.is_empty() {
            return Err(DraftError::InvalidRequest(
                "cannot analyze an empty team".to_string(),
            ));
        }
        if allies.len() > MAX_TEAM_SIZE {
            return Err(DraftError::InvalidRequest(format!(
                "team has {} heroes, maximum is {}",
                allies.len(),
                MAX_TEAM_SIZE
            )));
        }
        if let Some(enemies) = enemies {
            if enemies.len() > MAX_TEAM_SIZE {
                return Err(DraftError::InvalidRequest(format!(
                    "enemy team has {} heroes, maximum is {}",
                    enemies.len(),
                    MAX_TEAM_SIZE
                )));
            }
        }

        let mut seen = HashSet::new();
        for name in allies.iter().chain(enemies.unwrap_or(&[]).iter()) {
            if !self.catalog.contains(name) {
                return Err(DraftError::InvalidRequest(format!(
                    "unknown hero '{}' in team",
                    name
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(DraftError::InvalidRequest(format!(
                    "hero '{}' appears more than once",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Role-count and base-stat reads, in the order a coach would call
    /// them out.
    fn read_profile(
        &self,
        allies: &[String],
        counts: &HashMap<Role, u32>,
    ) -> (Vec<String>, Vec<String>) {
        let mut strengths = Vec::new();
        let mut weaknesses = Vec::new();
        let count = |role: Role| counts.get(&role).copied().unwrap_or(0);

        if count(Role::Tank) >= 1 {
            strengths.push("Solid frontline presence".to_string());
        } else {
            weaknesses.push("No tank to absorb engage damage".to_string());
        }

        if count(Role::Support) >= 1 {
            strengths.push("Dedicated sustain and peel".to_string());
        } else {
            weaknesses.push("No support backing the carries".to_string());
        }

        if count(Role::Marksman) >= 1 {
            strengths.push("Consistent late-game damage".to_string());
        }

        if count(Role::Assassin) >= 2 {
            strengths.push("High burst potential".to_string());
            weaknesses.push("Burst-reliant damage profile".to_string());
        }

        for role in Role::ALL {
            if count(role) >= 3 {
                weaknesses.push(format!("Overloaded on {} heroes", role));
            }
        }

        // Base-stat reads over the whole team.
        let stats: Vec<_> = allies
            .iter()
            .filter_map(|name| self.catalog.get(name))
            .map(|hero| hero.stats)
            .collect();
        if !stats.is_empty() {
            let len = stats.len() as f64;
            let avg_durability = stats.iter().map(|s| s.durability).sum::<f64>() / len;
            let avg_damage = stats.iter().map(|s| s.damage).sum::<f64>() / len;
            if avg_durability >= 70.0 {
                strengths.push("Hard-to-kill core".to_string());
            }
            if avg_damage >= 70.0 {
                strengths.push("High raw damage output".to_string());
            } else if avg_damage <= 30.0 {
                weaknesses.push("Low overall damage output".to_string());
            }
        }

        (strengths, weaknesses)
    }

    /// Every positive enemy-over-ally counter coefficient, strongest first.
    /// Ties resolve on (enemy, ally) name order for determinism.
    fn counter_threats(&self, allies: &[String], enemies: &[String]) -> Vec<CounterThreat> {
        let mut threats: Vec<CounterThreat> = Vec::new();
        for enemy in enemies {
            for ally in allies {
                let strength = self.matrix.counter_of(enemy, ally);
                if strength > 0.0 {
                    threats.push(CounterThreat {
                        enemy: enemy.clone(),
                        ally: ally.clone(),
                        strength,
                    });
                }
            }
        }
        threats.sort_by(|a, b| {
            b.strength
                .partial_cmp(&a.strength)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.enemy.cmp(&b.enemy))
                .then_with(|| a.ally.cmp(&b.ally))
        });
        threats
    }
}

fn archetype(counts: &HashMap<Role, u32>) -> &'static str {
    let count = |role: Role| counts.get(&role).copied().unwrap_or(0);
    if count(Role::Assassin) >= 2 {
        "Burst/Dive"
    } else if count(Role::Mage) >= 2 {
        "Poke/Magic"
    } else if count(Role::Tank) >= 2 {
        "Tank/Sustain"
    } else if count(Role::Fighter) >= 2 {
        "Bruiser"
    } else {
        "Balanced"
    }
}
