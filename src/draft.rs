use crate::catalog::{HeroCatalog, Role};
use crate::error::DraftError;
use std::collections::HashSet;
use std::fmt;

/// Teams never exceed five heroes in a 5v5 draft.
pub const MAX_TEAM_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BanPhase {
    First,
    Second,
}

impl BanPhase {
    pub fn parse(value: &str) -> Option<BanPhase> {
        match value.to_lowercase().as_str() {
            "first" => Some(BanPhase::First),
            "second" => Some(BanPhase::Second),
            _ => None,
        }
    }
}

impl fmt::Display for BanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BanPhase::First => write!(f, "first"),
            BanPhase::Second => write!(f, "second"),
        }
    }
}

/// Transient record of one drafting session: picks in order, bans, and the
/// caller's optional role preference and ban-phase marker.
#[derive(Debug, Clone, Default)]
pub struct DraftState {
    pub ally_picks: Vec<String>,
    pub enemy_picks: Vec<String>,
    pub banned: Vec<String>,
    pub role_preference: Option<Role>,
    pub ban_phase: Option<BanPhase>,
}

impl DraftState {
    /// Checks the state invariants against a catalog snapshot: team sizes,
    /// known hero names, and pairwise disjointness of ally/enemy/banned.
    /// Unknown names are rejected rather than dropped; silently dropping them
    /// would corrupt disjointness and ranking determinism.
    pub fn validate(&self, catalog: &HeroCatalog) -> Result<(), DraftError> {
        if self.ally_picks.len() > MAX_TEAM_SIZE {
            return Err(DraftError::InvalidRequest(format!(
                "ally team has {} picks, maximum is {}",
                self.ally_picks.len(),
                MAX_TEAM_SIZE
            )));
        }
        if self.enemy_picks.len() > MAX_TEAM_SIZE {
            return Err(DraftError::InvalidRequest(format!(
                "enemy team has {} picks, maximum is {}",
                self.enemy_picks.len(),
                MAX_TEAM_SIZE
            )));
        }

        let mut seen = HashSet::new();
        for name in self
            .ally_picks
            .iter()
            .chain(self.enemy_picks.iter())
            .chain(self.banned.iter())
        {
            if !catalog.contains(name) {
                return Err(DraftError::InvalidRequest(format!(
                    "unknown hero '{}' in draft state",
                    name
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(DraftError::InvalidRequest(format!(
                    "hero '{}' appears more than once across picks and bans",
                    name
                )));
            }
        }

        Ok(())
    }

    /// A hero already picked by either team or banned cannot be a candidate.
    pub fn is_unavailable(&self, name: &str) -> bool {
        self.ally_picks.iter().any(|h| h == name)
            || self.enemy_picks.iter().any(|h| h == name)
            || self.banned.iter().any(|h| h == name)
    }
}
