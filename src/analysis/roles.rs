use crate::catalog::Role;
use serde::Deserialize;
use std::collections::HashMap;

/// Target count per role for one balanced five-hero composition, plus the
/// priority order used to break ties between equally-missing roles.
///
/// The default distribution leaves Assassin at zero: it competes with
/// Fighter for the flex slot, and callers wanting a dive composition
/// override the targets instead.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoleTargets {
    pub tank: u32,
    pub fighter: u32,
    pub assassin: u32,
    pub mage: u32,
    pub marksman: u32,
    pub support: u32,
    pub priority: Vec<Role>,
}

impl Default for RoleTargets {
    fn default() -> Self {
        RoleTargets {
            tank: 1,
            fighter: 1,
            assassin: 0,
            mage: 1,
            marksman: 1,
            support: 1,
            priority: vec![
                Role::Tank,
                Role::Support,
                Role::Marksman,
                Role::Mage,
                Role::Fighter,
                Role::Assassin,
            ],
        }
    }
}

/// Coverage report for one set of roles against the targets.
#[derive(Debug, Clone)]
pub struct RoleBalance {
    /// How close the set is to the target distribution, in [0,1].
    pub coverage: f64,
    /// Roles below target, largest deficit first, ties broken by priority.
    pub missing_roles: Vec<Role>,
    pub counts: HashMap<Role, u32>,
}

impl RoleTargets {
    pub fn target(&self, role: Role) -> u32 {
        match role {
            Role::Tank => self.tank,
            Role::Fighter => self.fighter,
            Role::Assassin => self.assassin,
            Role::Mage => self.mage,
            Role::Marksman => self.marksman,
            Role::Support => self.support,
        }
    }

    pub fn total(&self) -> u32 {
        Role::ALL.iter().map(|role| self.target(*role)).sum()
    }

    pub fn evaluate(&self, roles: &[Role]) -> RoleBalance {
        let mut counts: HashMap<Role, u32> = HashMap::new();
        for role in roles {
            *counts.entry(*role).or_insert(0) += 1;
        }

        let total = self.total();
        if total == 0 {
            // Degenerate configuration: nothing to cover.
            return RoleBalance {
                coverage: 1.0,
                missing_roles: Vec::new(),
                counts,
            };
        }

        let covered: u32 = Role::ALL
            .iter()
            .map(|role| counts.get(role).copied().unwrap_or(0).min(self.target(*role)))
            .sum();
        let coverage = covered as f64 / total as f64;

        let mut missing: Vec<(u32, usize, Role)> = Role::ALL
            .iter()
            .filter_map(|role| {
                let count = counts.get(role).copied().unwrap_or(0);
                let target = self.target(*role);
                if count < target {
                    Some((target - count, self.priority_index(*role), *role))
                } else {
                    None
                }
            })
            .collect();
        missing.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        RoleBalance {
            coverage,
            missing_roles: missing.into_iter().map(|(_, _, role)| role).collect(),
            counts,
        }
    }

    /// Coverage gained by adding one hero of `added` to the current roles,
    /// scaled by the total target: 1.0 when the pick fills a deficit, 0.0
    /// when the role is already satisfied. One pick moves coverage by
    /// exactly one slot or not at all.
    pub fn coverage_gain(&self, current: &[Role], added: Role) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        let count = current.iter().filter(|role| **role == added).count() as u32;
        if count < self.target(added) {
            1.0
        } else {
            0.0
        }
    }

    fn priority_index(&self, role: Role) -> usize {
        self.priority
            .iter()
            .position(|r| *r == role)
            .unwrap_or(self.priority.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_of_empty_set_is_zero() {
        let targets = RoleTargets::default();
        assert_eq!(targets.evaluate(&[]).coverage, 0.0);
    }

    #[test]
    fn balanced_five_covers_fully() {
        let targets = RoleTargets::default();
        let balance = targets.evaluate(&[
            Role::Tank,
            Role::Fighter,
            Role::Mage,
            Role::Marksman,
            Role::Support,
        ]);
        assert_eq!(balance.coverage, 1.0);
        assert!(balance.missing_roles.is_empty());
    }

    #[test]
    fn duplicate_roles_do_not_raise_coverage() {
        let targets = RoleTargets::default();
        let balance = targets.evaluate(&[Role::Tank, Role::Tank]);
        assert_eq!(balance.coverage, 1.0 / 5.0);
    }

    #[test]
    fn missing_roles_order_deficit_then_priority() {
        let targets = RoleTargets::default();
        // Three tanks: Marksman already present, everything else missing
        // with equal deficit, so the fixed priority decides the order.
        let balance = targets.evaluate(&[Role::Tank, Role::Tank, Role::Tank, Role::Marksman]);
        assert_eq!(
            balance.missing_roles,
            vec![Role::Support, Role::Mage, Role::Fighter]
        );
    }

    #[test]
    fn larger_deficit_comes_first() {
        let targets = RoleTargets {
            mage: 2,
            ..Default::default()
        };
        let balance = targets.evaluate(&[Role::Tank, Role::Fighter, Role::Marksman]);
        // Mage deficit 2 beats Support deficit 1 despite Support's priority.
        assert_eq!(balance.missing_roles, vec![Role::Mage, Role::Support]);
    }

    #[test]
    fn coverage_gain_rewards_deficit_fill_only() {
        let targets = RoleTargets::default();
        let current = [Role::Tank, Role::Marksman];
        assert_eq!(targets.coverage_gain(&current, Role::Support), 1.0);
        assert_eq!(targets.coverage_gain(&current, Role::Tank), 0.0);
        assert_eq!(targets.coverage_gain(&current, Role::Assassin), 0.0);
    }
}
