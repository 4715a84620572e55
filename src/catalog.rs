use crate::error::DraftError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// The fixed role set used for composition balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Tank,
    Fighter,
    Assassin,
    Mage,
    Marksman,
    Support,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Tank,
        Role::Fighter,
        Role::Assassin,
        Role::Mage,
        Role::Marksman,
        Role::Support,
    ];

    pub fn parse(value: &str) -> Option<Role> {
        match value.to_lowercase().as_str() {
            "tank" => Some(Role::Tank),
            "fighter" => Some(Role::Fighter),
            "assassin" => Some(Role::Assassin),
            "mage" => Some(Role::Mage),
            "marksman" => Some(Role::Marksman),
            "support" => Some(Role::Support),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Tank => "Tank",
            Role::Fighter => "Fighter",
            Role::Assassin => "Assassin",
            Role::Mage => "Mage",
            Role::Marksman => "Marksman",
            Role::Support => "Support",
        };
        write!(f, "{}", name)
    }
}

/// Base attributes on a 0-100 scale.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseStats {
    pub durability: f64,
    pub damage: f64,
    pub mobility: f64,
    pub control: f64,
}

/// One catalog entry. The synergy map is symmetric by convention,
/// the counter map is directional (counter(A→B) need not equal counter(B→A)).
/// Coefficients live in the bounded range -1.0..=1.0; 0.0 means neutral.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub stats: BaseStats,
    #[serde(default)]
    pub synergy: HashMap<String, f64>,
    #[serde(default)]
    pub counters: HashMap<String, f64>,
}

/// Immutable, name-keyed catalog snapshot. Backed by a BTreeMap so every
/// iteration is lexicographic and recommendation output stays deterministic
/// for a fixed snapshot.
#[derive(Debug, Clone)]
pub struct HeroCatalog {
    heroes: BTreeMap<String, Hero>,
}

impl HeroCatalog {
    pub fn from_heroes(heroes: Vec<Hero>) -> Result<Self, DraftError> {
        if heroes.is_empty() {
            return Err(DraftError::DataUnavailable(
                "hero catalog is empty".to_string(),
            ));
        }

        let mut map = BTreeMap::new();
        for hero in heroes {
            if hero.synergy.contains_key(&hero.name) || hero.counters.contains_key(&hero.name) {
                return Err(DraftError::DataUnavailable(format!(
                    "hero '{}' references itself in its relation maps",
                    hero.name
                )));
            }
            if map.insert(hero.name.clone(), hero).is_some() {
                return Err(DraftError::DataUnavailable(
                    "hero catalog contains duplicate names".to_string(),
                ));
            }
        }

        Ok(HeroCatalog { heroes: map })
    }

    pub fn get(&self, name: &str) -> Option<&Hero> {
        self.heroes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.heroes.contains_key(name)
    }

    pub fn role_of(&self, name: &str) -> Option<Role> {
        self.heroes.get(name).map(|h| h.role)
    }

    /// Hero names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.heroes.keys().map(|k| k.as_str())
    }

    /// Heroes in lexicographic name order.
    pub fn heroes(&self) -> impl Iterator<Item = &Hero> {
        self.heroes.values()
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }
}
