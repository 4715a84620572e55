//! End-to-end draft flow over a small but realistic catalog: ban phase,
//! alternating picks, then a composition report on the finished team.

use draft_sensei::{
    BanPhase, CompositionAnalyzer, DataStore, DraftError, DraftRecommender, DraftState,
    EngineConfig, Hero, HeroCatalog, Role, ScoringContext, SynergyMatrix,
};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

fn hero(name: &str, role: Role, synergy: &[(&str, f64)], counters: &[(&str, f64)]) -> Hero {
    Hero {
        name: name.to_string(),
        role,
        stats: Default::default(),
        synergy: synergy
            .iter()
            .map(|(other, value)| (other.to_string(), *value))
            .collect(),
        counters: counters
            .iter()
            .map(|(other, value)| (other.to_string(), *value))
            .collect(),
    }
}

fn catalog() -> HeroCatalog {
    HeroCatalog::from_heroes(vec![
        hero("Brakka", Role::Tank, &[("Selene", 0.7)], &[("Nyx", 0.4)]),
        hero("Selene", Role::Support, &[], &[("Vael", 0.5)]),
        hero("Vael", Role::Mage, &[("Nyx", 0.6)], &[("Brakka", 0.8)]),
        hero("Nyx", Role::Assassin, &[], &[("Selene", 0.7)]),
        hero("Torin", Role::Fighter, &[("Brakka", 0.3)], &[]),
        hero("Wren", Role::Marksman, &[("Selene", 0.5)], &[]),
        hero("Ozzo", Role::Tank, &[], &[]),
        hero("Pyra", Role::Mage, &[], &[("Wren", 0.6)]),
    ])
    .unwrap()
}

fn draft(ally: &[&str], enemy: &[&str], banned: &[&str]) -> DraftState {
    DraftState {
        ally_picks: ally.iter().map(|s| s.to_string()).collect(),
        enemy_picks: enemy.iter().map(|s| s.to_string()).collect(),
        banned: banned.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

#[test]
fn full_draft_produces_legal_deterministic_suggestions() {
    let catalog = catalog();
    let matrix = SynergyMatrix::build(&catalog);
    let recommender = DraftRecommender::new(&catalog, &matrix, EngineConfig::default());
    let ctx = ScoringContext::default();

    // Ban phase: deny the enemy's best options.
    let empty = draft(&[], &[], &[]);
    let bans = recommender
        .suggest_bans(&empty, BanPhase::First, &ctx, Some(2))
        .unwrap();
    assert_eq!(bans.len(), 2);

    // Mid-draft pick with picks and bans on the board.
    let state = draft(&["Brakka"], &["Vael"], &["Nyx"]);
    let picks = recommender.suggest_picks(&state, &ctx, Some(5)).unwrap();

    assert!(!picks.is_empty());
    for pick in &picks {
        assert!(!state.is_unavailable(&pick.hero), "{}", pick.hero);
        assert!((0.0..=1.0).contains(&pick.score));
    }
    for pair in picks.windows(2) {
        assert!(pair[0].score >= pair[1].score);
        if pair[0].score == pair[1].score {
            assert!(pair[0].hero < pair[1].hero);
        }
    }

    // Selene both synergizes with Brakka and counters Vael; nothing else
    // on the board combines both signals, so she leads the ranking.
    assert_eq!(picks[0].hero, "Selene");

    // Same snapshot, same state: byte-identical ordered results.
    let again = recommender.suggest_picks(&state, &ctx, Some(5)).unwrap();
    assert_eq!(picks, again);
}

#[test]
fn ban_suggestions_exclude_every_unavailable_hero() {
    let catalog = catalog();
    let matrix = SynergyMatrix::build(&catalog);
    let recommender = DraftRecommender::new(&catalog, &matrix, EngineConfig::default());

    let state = draft(&["Brakka", "Wren"], &["Vael"], &["Nyx"]);
    for phase in [BanPhase::First, BanPhase::Second] {
        let bans = recommender
            .suggest_bans(&state, phase, &ScoringContext::default(), Some(10))
            .unwrap();
        for ban in &bans {
            assert!(!state.is_unavailable(&ban.hero), "{}", ban.hero);
        }
    }
}

#[test]
fn overlapping_teams_are_rejected_with_invalid_request() {
    let catalog = catalog();
    let matrix = SynergyMatrix::build(&catalog);
    let recommender = DraftRecommender::new(&catalog, &matrix, EngineConfig::default());

    let state = draft(&["Brakka"], &["Brakka"], &[]);
    let err = recommender
        .suggest_picks(&state, &ScoringContext::default(), None)
        .unwrap_err();
    assert!(matches!(err, DraftError::InvalidRequest(_)));
}

#[test]
fn finished_team_gets_a_full_report() {
    let catalog = catalog();
    let matrix = SynergyMatrix::build(&catalog);
    let analyzer = CompositionAnalyzer::new(&catalog, &matrix, EngineConfig::default());

    let team: Vec<String> = ["Brakka", "Selene", "Torin", "Wren", "Pyra"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let enemies: Vec<String> = ["Vael", "Nyx"].iter().map(|s| s.to_string()).collect();

    let report = analyzer.analyze(&team, Some(&enemies)).unwrap();
    assert_eq!(report.role_coverage, 1.0);
    assert!(report.missing_roles.is_empty());
    assert!(report
        .strengths
        .contains(&"Solid frontline presence".to_string()));

    // Vael counters Brakka (0.8) harder than Nyx counters Selene (0.7).
    assert_eq!(report.counter_threats[0].enemy, "Vael");
    assert_eq!(report.counter_threats[0].ally, "Brakka");
    assert!(report
        .counter_threats
        .windows(2)
        .all(|pair| pair[0].strength >= pair[1].strength));
}

#[test]
fn analyzer_rejects_empty_and_oversized_teams() {
    let catalog = catalog();
    let matrix = SynergyMatrix::build(&catalog);
    let analyzer = CompositionAnalyzer::new(&catalog, &matrix, EngineConfig::default());

    assert!(matches!(
        analyzer.analyze(&[], None).unwrap_err(),
        DraftError::InvalidRequest(_)
    ));

    let six: Vec<String> = ["Brakka", "Selene", "Vael", "Nyx", "Torin", "Wren"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert!(matches!(
        analyzer.analyze(&six, None).unwrap_err(),
        DraftError::InvalidRequest(_)
    ));
}

#[test]
fn store_snapshot_drives_the_recommender_end_to_end() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("heroes.json"),
        r#"[
            { "name": "Brakka", "role": "Tank", "synergy": { "Selene": 0.7 } },
            { "name": "Selene", "role": "Support", "counters": { "Vael": 0.5 } },
            { "name": "Vael", "role": "Mage" },
            { "name": "Wren", "role": "Marksman" }
        ]"#,
    )
    .unwrap();

    let store = DataStore::new(dir.path());
    let catalog = store.fetch_catalog().unwrap();
    let config = store.load_engine_config().unwrap();
    let matrix = SynergyMatrix::build(&catalog);
    let recommender = DraftRecommender::new(&catalog, &matrix, config);

    // Stats snapshots are missing: the caller degrades to neutral defaults.
    let meta: HashMap<_, _> = HashMap::new();
    let ctx = ScoringContext {
        meta,
        preferences: None,
    };

    let state = draft(&["Brakka"], &["Vael"], &[]);
    let picks = recommender.suggest_picks(&state, &ctx, Some(2)).unwrap();
    assert_eq!(picks[0].hero, "Selene");
}
