use crate::analysis::analyzer::CompositionReport;
use crate::analysis::scoring::ScoredCandidate;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct SuggestionRow {
    rank: String,
    hero: String,
    role: String,
    score: String,
    confidence: String,
    #[tabled(rename = "why")]
    reason: String,
}

#[derive(Tabled)]
struct ThreatRow {
    enemy: String,
    #[tabled(rename = "counters")]
    ally: String,
    strength: String,
}

fn suggestion_rows(suggestions: &[ScoredCandidate]) -> Vec<SuggestionRow> {
    suggestions
        .iter()
        .enumerate()
        .map(|(idx, candidate)| SuggestionRow {
            rank: format!("#{}", idx + 1),
            hero: candidate.hero.clone(),
            role: candidate.role.to_string(),
            score: format!("{:.1}", candidate.score * 100.0),
            confidence: format!("{:.0}%", candidate.confidence * 100.0),
            reason: candidate
                .reasons
                .first()
                .cloned()
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

pub fn display_pick_suggestions(suggestions: &[ScoredCandidate]) {
    println!("\n{}", "🎯 PICK SUGGESTIONS".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    if suggestions.is_empty() {
        println!("{}", "No pick suggestions available".yellow());
        return;
    }

    let mut table = Table::new(suggestion_rows(suggestions));
    table.with(Style::rounded());
    println!("{}", table);

    if let Some(top) = suggestions.first() {
        println!("\n{}", "Top Pick".bold().green());
        println!("  {} ({})", top.hero, top.role);
        for reason in &top.reasons {
            println!("  • {}", reason);
        }
    }

    println!();
}

pub fn display_ban_suggestions(suggestions: &[ScoredCandidate], phase: &str) {
    println!(
        "\n{}",
        format!("🚫 BAN SUGGESTIONS ({} phase)", phase).bold().cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    if suggestions.is_empty() {
        println!("{}", "No ban suggestions available".yellow());
        return;
    }

    let mut table = Table::new(suggestion_rows(suggestions));
    table.with(Style::rounded());
    println!("{}", table);

    println!("\n{}", "Interpretation".bold().yellow());
    println!("• Score: how dangerous this hero would be in the enemy's hands");
    println!("• Heroes already picked or banned are never listed\n");
}

pub fn display_composition_report(report: &CompositionReport) {
    println!("\n{}", "📊 COMPOSITION ANALYSIS".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    println!(
        "{} {:.1} / 100   {} {:.0}%   {} {}",
        "Synergy:".bold(),
        report.team_synergy * 100.0,
        "Role coverage:".bold(),
        report.role_coverage * 100.0,
        "Archetype:".bold(),
        report.archetype
    );

    if !report.missing_roles.is_empty() {
        let missing: Vec<String> = report.missing_roles.iter().map(|r| r.to_string()).collect();
        println!("{} {}", "Missing roles:".bold().red(), missing.join(", "));
    }

    if !report.strengths.is_empty() {
        println!("\n{}", "Strengths".bold().green());
        for strength in &report.strengths {
            println!("  ✓ {}", strength);
        }
    }

    if !report.weaknesses.is_empty() {
        println!("\n{}", "Weaknesses".bold().red());
        for weakness in &report.weaknesses {
            println!("  ⚠️ {}", weakness);
        }
    }

    if !report.best_partners.is_empty() {
        println!("\n{}", "Best Synergy Partners".bold().yellow());
        for entry in &report.best_partners {
            println!(
                "  {} ↔ {} ({:.2})",
                entry.hero, entry.partner, entry.synergy
            );
        }
    }

    if !report.counter_threats.is_empty() {
        println!("\n{}", "Counter Vulnerabilities".bold().red());
        let rows: Vec<ThreatRow> = report
            .counter_threats
            .iter()
            .map(|threat| ThreatRow {
                enemy: threat.enemy.clone(),
                ally: threat.ally.clone(),
                strength: format!("{:.2}", threat.strength),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{}", table);
    }

    println!();
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
