use anyhow::Context;
use clap::{Parser, Subcommand};
use draft_sensei::display::output::{
    display_ban_suggestions, display_composition_report, display_error, display_info,
    display_pick_suggestions, display_success,
};
use draft_sensei::{
    BanPhase, CompositionAnalyzer, Config, DataStore, DraftError, DraftRecommender, DraftState,
    Role, ScoringContext, SynergyMatrix,
};

#[derive(Parser, Debug)]
#[command(name = "Draft Sensei")]
#[command(about = "Hero pick/ban suggestions and composition analysis for 5v5 drafts", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Suggest the best picks for the current draft state
    Pick {
        /// Ally picks so far, in draft order
        #[arg(short, long)]
        ally: Vec<String>,

        /// Enemy picks so far, in draft order
        #[arg(short, long)]
        enemy: Vec<String>,

        /// Banned heroes (both teams)
        #[arg(short, long)]
        ban: Vec<String>,

        /// Only consider heroes of this role
        #[arg(long)]
        role: Option<String>,

        /// Player ID for personalized recommendations
        #[arg(short, long)]
        player: Option<String>,

        /// Number of suggestions to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Suggest which heroes to deny in the ban phase
    Ban {
        #[arg(short, long)]
        ally: Vec<String>,

        #[arg(short, long)]
        enemy: Vec<String>,

        #[arg(short, long)]
        ban: Vec<String>,

        /// Ban phase: "first" or "second"
        #[arg(long, default_value = "first")]
        phase: String,

        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Analyze a team composition's strengths and weaknesses
    Analyze {
        /// The team to analyze
        #[arg(short, long)]
        ally: Vec<String>,

        /// Opposing picks, for the counter-vulnerability report
        #[arg(short, long)]
        enemy: Vec<String>,
    },
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let store = DataStore::new(&config.data_dir);

    let catalog = store
        .fetch_catalog()
        .with_context(|| format!("loading catalog from {}", config.data_dir.display()))?;
    let engine_config = store.load_engine_config()?;
    let matrix = SynergyMatrix::build(&catalog);
    display_success(&format!("Loaded {} heroes", catalog.len()));

    let hero_ids: Vec<String> = catalog.names().map(|n| n.to_string()).collect();

    match args.command {
        Command::Pick {
            ally,
            enemy,
            ban,
            role,
            player,
            limit,
        } => {
            let draft = DraftState {
                ally_picks: ally,
                enemy_picks: enemy,
                banned: ban,
                role_preference: role.as_deref().map(parse_role).transpose()?,
                ban_phase: None,
            };

            let ctx = build_context(&store, &config, &hero_ids, player.as_deref());
            let recommender = DraftRecommender::new(&catalog, &matrix, engine_config);
            let picks = recommender.suggest_picks(&draft, &ctx, limit)?;
            display_pick_suggestions(&picks);
        }

        Command::Ban {
            ally,
            enemy,
            ban,
            phase,
            limit,
        } => {
            let phase = BanPhase::parse(&phase).ok_or_else(|| {
                DraftError::InvalidRequest(format!(
                    "ban phase must be 'first' or 'second', got '{}'",
                    phase
                ))
            })?;
            let draft = DraftState {
                ally_picks: ally,
                enemy_picks: enemy,
                banned: ban,
                role_preference: None,
                ban_phase: Some(phase),
            };

            let ctx = build_context(&store, &config, &hero_ids, None);
            let recommender = DraftRecommender::new(&catalog, &matrix, engine_config);
            let bans = recommender.suggest_bans(&draft, phase, &ctx, limit)?;
            display_ban_suggestions(&bans, &phase.to_string());
        }

        Command::Analyze { ally, enemy } => {
            let analyzer = CompositionAnalyzer::new(&catalog, &matrix, engine_config);
            let enemies = if enemy.is_empty() {
                None
            } else {
                Some(enemy.as_slice())
            };
            let report = analyzer.analyze(&ally, enemies)?;
            display_composition_report(&report);
        }
    }

    Ok(())
}

fn parse_role(value: &str) -> Result<Role, DraftError> {
    Role::parse(value).ok_or_else(|| {
        DraftError::InvalidRequest(format!(
            "unknown role '{}'; expected Tank, Fighter, Assassin, Mage, Marksman or Support",
            value
        ))
    })
}

/// Assembles the statistics context, degrading gracefully when snapshots
/// are missing: recommendations still work on neutral defaults.
fn build_context(
    store: &DataStore,
    config: &Config,
    hero_ids: &[String],
    player: Option<&str>,
) -> ScoringContext {
    let meta = match store.fetch_meta_stats(hero_ids, config.lookback_days) {
        Ok(meta) => meta,
        Err(DraftError::DataUnavailable(_)) => {
            display_info("No match history found, using neutral meta scores");
            Default::default()
        }
        Err(e) => {
            display_info(&format!("Skipping meta stats: {}", e));
            Default::default()
        }
    };

    let preferences = player.and_then(|id| match store.fetch_preferences(id, hero_ids) {
        Ok(prefs) => Some(prefs),
        Err(DraftError::DataUnavailable(_)) => {
            display_info(&format!("No preferences recorded for '{}'", id));
            None
        }
        Err(e) => {
            display_info(&format!("Skipping preferences: {}", e));
            None
        }
    });

    ScoringContext { meta, preferences }
}
