//! courtboard - College tennis dashboard

mod cli;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use courtboard_core::roster::{find_player, sort_roster};
use courtboard_core::source::{list_teams, load_roster};
use courtboard_core::{
    normalize_team_name, CourtboardConfig, DocumentSource, LogoCache, LogoResolver, PlayerProfile,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "courtboard",
    version,
    about = "College tennis dashboard: roster, player profiles, match tiles and team logos",
    long_about = "Reads roster, match and team documents from a JSON export directory or an\n\
                  HTTP document endpoint and renders them in the terminal.\n\
                  \n\
                  Team logos are resolved through a two-tier cache (memory + JSON file)\n\
                  that expires entries after 24 hours.\n\
                  \n\
                  Examples:\n\
                    courtboard roster                          # List players\n\
                    courtboard player p7                       # Profile + match tiles\n\
                    courtboard logos \"UCLA (M)\" \"USC (M)\"      # Resolve both team logos\n\
                    courtboard --source-url https://api.example.edu/tennis teams\n\
                  \n\
                  Environment Variables:\n\
                    COURTBOARD_CONFIG                # Config file path\n\
                    COURTBOARD_DATA_DIR              # Directory of <collection>.json files\n\
                    COURTBOARD_SOURCE_URL            # HTTP document endpoint\n\
                    COURTBOARD_CACHE_DIR             # Logo cache directory\n\
                    COURTBOARD_NO_COLOR              # Disable ANSI colors\n\
                    RUST_LOG                         # Log filter (overrides log_level)"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file (default: ~/.config/courtboard/config.toml)
    #[arg(long, env = "COURTBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Directory containing teams.json, players.json, matches.json
    #[arg(long, env = "COURTBOARD_DATA_DIR", conflicts_with = "source_url")]
    data_dir: Option<PathBuf>,

    /// HTTP document endpoint (GET <url>/<collection>)
    #[arg(long, env = "COURTBOARD_SOURCE_URL")]
    source_url: Option<String>,

    /// Logo cache directory
    #[arg(long, env = "COURTBOARD_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, env = "COURTBOARD_NO_COLOR")]
    no_color: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List roster players
    Roster,
    /// Show a player's profile, record and match tiles
    Player {
        /// Player ID or full name
        player: String,
    },
    /// List teams from the document store
    Teams,
    /// Resolve logos for a match (cache first, then upstream)
    Logos {
        /// Our team name, as written on the match
        client: String,
        /// Opponent team name
        opponent: String,
    },
    /// Print the cache key for a team name
    Normalize {
        name: String,
    },
    /// Show logo cache entries
    Cache,
    /// Clear the logo cache and exit
    ClearCache,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(CourtboardConfig::default_path);
    let mut config = match &config_path {
        Some(path) => CourtboardConfig::load(path)?,
        None => CourtboardConfig::default(),
    };

    init_tracing(&config.log_level);

    // CLI flags override the config file
    if let Some(dir) = cli.data_dir.clone() {
        config.source.dir = Some(dir);
        config.source.url = None;
    }
    if let Some(url) = cli.source_url.clone() {
        config.source.url = Some(url);
        config.source.dir = None;
    }
    if let Some(dir) = cli.cache_dir.clone() {
        config.cache_dir = Some(dir);
    }

    match cli.command {
        Command::Roster => run_roster(&config, cli.json, cli.no_color).await?,
        Command::Player { ref player } => {
            run_player(&config, player, cli.json, cli.no_color).await?
        }
        Command::Teams => run_teams(&config, cli.json, cli.no_color).await?,
        Command::Logos {
            ref client,
            ref opponent,
        } => run_logos(&config, client, opponent, cli.json).await?,
        Command::Normalize { ref name } => println!("{}", normalize_team_name(name)),
        Command::Cache => run_cache(&config, cli.json, cli.no_color)?,
        Command::ClearCache => run_clear_cache(&config)?,
    }

    Ok(())
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn open_source(config: &CourtboardConfig) -> Result<Arc<dyn DocumentSource>> {
    config
        .build_source()
        .context("Failed to configure document source")
}

fn open_cache(config: &CourtboardConfig) -> Result<Arc<LogoCache>> {
    let cache_dir = config
        .resolve_cache_dir()
        .context("Could not determine logo cache directory")?;
    tracing::debug!(path = %cache_dir.display(), "Logo cache directory");
    Ok(Arc::new(LogoCache::with_defaults(&cache_dir)))
}

async fn run_roster(config: &CourtboardConfig, json: bool, no_color: bool) -> Result<()> {
    let source = open_source(config)?;
    let (mut players, _, report) = load_roster(source.as_ref())
        .await
        .with_context(|| format!("Failed to load roster from {}", source.describe()))?;

    sort_roster(&mut players);

    if json {
        println!("{}", cli::to_json(&players));
    } else {
        println!("{}", cli::format_roster(&players, no_color));
        print_skipped(&report);
    }
    Ok(())
}

async fn run_player(
    config: &CourtboardConfig,
    query: &str,
    json: bool,
    no_color: bool,
) -> Result<()> {
    let source = open_source(config)?;
    let (players, matches, report) = load_roster(source.as_ref())
        .await
        .with_context(|| format!("Failed to load roster from {}", source.describe()))?;

    let player = find_player(&players, query)?;
    let profile = PlayerProfile::build(player, &matches);

    if json {
        println!("{}", cli::to_json(&profile));
    } else {
        println!("{}", cli::format_profile(&profile, no_color));
        print_skipped(&report);
    }
    Ok(())
}

async fn run_teams(config: &CourtboardConfig, json: bool, no_color: bool) -> Result<()> {
    let source = open_source(config)?;
    let teams = list_teams(source.as_ref())
        .await
        .with_context(|| format!("Failed to load teams from {}", source.describe()))?;

    if json {
        println!("{}", cli::to_json(&teams));
    } else {
        println!("{}", cli::format_teams(&teams, no_color));
    }
    Ok(())
}

async fn run_logos(
    config: &CourtboardConfig,
    client: &str,
    opponent: &str,
    json: bool,
) -> Result<()> {
    let resolver = LogoResolver::new(open_cache(config)?, open_source(config)?);
    let logos = resolver.resolve(client, opponent).await;

    if json {
        println!("{}", cli::to_json(&logos));
    } else {
        println!("{}", cli::format_logos(client, opponent, &logos));
    }
    Ok(())
}

fn run_cache(config: &CourtboardConfig, json: bool, no_color: bool) -> Result<()> {
    let cache = open_cache(config)?;
    let entries = cache.entries();

    if json {
        println!("{}", cli::to_json(&entries));
    } else {
        println!("{}", cli::format_cache_entries(&entries, no_color));
    }
    Ok(())
}

fn run_clear_cache(config: &CourtboardConfig) -> Result<()> {
    let cache = open_cache(config)?;
    let count = cache.entries().len();
    cache.clear();
    println!("Logo cache cleared ({count} entries removed)");
    Ok(())
}

fn print_skipped(report: &courtboard_core::LoadReport) {
    if !report.has_errors() {
        return;
    }
    eprintln!("{} malformed record(s) skipped:", report.records_skipped);
    for warning in report.errors.iter().take(5) {
        eprintln!("  - {}: {}", warning.source, warning.message);
    }
}
