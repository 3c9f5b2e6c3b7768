mod config;
mod output;
mod snapshot;

use bowlpair_core::{
    calculate_standings, find_rematches, generate_round, match_result, to_match_drafts,
    EngineConfig, MatchResult, MatchStatus, PairingMethod,
};
use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::BowlpairConfig;
use crate::snapshot::Snapshot;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "bowlpair", version, about = "Pair tournament rounds and tally judge scores")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log engine decisions (byes, rematches, virtual judges) to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (default: ~/.config/bowlpair/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Generate pairings for a round
    Pair(PairArgs),
    /// Rank teams from completed matches
    Standings(ReportArgs),
    /// Show votes, totals, and winner for each match
    Tally(TallyArgs),
    /// Create a default config file (at --config, or ~/.config/bowlpair/config.toml)
    Init,
}

#[derive(clap::Args)]
struct SnapshotArgs {
    /// Tournament snapshot JSON ({"teams": [...], "matches": [...]}). Reads stdin if omitted.
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Output JSON instead of table
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct PairArgs {
    #[command(flatten)]
    input: SnapshotArgs,

    /// Round to generate (numbered from 1)
    #[arg(long)]
    round: u32,

    /// Pairing method: "swiss" or "round-robin"
    #[arg(long)]
    method: Option<String>,

    /// Seed for the round-1 Swiss draw
    #[arg(long)]
    seed: Option<u64>,

    /// Last round of the event
    #[arg(long)]
    total_rounds: Option<u32>,
}

#[derive(Parser)]
struct ReportArgs {
    #[command(flatten)]
    input: SnapshotArgs,
}

#[derive(Parser)]
struct TallyArgs {
    #[command(flatten)]
    input: SnapshotArgs,

    /// Only show matches from this round
    #[arg(long)]
    round: Option<u32>,

    /// Include matches that are not completed yet
    #[arg(long)]
    all: bool,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(config::config_path);

    match cli.command {
        Commands::Pair(args) => run_pair(args, &config::load_config(&config_path)),
        Commands::Standings(args) => run_standings(args, &config::load_config(&config_path)),
        Commands::Tally(args) => run_tally(args, &config::load_config(&config_path)),
        Commands::Init => {
            config::create_default_config(&config_path);
            println!("Created config at {}", config_path.display());
            println!("Edit it to set your default pairing method, seed, etc.");
        }
    }
}

fn wants_json(input: &SnapshotArgs, cfg: &BowlpairConfig) -> bool {
    input.json || cfg.json.unwrap_or(false)
}

fn parse_method(arg: Option<&str>, cfg: &BowlpairConfig) -> PairingMethod {
    match arg.or(cfg.method.as_deref()) {
        Some(name) => name.parse::<PairingMethod>().unwrap_or_else(|e| bail(e)),
        None => PairingMethod::default(),
    }
}

fn method_name(method: PairingMethod) -> &'static str {
    match method {
        PairingMethod::RoundRobin => "round-robin",
        PairingMethod::Swiss => "swiss",
    }
}

fn run_pair(args: PairArgs, cfg: &BowlpairConfig) {
    let snapshot = snapshot::load_snapshot(args.input.snapshot.as_deref());
    let method = parse_method(args.method.as_deref(), cfg);
    let engine_config = EngineConfig {
        method,
        total_rounds: args.total_rounds.or(cfg.total_rounds),
    };

    let mut rng = match args.seed.or(cfg.seed) {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_rng(&mut rand::rng()),
    };

    let prior = snapshot.matches_before(args.round);
    let pairings = generate_round(&engine_config, &snapshot.teams, &prior, args.round, &mut rng)
        .unwrap_or_else(|e| bail(e));
    let rematches = find_rematches(&pairings, &prior);
    let drafts = to_match_drafts(&pairings, args.round);

    tracing::info!(
        round = args.round,
        method = method_name(method),
        pairings = pairings.len(),
        rematches = rematches.len(),
        "round generated"
    );

    if wants_json(&args.input, cfg) {
        output::print_round_json(args.round, method_name(method), &pairings, &drafts, &rematches);
    } else {
        output::print_round_table(&snapshot, args.round, &pairings, &rematches);
    }
}

fn run_standings(args: ReportArgs, cfg: &BowlpairConfig) {
    let snapshot = snapshot::load_snapshot(args.input.snapshot.as_deref());
    let standings = calculate_standings(&snapshot.teams, &snapshot.matches);

    if wants_json(&args.input, cfg) {
        output::print_standings_json(&snapshot, &standings);
    } else {
        output::print_standings_table(&snapshot, &standings);
    }
}

/// Results for the matches the tally command reports, with round and team IDs for display.
fn collect_results(snapshot: &Snapshot, round: Option<u32>, all: bool) -> Vec<(u32, i64, i64, MatchResult)> {
    snapshot
        .matches
        .iter()
        .filter(|m| all || m.status == MatchStatus::Completed)
        .filter(|m| round.map_or(true, |r| m.round_number == r))
        .map(|m| (m.round_number, m.team_a_id, m.team_b_id, match_result(m)))
        .collect()
}

fn run_tally(args: TallyArgs, cfg: &BowlpairConfig) {
    let snapshot = snapshot::load_snapshot(args.input.snapshot.as_deref());
    let results = collect_results(&snapshot, args.round, args.all);

    if results.is_empty() {
        tracing::warn!("no matches to tally");
    }

    if wants_json(&args.input, cfg) {
        output::print_results_json(&results);
    } else {
        output::print_results_table(&snapshot, &results);
    }
}
