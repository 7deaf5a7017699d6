//! Team Builder CLI
//!
//! Roster pool validation, random fills and an interactive draft on the
//! terminal.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tb_core::{
    AssemblyEngine, AssemblyEvent, BuilderConfig, DraftOffer, DraftProgress, FillEvent, FillMode,
    Language, Presenter, RosterPool, SelectionState, SlotKind,
};

#[derive(Parser)]
#[command(name = "team_builder")]
#[command(about = "Assemble football rosters from a reference pool", long_about = None)]
struct Cli {
    /// Display language for names (english / japanese)
    #[arg(long, global = true)]
    language: Option<Language>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a roster pool file
    Validate {
        /// Roster pool JSON file
        #[arg(long)]
        pool: PathBuf,

        /// Builder config (YAML or JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Fill the whole roster at random
    Random {
        #[arg(long)]
        pool: PathBuf,

        /// Ignore positions everywhere
        #[arg(long, default_value = "false")]
        ultra: bool,

        /// Fixed RNG seed
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the roster as JSON instead of text
        #[arg(long, default_value = "false")]
        json: bool,

        /// Pause between steps, in milliseconds
        #[arg(long, default_value = "0")]
        delay_ms: u64,
    },

    /// Draft a roster step by step from stdin
    Draft {
        #[arg(long)]
        pool: PathBuf,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Logs roster events at debug level; stdout is kept for the roster.
struct TracePresenter;

impl Presenter for TracePresenter {
    fn on_event(&mut self, event: &AssemblyEvent, roster: &SelectionState) {
        debug!(
            event = %serde_json::to_string(event).unwrap_or_default(),
            filled = roster.used().len(),
            "roster event"
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { pool, config } => {
            let config = load_config(config.as_deref(), None, cli.language)?;
            let pool = load_pool(&pool)?;
            pool.validate(config.field_slots).context("roster pool is invalid")?;
            println!("✅ Roster pool is valid");
            println!("   Formations: {}", pool.formations.len());
            println!("   Coaches:    {}", pool.coaches.len());
            println!("   Players:    {}", pool.players.len());
            println!("   Teams:      {}", pool.teams.len());
            println!("   Emblems:    {}", pool.emblems.len());
        }

        Commands::Random { pool, ultra, seed, config, json, delay_ms } => {
            let config = load_config(config.as_deref(), seed, cli.language)?;
            let mut engine = build_engine(&pool, config)?;
            let mode = if ultra { FillMode::Ultra } else { FillMode::Constrained };
            run_random(&mut engine, mode, delay_ms, !json)?;

            if json {
                println!("{}", engine.snapshot().to_json_pretty()?);
            } else {
                print_roster(&engine);
            }
        }

        Commands::Draft { pool, seed, config } => {
            let config = load_config(config.as_deref(), seed, cli.language)?;
            let mut engine = build_engine(&pool, config)?;
            run_draft(&mut engine)?;
            print_roster(&engine);
        }
    }

    Ok(())
}

fn load_config(
    path: Option<&Path>,
    seed: Option<u64>,
    language: Option<Language>,
) -> Result<BuilderConfig> {
    let mut config = match path {
        Some(path) => BuilderConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => BuilderConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }
    if let Some(language) = language {
        config.language = language;
    }
    Ok(config)
}

fn load_pool(path: &Path) -> Result<RosterPool> {
    RosterPool::from_json_file(path)
        .with_context(|| format!("failed to load roster pool {}", path.display()))
}

fn build_engine(pool: &Path, config: BuilderConfig) -> Result<AssemblyEngine<TracePresenter>> {
    let pool = load_pool(pool)?;
    AssemblyEngine::with_presenter(pool, config, TracePresenter).context("roster pool is invalid")
}

fn run_random(
    engine: &mut AssemblyEngine<TracePresenter>,
    mode: FillMode,
    delay_ms: u64,
    verbose: bool,
) -> Result<()> {
    let pool = engine.pool().clone();
    let language = engine.language();
    let mut fill = engine.random_fill(mode)?;

    for event in fill.by_ref() {
        if verbose {
            match &event {
                FillEvent::FormationChosen { name } => println!("Formation: {}", name),
                FillEvent::CoachChosen { coach_id } => {
                    let name = pool.coach(coach_id).map_or(coach_id.as_str(), |c| c.display_name(language));
                    println!("Coach:     {}", name);
                }
                FillEvent::Assigned(assignment) => {
                    let name = pool
                        .player(&assignment.player_id)
                        .map_or(assignment.player_id.as_str(), |p| p.display_name(language));
                    let marker = if assignment.via_fallback { " (off-position)" } else { "" };
                    println!(
                        "  {:<10} {}{}",
                        assignment.slot_kind.slot_label(assignment.slot_index),
                        name,
                        marker
                    );
                }
                FillEvent::PoolExhausted { remaining, .. } => {
                    println!("⚠️  Ran out of players, {} slot(s) left empty", remaining)
                }
                FillEvent::Finished { .. } => {}
            }
        }
        if delay_ms > 0 {
            thread::sleep(Duration::from_millis(delay_ms));
        }
    }

    let report = fill.finish();
    info!(
        mode = %report.mode,
        fallbacks = report.fallbacks,
        unfilled = report.unfilled,
        "roster filled"
    );
    Ok(())
}

fn run_draft(engine: &mut AssemblyEngine<TracePresenter>) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut progress = engine.start_draft()?;

    loop {
        let offer = match progress {
            DraftProgress::Offer(offer) => offer,
            DraftProgress::Complete(_) => {
                println!("\n🏆 {}", engine.draft_title().unwrap_or_default());
                return Ok(());
            }
            DraftProgress::CannotContinue { reason, .. } => {
                println!("\n⚠️  {}", reason);
                engine.cancel_draft()?;
                return Ok(());
            }
        };

        println!("\n{}", engine.draft_title().unwrap_or_default());
        for (index, label) in offer_labels(engine, &offer).iter().enumerate() {
            println!("  {}. {}", index + 1, label);
        }
        print!("Pick 1-{} (q to cancel): ", offer.len());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            engine.cancel_draft()?;
            bail!("input closed before the draft finished");
        };
        let line = line?;
        let answer = line.trim();
        if answer.eq_ignore_ascii_case("q") {
            engine.cancel_draft()?;
            println!("Draft cancelled");
            return Ok(());
        }

        progress = match answer.parse::<usize>() {
            Ok(number) if (1..=offer.len()).contains(&number) => engine.choose_offered(number - 1)?,
            _ => {
                println!("Please enter a number between 1 and {}", offer.len());
                DraftProgress::Offer(offer)
            }
        };
    }
}

fn offer_labels<P: Presenter>(engine: &AssemblyEngine<P>, offer: &DraftOffer) -> Vec<String> {
    let pool = engine.pool();
    let language = engine.language();
    match offer {
        DraftOffer::Formations { names } => names.clone(),
        DraftOffer::Coaches { ids } => ids
            .iter()
            .map(|id| pool.coach(id).map_or(id.to_string(), |c| c.display_name(language).to_string()))
            .collect(),
        DraftOffer::Players { ids, .. } => ids
            .iter()
            .map(|id| match pool.player(id) {
                Some(player) => format!("{} ({})", player.display_name(language), player.position),
                None => id.to_string(),
            })
            .collect(),
    }
}

fn print_roster<P: Presenter>(engine: &AssemblyEngine<P>) {
    let snapshot = engine.snapshot();
    println!();
    for line in snapshot.render_lines(engine.pool(), engine.language()) {
        println!("{}", line);
    }
    let filled = engine.state().filled_count(SlotKind::Field) + engine.state().filled_count(SlotKind::Bench);
    println!("\n{} of {} slots filled", filled, filled + snapshot.unfilled_count());
}
