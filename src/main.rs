//! Pose Arena - headless match runner
//!
//! Plays one match from a seeded bot or a recorded pose script and prints
//! the outcome. Optionally appends it to a JSON record book.

use clap::Parser;
use serde::Serialize;

use pose_arena::core::config::ArenaConfig;
use pose_arena::core::error::Result;
use pose_arena::core::types::{Millis, PlayerId};
use pose_arena::pose::{BotSource, PoseSource, ScriptSource};
use pose_arena::records::RecordBook;
use pose_arena::session::{ArenaEvent, GamePhase, MatchOutcome, MatchSession};

/// Pose Arena - run a headless match
#[derive(Parser, Debug)]
#[command(name = "pose-arena")]
#[command(about = "Run a headless pose-controlled match and print the outcome")]
struct Args {
    /// TOML config file (defaults are used when omitted)
    #[arg(long)]
    config: Option<String>,

    /// Random seed for the grid shuffle and the bot
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between ticks
    #[arg(long, default_value_t = 16)]
    frame_ms: Millis,

    /// JSON-lines pose script; a bot plays when omitted
    #[arg(long)]
    script: Option<String>,

    /// JSON record book to append the result to
    #[arg(long)]
    records: Option<String>,

    /// Player 1 name
    #[arg(long, default_value = "Player 1")]
    p1: String,

    /// Player 2 name
    #[arg(long, default_value = "Player 2")]
    p2: String,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Print every event as it happens
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct RunResult<'a> {
    seed: u64,
    ticks: u64,
    events: usize,
    outcome: &'a MatchOutcome,
}

enum Source {
    Bot(BotSource),
    Script(ScriptSource),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("pose_arena=info")
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let config = match &args.config {
        Some(path) => ArenaConfig::load(path)?,
        None => ArenaConfig::default(),
    };

    let mut source = match &args.script {
        Some(path) => Source::Script(ScriptSource::load(path)?),
        None => Source::Bot(BotSource::new(&config, seed.wrapping_add(1))),
    };

    let mut session = MatchSession::new(config, seed)?;
    if let Some(path) = &args.records {
        session = session.with_sink(Box::new(RecordBook::open(path)?))?;
    }
    session.set_player_names(args.p1.clone(), args.p2.clone());

    let frame_ms = args.frame_ms.max(1);
    let mut now: Millis = 0;
    let mut ticks: u64 = 0;
    let mut event_count = 0;

    for event in session.start_match(now) {
        report(&args, now, &event);
    }

    while session.phase() == GamePhase::Playing {
        now += frame_ms;
        ticks += 1;
        let events = match &mut source {
            Source::Bot(bot) => session.tick_from_source(now, bot),
            Source::Script(script) => {
                script.advance_to(now);
                session.tick_from_source(now, script as &mut dyn PoseSource)
            }
        };
        event_count += events.len();
        for event in &events {
            report(&args, now, event);
        }
    }

    // Wait for the record book write before exiting
    session.close_sink();

    let Some(outcome) = session.outcome() else {
        tracing::warn!("Match ended without an outcome");
        return Ok(());
    };

    if args.format == "json" {
        let result = RunResult {
            seed,
            ticks,
            events: event_count,
            outcome,
        };
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("=== MATCH OVER ({:?}) ===", outcome.reason);
        println!("Verdict: {:?} after {}ms ({} ticks)", outcome.verdict, outcome.ended_at, ticks);
        for player in PlayerId::ALL {
            let result = outcome.result(player);
            println!(
                "{} {:<12} hp {:>5.1}  score {:>5}  rank {:<3}  dmg {:.0}  atk {}  blk {}  sup {}  ctr {}",
                player,
                result.name,
                result.final_hp,
                result.score,
                result.rank,
                result.stats.total_damage_dealt,
                result.stats.attack_count,
                result.stats.defend_count,
                result.stats.super_used,
                result.stats.counter_success
            );
        }
    }

    Ok(())
}

fn report(args: &Args, now: Millis, event: &ArenaEvent) {
    if !args.verbose {
        return;
    }
    let sound = event.sound().unwrap_or("-");
    match event.light_cue() {
        Some(cue) => eprintln!("[{:>6}ms] {} ({}) {:?}", now, sound, cue, event),
        None => eprintln!("[{:>6}ms] {} {:?}", now, sound, event),
    }
}
