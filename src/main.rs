//! Star Siege entry point
//!
//! Runs headless demo rounds with the autopilot at a fixed frame rate and
//! reports how each one ended.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use star_siege::audio::AudioManager;
use star_siege::consts::FRAME_MS;
use star_siege::sim::{GameState, Outcome, Phase, TickInput, reset_round, teardown, tick};
use star_siege::ui::Hud;
use star_siege::{Settings, init_logging};

/// Headless wave-and-boss shooter demo
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RNG seed for the whole session
    #[arg(short, long, default_value_t = 1)]
    seed: u64,

    /// Number of rounds to play
    #[arg(short, long, default_value_t = 3)]
    rounds: u32,

    /// JSON file with round settings
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Give up on a round after this many simulated seconds
    #[arg(long, default_value_t = 300.0)]
    max_seconds: f64,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Silence audio cues
    #[arg(long)]
    mute: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct RoundReport {
    round: u32,
    /// None when the round was abandoned
    outcome: Option<Outcome>,
    ticks: u64,
    sim_seconds: f64,
    /// HUD as it read when the round ended
    hud: Option<Hud>,
    cues: usize,
}

#[derive(Debug, Serialize)]
struct Report {
    seed: u64,
    rounds: Vec<RoundReport>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = match &args.settings {
        Some(path) => match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };

    log::info!("Star Siege (native) starting with seed {}", args.seed);

    let mut state = GameState::new(args.seed, settings);
    let mut audio = AudioManager::new();
    audio.set_muted(args.mute);

    let report = Report {
        seed: args.seed,
        rounds: (1..=args.rounds)
            .map(|round| play_round(&mut state, &mut audio, round, args.max_seconds))
            .collect(),
    };
    teardown(&mut state);

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                log::error!("Failed to serialize report: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        for r in &report.rounds {
            let outcome = r
                .outcome
                .map_or_else(|| "abandoned".to_string(), |o| format!("{:?}", o));
            println!(
                "round {}: {} after {:.1}s ({} ticks, {} cues)",
                r.round, outcome, r.sim_seconds, r.ticks, r.cues
            );
        }
    }

    ExitCode::SUCCESS
}

/// Play one autopilot round from Idle back to Idle
fn play_round(state: &mut GameState, audio: &mut AudioManager, round: u32, max_seconds: f64) -> RoundReport {
    let input = TickInput {
        start: true,
        autopilot: true,
        ..Default::default()
    };
    let started_ticks = state.time_ticks;
    let started_ms = state.now_ms;
    let max_ticks = (max_seconds * 1000.0 / f64::from(FRAME_MS)).ceil() as u64;
    let mut hud = None;
    let mut cues = 0;
    let mut left_idle = false;

    for _ in 0..max_ticks {
        let before = state.phase;
        tick(state, &input, FRAME_MS);

        let events = state.drain_events();
        audio.handle_events(&events);
        cues += audio.take_played().len();

        if matches!(state.phase, Phase::RoundEnd(_)) && !matches!(before, Phase::RoundEnd(_)) {
            hud = Some(Hud::from_state(state));
        }
        left_idle |= state.phase != Phase::Idle;
        if left_idle && state.phase == Phase::Idle {
            break;
        }
    }

    let finished = left_idle && state.phase == Phase::Idle;
    if !finished {
        log::warn!("Round {} still running after {}s, abandoning", round, max_seconds);
        reset_round(state);
    }

    let report = RoundReport {
        round,
        outcome: if finished { state.last_outcome } else { None },
        ticks: state.time_ticks - started_ticks,
        sim_seconds: (state.now_ms - started_ms) / 1000.0,
        hud,
        cues,
    };
    log::info!("Round {} finished: {:?}", round, report.outcome);
    report
}
