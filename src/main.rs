//! Haunted Road headless runner
//!
//! Drives the simulation at a fixed timestep with the autopilot at the wheel,
//! playing level after level until the lives run out or the tick cap is hit.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use haunted_road::audio::{AudioSink, LogAudio};
use haunted_road::settings::Settings;
use haunted_road::sim::{GameEvent, TickInput, TickOutcome, World};

/// Play Haunted Road headless with the autopilot driving
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Settings file (JSON); defaults apply when it does not exist
    #[arg(long, default_value = "haunted-road.json")]
    settings: PathBuf,
    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,
    /// Override the starting level
    #[arg(long)]
    level: Option<u32>,
    /// Override the tick cap (0 = no limit)
    #[arg(long)]
    max_ticks: Option<u64>,
    /// Pace ticks in real time
    #[arg(long)]
    realtime: bool,
    /// Log status every N ticks
    #[arg(long, default_value_t = 100)]
    status_every: u64,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Install env_logger; `RUST_LOG` still overrides the default filter
fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let env = env_logger::Env::default().default_filter_or(level.to_string());
    let _ = env_logger::Builder::from_env(env).try_init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut settings = Settings::load_or_default(&args.settings)
        .with_context(|| format!("loading {}", args.settings.display()))?;
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    if let Some(level) = args.level {
        settings.start_level = level;
    }
    if let Some(max_ticks) = args.max_ticks {
        settings.max_ticks = max_ticks;
    }
    settings.realtime |= args.realtime;

    log::info!("Haunted Road starting with seed {}", settings.seed);
    let mut audio = LogAudio::new(settings.muted);
    let summary = run(&settings, &mut audio, args.status_every)?;

    println!(
        "Final score {} on level {} after {} ticks ({} lives left)",
        summary.score, summary.level, summary.ticks, summary.lives
    );
    Ok(())
}

struct Summary {
    score: u64,
    level: u32,
    lives: u32,
    ticks: u64,
}

fn run(settings: &Settings, audio: &mut dyn AudioSink, status_every: u64) -> Result<Summary> {
    let mut world = World::from_settings(settings);
    let mut level = settings.start_level;
    world.init(level);

    let input = TickInput {
        key: None,
        autopilot: true,
    };
    let dt = Duration::from_secs_f64(settings.tick_dt());
    let mut next_tick = Instant::now();
    let mut total_ticks = 0u64;

    loop {
        if settings.max_ticks > 0 && total_ticks >= settings.max_ticks {
            log::info!("tick cap of {} reached", settings.max_ticks);
            break;
        }
        if settings.realtime {
            let now = Instant::now();
            if next_tick > now {
                std::thread::sleep(next_tick - now);
            }
            next_tick += dt;
        }

        let outcome = world
            .tick(&input)
            .with_context(|| format!("tick {} on level {}", world.ticks() + 1, level))?;
        total_ticks += 1;

        for event in world.drain_events() {
            if let GameEvent::Sound(sound) = event {
                audio.play(sound);
            }
        }
        if status_every > 0 && total_ticks % status_every == 0 {
            log::info!("{}", world.status_text());
        }

        match outcome {
            TickOutcome::Continue => {}
            TickOutcome::PlayerDied if world.is_game_over() => {
                log::info!("game over: {}", world.status_text());
                break;
            }
            TickOutcome::PlayerDied => {
                log::info!("racer lost; restarting level {}", level);
                world.init(level);
            }
            TickOutcome::LevelComplete => {
                level += 1;
                world.init(level);
            }
        }
    }

    let summary = Summary {
        score: world.score(),
        level: world.level(),
        lives: world.lives(),
        ticks: total_ticks,
    };
    world.teardown();
    Ok(summary)
}
