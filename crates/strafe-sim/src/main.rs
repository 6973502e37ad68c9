//! Headless runner: plays the Strafe core with a scripted bot and prints a
//! JSON summary of the session.
//!
//! ```text
//! strafe-sim --frames 3600 --seed 7 --restart-on-death
//! RUST_LOG=strafe_core=debug strafe-sim --config tuning.json
//! ```

mod bot;
mod frontend;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use strafe_core::{Game, GameConfig, GameEvent, GamePhase};
use tracing::{debug, info, trace};

use crate::bot::{Bot, BotConfig};
use crate::frontend::LoggingFrontend;

#[derive(Parser, Debug)]
#[command(name = "strafe-sim")]
#[command(about = "Run the Strafe game core headless with a scripted bot")]
struct Cli {
    /// JSON file with game tunables; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to run
    #[arg(long, default_value_t = 3600)]
    frames: u64,

    /// Simulated milliseconds per frame
    #[arg(long, default_value_t = 1000.0 / 60.0)]
    frame_ms: f64,

    /// Seed for the bot's aim jitter
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Reset and keep playing when the player is defeated
    #[arg(long)]
    restart_on_death: bool,
}

/// What happened over a whole run.
#[derive(Debug, Default, Serialize)]
struct Summary {
    frames: u64,
    shots: u64,
    hits: u64,
    enemies_defeated: u64,
    damage_taken: u64,
    final_health: i32,
    final_phase: Option<GamePhase>,
    restarts: u32,
    peak_scene_objects: usize,
}

impl Summary {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ProjectileFired { .. } => self.shots += 1,
            GameEvent::EnemyHit { .. } => self.hits += 1,
            GameEvent::EnemyDefeated { .. } => self.enemies_defeated += 1,
            GameEvent::PlayerDamaged { .. } => self.damage_taken += 1,
            _ => {}
        }
    }
}

fn init_tracing() -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("strafe_core=info,strafe_sim=info"))?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(GameConfig::default()),
    }
}

fn run(cli: &Cli, config: GameConfig) -> Result<Summary> {
    anyhow::ensure!(
        cli.frame_ms.is_finite() && cli.frame_ms >= 0.0,
        "--frame-ms must be a non-negative number"
    );

    let mut game = Game::try_new(config)?;
    let mut frontend = LoggingFrontend::new();
    let mut bot = Bot::new(BotConfig::default(), ChaCha8Rng::seed_from_u64(cli.seed));
    let mut summary = Summary::default();

    info!(frames = cli.frames, frame_ms = cli.frame_ms, seed = cli.seed, "run started");

    let mut now = 0.0;
    for frame in 0..cli.frames {
        let action = bot.act(&mut game);
        trace!(frame, dx = action.mouse.0, dy = action.mouse.1, "bot look");
        if action.fired {
            debug!(frame, "bot fired");
        }
        let report = game.frame(now, &mut frontend);
        now += cli.frame_ms;
        summary.frames += 1;
        for event in &report.events {
            summary.record(event);
        }

        if report.phase == GamePhase::Over {
            if !cli.restart_on_death {
                break;
            }
            bot.release(&mut game);
            game.reset();
            summary.restarts += 1;
        }
    }

    summary.final_health = game.world().player.health;
    summary.final_phase = Some(game.phase());
    summary.peak_scene_objects = frontend.peak_objects();
    info!(
        frames = frontend.frames_rendered(),
        live_objects = frontend.live_objects(),
        game_overs = frontend.game_overs(),
        "run finished"
    );
    Ok(summary)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing()?;

    let config = load_config(cli.config.as_ref())?;
    let summary = run(&cli, config)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(frames: u64, restart_on_death: bool) -> Cli {
        Cli {
            config: None,
            frames,
            frame_ms: 1000.0 / 60.0,
            seed: 3,
            restart_on_death,
        }
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::parse_from(["strafe-sim"]);
        assert_eq!(cli.frames, 3600);
        assert!((cli.frame_ms - 16.666_666).abs() < 1e-3);
        assert_eq!(cli.seed, 0);
        assert!(!cli.restart_on_death);
        assert!(cli.config.is_none());
    }

    #[test]
    fn bot_scores_hits_against_default_enemies() {
        let summary = run(&cli(1200, false), GameConfig::default()).unwrap();
        assert_eq!(summary.frames, 1200);
        assert!(summary.shots > 0);
        assert!(summary.hits > 0);
        assert!(summary.hits <= summary.shots);
    }

    #[test]
    fn same_seed_same_summary() {
        let first = run(&cli(600, false), GameConfig::default()).unwrap();
        let second = run(&cli(600, false), GameConfig::default()).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn restart_on_death_keeps_playing() {
        // A fragile player next to an enemy dies within a few frames.
        let config = GameConfig {
            player_health: 1,
            enemy_spawn_points: vec![glam::Vec2::new(0.0, -1.0)],
            ..GameConfig::default()
        };
        let summary = run(&cli(300, true), config.clone()).unwrap();
        assert!(summary.restarts >= 1);
        assert_eq!(summary.frames, 300);

        let summary = run(&cli(300, false), config).unwrap();
        assert_eq!(summary.restarts, 0);
        assert_eq!(summary.final_phase, Some(GamePhase::Over));
        assert!(summary.frames < 300);
    }

    #[test]
    fn missing_config_file_is_reported() {
        let err = load_config(Some(&PathBuf::from("/nonexistent/strafe.json"))).unwrap_err();
        assert!(err.to_string().contains("failed to load config"));
    }
}
