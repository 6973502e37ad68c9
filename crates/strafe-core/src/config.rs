//! Gameplay tunables.
//!
//! Every constant the game loop, managers and resolvers use lives in
//! [`GameConfig`]. The defaults reproduce the classic demo: two enemies, a
//! 100 HP player and two-shot kills.
//!
//! # Units
//!
//! Speeds are expressed in world units per *reference frame* (1/60 s). The
//! game loop scales every positional delta by `elapsed_ms / reference_frame_ms`
//! so simulation speed does not depend on the host refresh rate.
//!
//! # Loading
//!
//! Configs are plain JSON. Missing fields fall back to their defaults, so a
//! file only needs to name what it changes:
//!
//! ```
//! use strafe_core::config::GameConfig;
//!
//! let config = GameConfig::from_json_str(r#"{ "enemy_speed": 0.05 }"#).unwrap();
//! assert_eq!(config.enemy_speed, 0.05);
//! assert_eq!(config.player_health, 100);
//! ```

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Duration of one reference frame in milliseconds (60 Hz).
pub const REFERENCE_FRAME_MS: f32 = 1000.0 / 60.0;

/// Errors raised while loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config text is not valid JSON for a [`GameConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the game cannot run with.
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        /// Name of the offending field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

/// All gameplay tunables.
///
/// See the module docs for units. `Default` yields the classic demo values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Player health at spawn and after a reset.
    pub player_health: i32,
    /// Camera height above the floor.
    pub player_eye_height: f32,
    /// Walk speed along each local axis, per reference frame.
    pub player_move_speed: f32,
    /// Rescale combined forward+strafe motion to `player_move_speed`.
    ///
    /// Off by default: diagonal movement is faster than axis-aligned movement,
    /// matching the arcade feel of the classic demo.
    pub normalize_diagonal: bool,
    /// Radians of yaw/pitch per pixel of mouse motion.
    pub look_sensitivity: f32,

    /// Projectile speed, per reference frame.
    pub projectile_speed: f32,
    /// Damage dealt to an enemy by one projectile.
    pub projectile_damage: i32,
    /// A projectile hits an enemy strictly closer than this.
    pub projectile_hit_radius: f32,
    /// Projectiles older than this are removed.
    pub projectile_lifetime_ms: f32,
    /// Upper bound on live projectiles; the oldest is evicted past it.
    pub max_projectiles: usize,

    /// Enemy health at spawn.
    pub enemy_health: i32,
    /// Enemy seek speed, per reference frame.
    pub enemy_speed: f32,
    /// Height at which enemies are spawned.
    pub enemy_spawn_height: f32,
    /// Enemy spawn points on the floor plane, as `(x, z)`.
    pub enemy_spawn_points: Vec<Vec2>,
    /// An enemy attacks when strictly closer than this to the player.
    pub enemy_attack_range: f32,
    /// Health removed from the player by one enemy attack.
    pub enemy_attack_damage: i32,
    /// Delay between two attacks of the same enemy.
    pub enemy_attack_cooldown_ms: f32,

    /// Length of the frame all per-frame speeds are expressed against.
    pub reference_frame_ms: f32,
    /// Elapsed time per frame is clamped to this, so a stalled host does not
    /// teleport entities.
    pub max_frame_ms: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_health: 100,
            player_eye_height: 1.6,
            player_move_speed: 0.1,
            normalize_diagonal: false,
            look_sensitivity: 0.002,

            projectile_speed: 0.5,
            projectile_damage: 25,
            projectile_hit_radius: 1.0,
            projectile_lifetime_ms: 5000.0,
            max_projectiles: 64,

            enemy_health: 50,
            enemy_speed: 0.02,
            enemy_spawn_height: 1.0,
            enemy_spawn_points: vec![Vec2::new(5.0, -5.0), Vec2::new(-5.0, -10.0)],
            enemy_attack_range: 2.0,
            enemy_attack_damage: 1,
            enemy_attack_cooldown_ms: 1000.0,

            reference_frame_ms: REFERENCE_FRAME_MS,
            max_frame_ms: 250.0,
        }
    }
}

impl GameConfig {
    /// Parses and validates a config from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] for values rejected by [`validate`](Self::validate).
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`from_json_str`](Self::from_json_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Checks that every tunable is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive_int("player_health", self.player_health)?;
        finite("player_eye_height", self.player_eye_height)?;
        positive("player_move_speed", self.player_move_speed)?;
        positive("look_sensitivity", self.look_sensitivity)?;

        positive("projectile_speed", self.projectile_speed)?;
        positive_int("projectile_damage", self.projectile_damage)?;
        positive("projectile_hit_radius", self.projectile_hit_radius)?;
        positive("projectile_lifetime_ms", self.projectile_lifetime_ms)?;
        if self.max_projectiles == 0 {
            return Err(invalid("max_projectiles", "must be at least 1"));
        }

        positive_int("enemy_health", self.enemy_health)?;
        positive("enemy_speed", self.enemy_speed)?;
        finite("enemy_spawn_height", self.enemy_spawn_height)?;
        if let Some(point) = self.enemy_spawn_points.iter().find(|p| !p.is_finite()) {
            return Err(invalid(
                "enemy_spawn_points",
                format!("spawn point {point} is not finite"),
            ));
        }
        positive("enemy_attack_range", self.enemy_attack_range)?;
        positive_int("enemy_attack_damage", self.enemy_attack_damage)?;
        positive("enemy_attack_cooldown_ms", self.enemy_attack_cooldown_ms)?;

        positive("reference_frame_ms", self.reference_frame_ms)?;
        positive("max_frame_ms", self.max_frame_ms)?;
        Ok(())
    }

    /// Converts an elapsed wall-clock span into reference frames.
    #[must_use]
    pub fn frame_scale(&self, elapsed_ms: f32) -> f32 {
        elapsed_ms / self.reference_frame_ms
    }

    /// Number of simulation sub-steps for an elapsed span: enough that none
    /// is longer than one reference frame, and at least one.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn sub_steps(&self, elapsed_ms: f32) -> u32 {
        // Tolerance keeps an exact reference frame from rounding up to two.
        let frames = self.frame_scale(elapsed_ms) - 1e-3;
        frames.ceil().max(1.0) as u32
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} is not finite")))
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be greater than zero")))
    }
}

fn positive_int(field: &'static str, value: i32) -> Result<(), ConfigError> {
    if value > 0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be greater than zero")))
    }
}
