//! Scripted player.
//!
//! Each frame the bot turns toward the nearest enemy with a capped mouse
//! delta plus seeded jitter, levels its pitch, fires on a fixed cadence once
//! roughly on target and strafes left and right in alternating spells.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use strafe_core::{Game, Key};

/// Tuning for [`Bot`].
#[derive(Debug, Clone, Copy)]
pub struct BotConfig {
    /// Largest mouse delta per frame, in pixels.
    pub max_turn_px: f32,
    /// Uniform jitter added to each mouse delta, in pixels.
    pub jitter_px: f32,
    /// Frames between shots.
    pub fire_every: u64,
    /// Largest yaw error (radians) at which the bot still fires.
    pub fire_cone: f32,
    /// Frames per strafe direction.
    pub strafe_every: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            max_turn_px: 40.0,
            jitter_px: 3.0,
            fire_every: 20,
            fire_cone: 0.1,
            strafe_every: 90,
        }
    }
}

/// What the bot did this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BotAction {
    /// Mouse delta sent to the game.
    pub mouse: (f32, f32),
    /// Whether a shot was fired.
    pub fired: bool,
}

/// A seeded scripted player.
#[derive(Debug)]
pub struct Bot {
    config: BotConfig,
    rng: ChaCha8Rng,
    frame: u64,
    strafe_key: Option<Key>,
}

impl Bot {
    pub fn new(config: BotConfig, rng: ChaCha8Rng) -> Self {
        Self {
            config,
            rng,
            frame: 0,
            strafe_key: None,
        }
    }

    /// Feeds one frame of input into `game`. Call before [`Game::frame`].
    pub fn act(&mut self, game: &mut Game) -> BotAction {
        let frame = self.frame;
        self.frame += 1;

        if !game.input().is_pointer_captured() {
            game.set_pointer_captured(true);
        }
        self.strafe(game, frame);

        let Some(target) = nearest_enemy(game) else {
            return BotAction::default();
        };

        let camera = game.world().player.camera;
        let error = yaw_error(camera.yaw, yaw_towards(camera.position, target));
        let sensitivity = game.config().look_sensitivity;
        let jitter = self.config.jitter_px;

        // yaw -= dx * sensitivity, so a positive error needs a negative dx.
        let dx = (-error / sensitivity).clamp(-self.config.max_turn_px, self.config.max_turn_px)
            + self.rng.gen_range(-jitter..=jitter);
        let dy = (camera.pitch / sensitivity).clamp(-self.config.max_turn_px, self.config.max_turn_px);
        game.mouse_move(dx, dy);

        let fired = frame % self.config.fire_every == 0
            && error.abs() < self.config.fire_cone
            && game.fire().is_some();

        BotAction {
            mouse: (dx, dy),
            fired,
        }
    }

    /// Releases held keys, for a fresh start after a reset.
    pub fn release(&mut self, game: &mut Game) {
        if let Some(key) = self.strafe_key.take() {
            game.key_up(key);
        }
    }

    fn strafe(&mut self, game: &mut Game, frame: u64) {
        if frame % self.config.strafe_every != 0 {
            return;
        }
        let next = if self.strafe_key == Some(Key::KeyA) {
            Key::KeyD
        } else {
            Key::KeyA
        };
        self.release(game);
        game.key_down(next);
        self.strafe_key = Some(next);
    }
}

fn nearest_enemy(game: &Game) -> Option<Vec3> {
    let eye = game.world().player.position();
    game.world()
        .enemies
        .iter()
        .map(|(_, enemy)| enemy.position)
        .min_by(|a, b| a.distance(eye).total_cmp(&b.distance(eye)))
}

/// Yaw that faces `target` from `from` on the floor plane.
fn yaw_towards(from: Vec3, target: Vec3) -> f32 {
    let delta = target - from;
    (-delta.x).atan2(-delta.z)
}

/// Signed shortest rotation from `current` to `desired`, in `[-π, π]`.
fn yaw_error(current: f32, desired: f32) -> f32 {
    (desired - current + PI).rem_euclid(TAU) - PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use strafe_core::{GameConfig, NullFrontend};

    fn bot() -> Bot {
        Bot::new(
            BotConfig {
                jitter_px: 0.0,
                ..BotConfig::default()
            },
            ChaCha8Rng::seed_from_u64(7),
        )
    }

    #[test]
    fn yaw_towards_matches_forward_axis() {
        let eye = Vec3::new(0.0, 1.6, 0.0);
        assert!(yaw_towards(eye, Vec3::new(0.0, 1.0, -5.0)).abs() < 1e-6);
        assert!((yaw_towards(eye, Vec3::new(5.0, 1.0, -5.0)) + PI / 4.0).abs() < 1e-6);
    }

    #[test]
    fn yaw_error_takes_the_short_way_round() {
        assert!((yaw_error(3.0, -3.0) - (TAU - 6.0)).abs() < 1e-5);
        assert!((yaw_error(0.0, 0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn bot_turns_toward_the_nearest_enemy() {
        let mut game = Game::new(GameConfig {
            enemy_spawn_points: vec![glam::Vec2::new(5.0, -5.0)],
            ..GameConfig::default()
        });
        // Never fires, so the target survives.
        let mut bot = Bot::new(
            BotConfig {
                jitter_px: 0.0,
                fire_cone: 0.0,
                ..BotConfig::default()
            },
            ChaCha8Rng::seed_from_u64(7),
        );

        let mut now = 0.0;
        for _ in 0..60 {
            bot.act(&mut game);
            game.frame(now, &mut NullFrontend);
            now += 1000.0 / 60.0;
        }

        let camera = game.world().player.camera;
        let target = game.world().enemies.iter().next().unwrap().1.position;
        let error = yaw_error(camera.yaw, yaw_towards(camera.position, target));
        assert!(error.abs() < 0.1, "error {error}");
    }

    #[test]
    fn bot_turn_is_capped_and_levels_pitch() {
        let mut game = Game::new(GameConfig {
            enemy_spawn_points: vec![glam::Vec2::new(5.0, -5.0)],
            ..GameConfig::default()
        });
        let mut bot = bot();

        // A quarter turn to the right is far more than one frame's cap.
        let action = bot.act(&mut game);
        assert_eq!(action.mouse, (40.0, 0.0));
        assert!(!action.fired);
        assert!((game.world().player.camera.yaw - (-0.08)).abs() < 1e-6);
    }

    #[test]
    fn bot_holds_fire_with_no_target() {
        let mut game = Game::new(GameConfig {
            enemy_spawn_points: Vec::new(),
            ..GameConfig::default()
        });
        let mut bot = bot();
        let action = bot.act(&mut game);
        assert!(!action.fired);
        assert!(game.world().projectiles.is_empty());
    }

    #[test]
    fn bot_alternates_strafe_keys() {
        let mut game = Game::new(GameConfig::default());
        let mut bot = Bot::new(
            BotConfig {
                strafe_every: 2,
                ..BotConfig::default()
            },
            ChaCha8Rng::seed_from_u64(1),
        );

        bot.act(&mut game);
        assert_eq!(bot.strafe_key, Some(Key::KeyA));
        bot.act(&mut game);
        bot.act(&mut game);
        assert_eq!(bot.strafe_key, Some(Key::KeyD));

        bot.release(&mut game);
        assert!(game.input().flags().is_empty());
    }
}
