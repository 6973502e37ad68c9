//! The game loop.
//!
//! [`Game`] owns the [`World`], the [`InputState`] and the gameplay tunables
//! and advances them one display frame at a time. It is a two-state machine:
//!
//! - **Running**: every frame simulates movement and combat
//! - **Over**: entered once when player health reaches zero; simulation and
//!   input are frozen until [`Game::reset`]
//!
//! # Frame Order
//!
//! While running, [`Game::frame`] performs, in order:
//!
//! 1. Measure elapsed time since the previous frame (clamped)
//! 2. Turn held movement keys into the player's velocity intent
//! 3. Move the player along the camera's local axes and clear the intent
//! 4. Expire old projectiles, then advance the rest
//! 5. Resolve projectile hits
//! 6. Step enemies toward the player and count down their cooldowns
//! 7. Resolve enemy attacks; switch to Over if the player falls
//! 8. Sync the scene and push health to the HUD
//! 9. Render
//!
//! All positional deltas are scaled by elapsed time relative to a 60 Hz
//! reference frame, so the simulation runs at the same speed on any display.
//! Steps 2 to 7 run once per sub-step of at most one reference frame, so a
//! slow host sees the same hits as a fast one.
//!
//! # Example
//!
//! ```
//! use strafe_core::{Game, GameConfig, GamePhase, NullFrontend};
//!
//! let mut game = Game::new(GameConfig::default());
//! let report = game.frame(0.0, &mut NullFrontend);
//!
//! assert_eq!(report.phase, GamePhase::Running);
//! assert_eq!(report.elapsed_ms, 0.0);
//! assert_eq!(game.world().enemies.len(), 2);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace_span, warn};

use crate::config::{ConfigError, GameConfig};
use crate::entity::EntityId;
use crate::event::{EventLog, GameEvent};
use crate::frontend::Frontend;
use crate::input::{InputAction, InputState, Key};
use crate::resolver::{EnemyAttackResolver, ProjectileHitResolver, Resolution, Resolver};
use crate::world::World;

// =============================================================================
// Phase and Report
// =============================================================================

/// Whether the game is being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Input and simulation are live.
    Running,
    /// The player was defeated. Only [`Game::reset`] leaves this state.
    Over,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "Running"),
            Self::Over => write!(f, "Over"),
        }
    }
}

/// What one call to [`Game::frame`] did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Phase after the frame.
    pub phase: GamePhase,
    /// Simulated time for this frame, after clamping.
    pub elapsed_ms: f32,
    /// Events since the previous frame, including those raised by input
    /// callbacks in between.
    pub events: Vec<GameEvent>,
}

// =============================================================================
// Game
// =============================================================================

/// The game-state aggregate and per-frame driver.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    world: World,
    input: InputState,
    phase: GamePhase,
    events: EventLog,
    hits: ProjectileHitResolver,
    attacks: EnemyAttackResolver,
    last_frame_ms: Option<f64>,
    frame_count: u64,
}

impl Game {
    /// Creates a running game in its starting state.
    ///
    /// `config` is trusted; use [`try_new`](Self::try_new) for configs from
    /// outside the program.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let mut events = EventLog::new();
        let world = World::new(&config, &mut events);
        let input = InputState::new(config.look_sensitivity);
        info!(enemies = world.enemies.len(), "game started");
        Self {
            config,
            world,
            input,
            phase: GamePhase::Running,
            events,
            hits: ProjectileHitResolver::new(),
            attacks: EnemyAttackResolver::new(),
            last_frame_ms: None,
            frame_count: 0,
        }
    }

    /// Validates `config`, then creates a game.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the config fails validation.
    pub fn try_new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Runs one frame at host time `now_ms` and presents it through `frontend`.
    ///
    /// The first frame simulates zero elapsed time. See the module docs for
    /// the order of operations.
    pub fn frame<F: Frontend + ?Sized>(&mut self, now_ms: f64, frontend: &mut F) -> FrameReport {
        let span = trace_span!("frame", frame = self.frame_count, phase = %self.phase);
        let _enter = span.enter();

        let elapsed_ms = self.advance_clock(now_ms);
        if self.phase == GamePhase::Running {
            self.simulate(elapsed_ms);
        }

        let events = self.events.drain();
        self.present(&events, frontend);
        self.frame_count += 1;

        FrameReport {
            phase: self.phase,
            elapsed_ms,
            events,
        }
    }

    /// Step 1: elapsed time since the previous frame, clamped to
    /// `[0, max_frame_ms]`.
    #[allow(clippy::cast_possible_truncation)]
    fn advance_clock(&mut self, now_ms: f64) -> f32 {
        let elapsed = self
            .last_frame_ms
            .map_or(0.0, |last| (now_ms - last).max(0.0) as f32);
        self.last_frame_ms = Some(now_ms);

        if elapsed > self.config.max_frame_ms {
            warn!(
                elapsed_ms = elapsed,
                max_frame_ms = self.config.max_frame_ms,
                "frame time clamped"
            );
            self.config.max_frame_ms
        } else {
            elapsed
        }
    }

    /// Steps 2 to 7, split into sub-steps no longer than one reference frame
    /// so fast projectiles cannot skip past an enemy on a slow host.
    ///
    /// Stops early once the player is defeated.
    fn simulate(&mut self, elapsed_ms: f32) {
        let steps = self.config.sub_steps(elapsed_ms);
        #[allow(clippy::cast_precision_loss)]
        let step_ms = elapsed_ms / steps as f32;

        for _ in 0..steps {
            self.step(step_ms);
            if self.phase == GamePhase::Over {
                break;
            }
        }
    }

    fn step(&mut self, elapsed_ms: f32) {
        let config = &self.config;
        let frame_scale = config.frame_scale(elapsed_ms);

        self.world.player.velocity_intent = self
            .input
            .movement_intent(config.player_move_speed, config.normalize_diagonal);
        self.world.apply_player_motion(frame_scale);

        for id in self.world.projectiles.expire(elapsed_ms) {
            self.events.push(GameEvent::ProjectileExpired { id });
        }
        self.world.projectiles.advance(frame_scale);

        run_resolver(&self.hits, &mut self.world, config, &mut self.events);

        let player_position = self.world.player.position();
        self.world.enemies.advance_seek(player_position, frame_scale);
        self.world.enemies.tick_cooldowns(elapsed_ms);

        if run_resolver(&self.attacks, &mut self.world, config, &mut self.events)
            == Resolution::PlayerDefeated
        {
            self.phase = GamePhase::Over;
            self.input.release_all();
            info!(frame = self.frame_count, "game over");
        }
    }

    /// Steps 8 and 9.
    fn present<F: Frontend + ?Sized>(&self, events: &[GameEvent], frontend: &mut F) {
        for event in events {
            if let Some((id, kind, position)) = event.spawned() {
                frontend.add(id, kind, position);
            }
            if let Some(id) = event.removed() {
                frontend.remove(id);
            }
        }
        for (id, projectile) in self.world.projectiles.iter() {
            frontend.set_position(id, projectile.position);
        }
        for (id, enemy) in self.world.enemies.iter() {
            frontend.set_position(id, enemy.position);
        }

        frontend.show_health(self.world.player.health);
        if events.contains(&GameEvent::PlayerDefeated) {
            frontend.show_game_over();
        }
        frontend.render(&self.world.player.camera);
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Handles a key press. `Space` fires immediately.
    ///
    /// Ignored while the game is over.
    pub fn key_down(&mut self, key: Key) {
        if self.phase == GamePhase::Over {
            return;
        }
        if let Some(InputAction::Fire) = self.input.key_down(key) {
            self.fire();
        }
    }

    /// Handles a key release.
    pub fn key_up(&mut self, key: Key) {
        self.input.key_up(key);
    }

    /// Handles relative mouse motion. Only turns the view while the pointer is
    /// captured and the game is running.
    pub fn mouse_move(&mut self, dx: f32, dy: f32) {
        if self.phase == GamePhase::Over {
            return;
        }
        if let Some(orientation) = self.input.look(dx, dy) {
            self.world
                .player
                .camera
                .set_orientation(orientation.yaw, orientation.pitch);
        }
    }

    /// Enters or leaves pointer-capture (mouse look) mode.
    pub fn set_pointer_captured(&mut self, captured: bool) {
        debug!(captured, "pointer capture changed");
        self.input.set_pointer_captured(captured);
    }

    /// Fires a projectile from the player's eye along the view yaw.
    ///
    /// Returns `None` while the game is over.
    pub fn fire(&mut self) -> Option<EntityId> {
        if self.phase == GamePhase::Over {
            return None;
        }
        Some(self.world.fire(&mut self.events))
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Restores the starting state without restarting the host.
    ///
    /// Every entity is despawned (the scene learns about it on the next
    /// frame), the player and enemies are recreated from the config, held keys
    /// and look angles are cleared and the phase returns to Running. The frame
    /// clock keeps running.
    pub fn reset(&mut self) {
        self.world.reset(&self.config, &mut self.events);
        self.input.reset();
        self.phase = GamePhase::Running;
        info!(frame = self.frame_count, "game reset");
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Returns `true` while the game is being played.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Read-only view of the world.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the world, for scenario setup.
    #[must_use]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// World and pending event log together, so entities spawned during setup
    /// reach the scene on the next frame.
    pub fn world_and_events_mut(&mut self) -> (&mut World, &mut EventLog) {
        (&mut self.world, &mut self.events)
    }

    /// Active tunables.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Input state.
    #[must_use]
    pub const fn input(&self) -> &InputState {
        &self.input
    }

    /// Number of frames run so far.
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Runs one resolver inside a span named after it.
fn run_resolver(
    resolver: &dyn Resolver,
    world: &mut World,
    config: &GameConfig,
    events: &mut EventLog,
) -> Resolution {
    let span = trace_span!("resolve", resolver = resolver.name());
    let _enter = span.enter();

    let before = events.len();
    let resolution = resolver.resolve(world, config, events);
    let recorded = events.len() - before;
    if recorded > 0 {
        debug!(resolver = resolver.name(), recorded, "resolver recorded events");
    }
    resolution
}

// =============================================================================
// Tests
// =============================================================================
