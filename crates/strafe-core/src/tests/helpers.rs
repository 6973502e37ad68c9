//! Scenario setup and a frontend that records what it is told.

use std::collections::BTreeMap;

use glam::Vec3;

use crate::camera::Camera;
use crate::config::{GameConfig, REFERENCE_FRAME_MS};
use crate::entity::EntityId;
use crate::frontend::{Hud, Scene, VisualKind};
use crate::game::{FrameReport, Game};

/// One reference frame in host milliseconds.
pub const FRAME_MS: f64 = REFERENCE_FRAME_MS as f64;

// =============================================================================
// Recording Frontend
// =============================================================================

/// Mirrors the scene the core maintains and counts HUD calls.
#[derive(Debug, Default)]
pub struct RecordingFrontend {
    /// Live visual objects by entity id.
    pub objects: BTreeMap<EntityId, (VisualKind, Vec3)>,
    /// Every id passed to `remove`, in order.
    pub removed: Vec<EntityId>,
    /// Every health value shown, one per frame.
    pub health: Vec<i32>,
    /// Times the game-over notice was shown.
    pub game_overs: usize,
    /// Camera of each rendered frame.
    pub renders: Vec<Camera>,
    /// `set_position` calls for ids that were never added.
    pub unknown_moves: usize,
}

impl RecordingFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of live objects of `kind`.
    pub fn ids_of(&self, kind: VisualKind) -> Vec<EntityId> {
        self.objects
            .iter()
            .filter(|(_, (k, _))| *k == kind)
            .map(|(id, _)| *id)
            .collect()
    }
}

impl Scene for RecordingFrontend {
    fn add(&mut self, id: EntityId, kind: VisualKind, position: Vec3) {
        let previous = self.objects.insert(id, (kind, position));
        assert!(previous.is_none(), "{id:?} added twice");
    }

    fn remove(&mut self, id: EntityId) {
        assert!(self.objects.remove(&id).is_some(), "{id:?} removed but never added");
        self.removed.push(id);
    }

    fn set_position(&mut self, id: EntityId, position: Vec3) {
        match self.objects.get_mut(&id) {
            Some((_, p)) => *p = position,
            None => self.unknown_moves += 1,
        }
    }

    fn render(&mut self, camera: &Camera) {
        self.renders.push(*camera);
    }
}

impl Hud for RecordingFrontend {
    fn show_health(&mut self, health: i32) {
        self.health.push(health);
    }

    fn show_game_over(&mut self) {
        self.game_overs += 1;
    }
}

// =============================================================================
// Scenario Setup
// =============================================================================

/// Default tunables with no enemies.
pub fn config_without_enemies() -> GameConfig {
    GameConfig {
        enemy_spawn_points: Vec::new(),
        ..GameConfig::default()
    }
}

/// Points the player's view at `target` on the floor plane.
pub fn aim_at(game: &mut Game, target: Vec3) {
    let eye = game.world().player.position();
    let yaw = (-(target.x - eye.x)).atan2(-(target.z - eye.z));
    game.world_mut().player.camera.set_orientation(yaw, 0.0);
}

/// Runs `n` frames of `step_ms` each after host time `start`.
///
/// Returns the final host time and every report.
pub fn run_frames(
    game: &mut Game,
    frontend: &mut RecordingFrontend,
    start: f64,
    n: usize,
    step_ms: f64,
) -> (f64, Vec<FrameReport>) {
    let mut now = start;
    let mut reports = Vec::with_capacity(n);
    for _ in 0..n {
        now += step_ms;
        reports.push(game.frame(now, frontend));
    }
    (now, reports)
}

/// Flattens the events of `reports`.
pub fn all_events(reports: &[FrameReport]) -> Vec<crate::event::GameEvent> {
    reports.iter().flat_map(|r| r.events.iter().copied()).collect()
}
