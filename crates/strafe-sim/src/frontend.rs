//! Headless frontend that logs scene changes and tracks what is on screen.

use std::collections::BTreeMap;

use glam::Vec3;
use strafe_core::{Camera, EntityId, Hud, Scene, VisualKind};
use tracing::{debug, info};

/// Mirrors the scene in memory and logs through `tracing`.
#[derive(Debug, Default)]
pub struct LoggingFrontend {
    objects: BTreeMap<EntityId, VisualKind>,
    peak_objects: usize,
    last_health: Option<i32>,
    game_overs: u32,
    frames_rendered: u64,
}

impl LoggingFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Largest number of visual objects alive at once.
    pub fn peak_objects(&self) -> usize {
        self.peak_objects
    }

    /// Visual objects currently alive.
    pub fn live_objects(&self) -> usize {
        self.objects.len()
    }

    /// Times the game-over notice was shown.
    pub fn game_overs(&self) -> u32 {
        self.game_overs
    }

    /// Frames rendered so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}

impl Scene for LoggingFrontend {
    fn add(&mut self, id: EntityId, kind: VisualKind, position: Vec3) {
        debug!(%id, ?kind, ?position, "scene add");
        self.objects.insert(id, kind);
        self.peak_objects = self.peak_objects.max(self.objects.len());
    }

    fn remove(&mut self, id: EntityId) {
        debug!(%id, "scene remove");
        self.objects.remove(&id);
    }

    fn set_position(&mut self, _id: EntityId, _position: Vec3) {}

    fn render(&mut self, _camera: &Camera) {
        self.frames_rendered += 1;
    }
}

impl Hud for LoggingFrontend {
    fn show_health(&mut self, health: i32) {
        if self.last_health != Some(health) {
            debug!(health, "health");
            self.last_health = Some(health);
        }
    }

    fn show_game_over(&mut self) {
        info!("GAME OVER");
        self.game_overs += 1;
    }
}
