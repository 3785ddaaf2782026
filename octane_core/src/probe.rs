// octane_core/src/probe.rs

use nalgebra::Vector3;

use crate::abstractions::{CollisionQuery, PhysicsBody};

/// A short downward line trace that classifies a vehicle as grounded or
/// airborne.
///
/// The segment always points along world down, whatever the body's own
/// orientation, so an upside-down car resting on its roof still reads as
/// grounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundProbe {
    pub distance: f64,
    /// Unit world-up axis. The probe runs along its negation.
    pub world_up: Vector3<f64>,
}

/// One probe: the traced segment and whether it hit anything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeResult {
    pub start: Vector3<f64>,
    pub end: Vector3<f64>,
    pub hit: bool,
}

impl GroundProbe {
    /// A probe of `distance` units in a Z-up world.
    pub fn new(distance: f64) -> Self {
        Self {
            distance,
            world_up: Vector3::z(),
        }
    }

    pub fn with_world_up(mut self, world_up: Vector3<f64>) -> Self {
        self.world_up = world_up.try_normalize(f64::EPSILON).unwrap_or(Vector3::z());
        self
    }

    pub fn segment(&self, origin: Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
        (origin, origin - self.world_up * self.distance)
    }

    /// Traces once from the body's location. A query that cannot answer is
    /// read as a miss, which keeps throttle force switched off.
    pub fn probe(&self, body: &dyn PhysicsBody, world: &dyn CollisionQuery) -> ProbeResult {
        let (start, end) = self.segment(body.location());
        let hit = world.line_trace(start, end, true).unwrap_or(false);
        ProbeResult { start, end, hit }
    }
}
