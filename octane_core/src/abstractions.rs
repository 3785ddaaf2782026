// octane_core/src/abstractions.rs

use nalgebra::Vector3;

use crate::{error::ProbeError, math::Rotator};

// --- PHYSICS BODY TRAIT ---
// The rigid body the controller drives. The host's physics engine owns the body;
// the controller only borrows it for the duration of one tick.
/// A handle onto the physics body of a vehicle.
///
/// All vectors are in the world frame (ENU). Implementations are expected to be
/// thin views over engine state: `add_force` accumulates into whatever the engine
/// integrates during its next step, while `set_linear_velocity` and
/// `set_relative_rotation` overwrite state immediately.
pub trait PhysicsBody {
    /// World position of the body origin. The ground probe starts here.
    fn location(&self) -> Vector3<f64>;

    /// Unit vector pointing out of the front of the vehicle.
    fn forward_vector(&self) -> Vector3<f64>;

    /// Unit vector pointing out of the roof of the vehicle.
    fn up_vector(&self) -> Vector3<f64>;

    fn linear_velocity(&self) -> Vector3<f64>;

    fn set_linear_velocity(&mut self, velocity: Vector3<f64>);

    /// Orientation relative to the body's parent (the world, for a root body).
    fn relative_rotation(&self) -> Rotator;

    fn set_relative_rotation(&mut self, rotation: Rotator);

    /// Adds a force to be integrated by the physics step. Does not touch velocity.
    fn add_force(&mut self, force: Vector3<f64>);
}

// --- COLLISION QUERY TRAIT ---
// This is the contract for any object that can answer spatial queries against
// world geometry. The avian `SpatialQuery` adapter will implement this, as will
// a mock for testing.
pub trait CollisionQuery {
    /// Traces the segment `start -> end` against world collision geometry.
    ///
    /// Returns `Ok(true)` if anything collidable intersects the segment. When
    /// `ignore_self` is set, the querying vehicle's own colliders are skipped.
    fn line_trace(
        &self,
        start: Vector3<f64>,
        end: Vector3<f64>,
        ignore_self: bool,
    ) -> Result<bool, ProbeError>;
}
