// octane_core/src/testing.rs

// Test doubles for the collaborator traits. Compiled only for unit tests.

use std::cell::Cell;

use nalgebra::Vector3;

use crate::{
    abstractions::{CollisionQuery, PhysicsBody},
    error::ProbeError,
    math::Rotator,
};

/// A body that records every force it is given instead of integrating them.
#[derive(Debug, Clone)]
pub struct MockBody {
    pub location: Vector3<f64>,
    pub forward: Vector3<f64>,
    pub up: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub rotation: Rotator,
    pub forces: Vec<Vector3<f64>>,
    pub velocity_writes: usize,
}

impl MockBody {
    pub fn at_height(z: f64) -> Self {
        Self {
            location: Vector3::new(0.0, 0.0, z),
            forward: Vector3::y(),
            up: Vector3::z(),
            velocity: Vector3::zeros(),
            rotation: Rotator::ZERO,
            forces: Vec::new(),
            velocity_writes: 0,
        }
    }

    pub fn total_force(&self) -> Vector3<f64> {
        self.forces.iter().sum()
    }
}

impl PhysicsBody for MockBody {
    fn location(&self) -> Vector3<f64> {
        self.location
    }

    fn forward_vector(&self) -> Vector3<f64> {
        self.forward
    }

    fn up_vector(&self) -> Vector3<f64> {
        self.up
    }

    fn linear_velocity(&self) -> Vector3<f64> {
        self.velocity
    }

    fn set_linear_velocity(&mut self, velocity: Vector3<f64>) {
        self.velocity = velocity;
        self.velocity_writes += 1;
    }

    fn relative_rotation(&self) -> Rotator {
        self.rotation
    }

    /// Also swings `forward` to the new heading (yaw right of +Y).
    fn set_relative_rotation(&mut self, rotation: Rotator) {
        self.rotation = rotation;
        let yaw = rotation.yaw.to_radians();
        self.forward = Vector3::new(yaw.sin(), yaw.cos(), 0.0);
    }

    fn add_force(&mut self, force: Vector3<f64>) {
        self.forces.push(force);
    }
}

/// An infinite horizontal plane at `height`. Remembers how often it is traced
/// and the `ignore_self` flag of the latest trace.
#[derive(Debug, Default)]
pub struct FlatGround {
    pub height: f64,
    traces: Cell<usize>,
    last_ignore_self: Cell<Option<bool>>,
}

impl FlatGround {
    pub fn at(height: f64) -> Self {
        Self {
            height,
            traces: Cell::new(0),
            last_ignore_self: Cell::new(None),
        }
    }

    pub fn traces(&self) -> usize {
        self.traces.get()
    }

    pub fn last_ignore_self(&self) -> Option<bool> {
        self.last_ignore_self.get()
    }
}

impl CollisionQuery for FlatGround {
    fn line_trace(
        &self,
        start: Vector3<f64>,
        end: Vector3<f64>,
        ignore_self: bool,
    ) -> Result<bool, ProbeError> {
        self.traces.set(self.traces.get() + 1);
        self.last_ignore_self.set(Some(ignore_self));
        let (low, high) = (start.z.min(end.z), start.z.max(end.z));
        Ok(low <= self.height && self.height <= high)
    }
}

/// A world with no geometry at all.
pub struct EmptyWorld;

impl CollisionQuery for EmptyWorld {
    fn line_trace(
        &self,
        _start: Vector3<f64>,
        _end: Vector3<f64>,
        _ignore_self: bool,
    ) -> Result<bool, ProbeError> {
        Ok(false)
    }
}
