// octane_sim/src/simulation/plugins/vehicles/avian_body.rs

//! Adapters that let the pure `octane_core` controller drive an avian3d body.

use avian3d::prelude::{ExternalForce, LinearVelocity, SpatialQuery, SpatialQueryFilter};
use bevy::prelude::*;
use nalgebra::Vector3;
use octane_core::prelude::{CollisionQuery, PhysicsBody, ProbeError, Rotator};

use crate::simulation::core::transforms::{
    bevy_quat_to_rotator, bevy_vector_to_enu_vector, enu_vector_to_bevy_vector,
    rotator_to_bevy_quat,
};

// =========================================================================
// == Physics Body ==
// =========================================================================

/// A short-lived view over the components of one vehicle entity.
///
/// Forces go into a non-persistent `ExternalForce`, so avian integrates them
/// during its next step and then clears them. Velocity and rotation writes
/// land on the components directly.
pub struct AvianBody<'a> {
    pub transform: &'a mut Transform,
    pub velocity: &'a mut LinearVelocity,
    pub force: &'a mut ExternalForce,
}

impl PhysicsBody for AvianBody<'_> {
    fn location(&self) -> Vector3<f64> {
        bevy_vector_to_enu_vector(&self.transform.translation)
    }

    fn forward_vector(&self) -> Vector3<f64> {
        bevy_vector_to_enu_vector(&self.transform.forward().as_vec3())
    }

    fn up_vector(&self) -> Vector3<f64> {
        bevy_vector_to_enu_vector(&self.transform.up().as_vec3())
    }

    fn linear_velocity(&self) -> Vector3<f64> {
        bevy_vector_to_enu_vector(&self.velocity.0)
    }

    fn set_linear_velocity(&mut self, velocity: Vector3<f64>) {
        self.velocity.0 = enu_vector_to_bevy_vector(&velocity);
    }

    fn relative_rotation(&self) -> Rotator {
        bevy_quat_to_rotator(&self.transform.rotation)
    }

    fn set_relative_rotation(&mut self, rotation: Rotator) {
        self.transform.rotation = rotator_to_bevy_quat(&rotation);
    }

    fn add_force(&mut self, force: Vector3<f64>) {
        self.force.apply_force(enu_vector_to_bevy_vector(&force));
    }
}

// =========================================================================
// == Collision Query ==
// =========================================================================

/// Answers line traces with avian's spatial query pipeline on behalf of one
/// vehicle, which is excluded from its own traces.
pub struct AvianCollisionQuery<'a, 'w, 's> {
    pub spatial_query: &'a SpatialQuery<'w, 's>,
    pub vehicle: Entity,
}

impl CollisionQuery for AvianCollisionQuery<'_, '_, '_> {
    fn line_trace(
        &self,
        start: Vector3<f64>,
        end: Vector3<f64>,
        ignore_self: bool,
    ) -> Result<bool, ProbeError> {
        let (origin, direction, max_distance) = trace_ray(start, end)?;

        let filter = if ignore_self {
            SpatialQueryFilter::from_excluded_entities([self.vehicle])
        } else {
            SpatialQueryFilter::default()
        };

        Ok(self
            .spatial_query
            .cast_ray(origin, direction, max_distance, true, &filter)
            .is_some())
    }
}

/// Converts an ENU segment into a Bevy ray: origin, unit direction and length.
pub fn trace_ray(start: Vector3<f64>, end: Vector3<f64>) -> Result<(Vec3, Dir3, f32), ProbeError> {
    let origin = enu_vector_to_bevy_vector(&start);
    let delta = enu_vector_to_bevy_vector(&end) - origin;
    let max_distance = delta.length();
    if !origin.is_finite() || !max_distance.is_finite() || max_distance <= 0.0 {
        return Err(ProbeError::DegenerateSegment);
    }

    let direction = Dir3::new(delta).map_err(|_| ProbeError::DegenerateSegment)?;
    Ok((origin, direction, max_distance))
}
