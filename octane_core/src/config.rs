// octane_core/src/config.rs

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Throttle samples at or below this magnitude drive nothing.
pub const DEFAULT_THROTTLE_DEADZONE: f64 = 0.1;

/// Length of the downward ground probe, in world units.
pub const DEFAULT_GROUND_PROBE_DISTANCE: f64 = 10.0;

// =========================================================================
// == Vehicle Tuning ==
// =========================================================================

/// Immutable tuning for one vehicle. Authored in the scenario file and
/// validated once, before a controller is built from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VehicleConfig {
    /// Upper bound on the magnitude of the body's linear velocity.
    pub max_throttle_speed: f64,

    /// Scales throttle input into a forward force.
    pub throttle_acceleration: f64,

    /// Degrees per second of yaw for a full-deflection steer sample.
    pub turn_angle_scale: f64,

    /// Magnitude of the upward push on jump. `None` disables jumping; jump
    /// inputs are then ignored.
    #[serde(default)]
    pub jump_force: Option<f64>,

    #[serde(default = "default_throttle_deadzone")]
    pub throttle_deadzone: f64,

    #[serde(default = "default_ground_probe_distance")]
    pub ground_probe_distance: f64,

    #[serde(default)]
    pub rotation_policy: RotationPolicy,
}

fn default_throttle_deadzone() -> f64 {
    DEFAULT_THROTTLE_DEADZONE
}

fn default_ground_probe_distance() -> f64 {
    DEFAULT_GROUND_PROBE_DISTANCE
}

/// When steering is allowed to rotate the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationPolicy {
    /// Yaw integrates whenever there is steer input, airborne or not.
    #[default]
    Always,
    /// Yaw integrates only while the ground probe reports contact.
    GroundedOnly,
}

impl RotationPolicy {
    pub fn allows(self, is_grounded: bool) -> bool {
        match self {
            RotationPolicy::Always => true,
            RotationPolicy::GroundedOnly => is_grounded,
        }
    }
}

impl VehicleConfig {
    /// A config with the three required tuning constants and every optional
    /// field at its default.
    pub fn new(max_throttle_speed: f64, throttle_acceleration: f64, turn_angle_scale: f64) -> Self {
        Self {
            max_throttle_speed,
            throttle_acceleration,
            turn_angle_scale,
            jump_force: None,
            throttle_deadzone: DEFAULT_THROTTLE_DEADZONE,
            ground_probe_distance: DEFAULT_GROUND_PROBE_DISTANCE,
            rotation_policy: RotationPolicy::default(),
        }
    }

    pub fn with_jump_force(mut self, jump_force: f64) -> Self {
        self.jump_force = Some(jump_force);
        self
    }

    pub fn with_rotation_policy(mut self, policy: RotationPolicy) -> Self {
        self.rotation_policy = policy;
        self
    }

    /// Checks every field, returning the first one that is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_throttle_speed.is_finite() || self.max_throttle_speed <= 0.0 {
            return Err(ConfigError::InvalidMaxThrottleSpeed(self.max_throttle_speed));
        }
        if !self.throttle_acceleration.is_finite() {
            return Err(ConfigError::InvalidThrottleAcceleration(
                self.throttle_acceleration,
            ));
        }
        if !self.turn_angle_scale.is_finite() {
            return Err(ConfigError::InvalidTurnAngleScale(self.turn_angle_scale));
        }
        if let Some(jump_force) = self.jump_force {
            if !jump_force.is_finite() || jump_force < 0.0 {
                return Err(ConfigError::InvalidJumpForce(jump_force));
            }
        }
        if !(0.0..1.0).contains(&self.throttle_deadzone) {
            return Err(ConfigError::InvalidThrottleDeadzone(self.throttle_deadzone));
        }
        if !self.ground_probe_distance.is_finite() || self.ground_probe_distance <= 0.0 {
            return Err(ConfigError::InvalidProbeDistance(self.ground_probe_distance));
        }
        Ok(())
    }
}
