// octane_core/src/error.rs

use thiserror::Error;

/// Problems found while validating a `VehicleConfig`.
///
/// These are startup conditions: a controller is never constructed from a
/// config that fails validation, so none of them can surface mid-tick.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("max_throttle_speed must be a positive, finite speed (got {0})")]
    InvalidMaxThrottleSpeed(f64),

    #[error("throttle_acceleration must be finite (got {0})")]
    InvalidThrottleAcceleration(f64),

    #[error("turn_angle_scale must be finite (got {0})")]
    InvalidTurnAngleScale(f64),

    #[error("jump_force must be finite and non-negative (got {0})")]
    InvalidJumpForce(f64),

    #[error("throttle_deadzone must lie in [0, 1) (got {0})")]
    InvalidThrottleDeadzone(f64),

    #[error("ground_probe_distance must be a positive, finite distance (got {0})")]
    InvalidProbeDistance(f64),
}

/// Reasons a collision query could not answer a line trace.
///
/// The ground probe never propagates these; it reads them as "not grounded".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("the collision world is not ready for spatial queries")]
    WorldNotReady,

    #[error("trace segment has zero length or non-finite endpoints")]
    DegenerateSegment,
}
