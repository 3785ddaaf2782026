// octane_core/src/controller.rs

use nalgebra::{Vector2, Vector3};

use crate::{
    abstractions::{CollisionQuery, PhysicsBody},
    config::VehicleConfig,
    error::ConfigError,
    input::InputLatch,
    probe::{GroundProbe, ProbeResult},
};

// =========================================================================
// == Per-Vehicle State ==
// =========================================================================

/// Mutable state owned by one controller: the input latches and the ground
/// classification of the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VehicleState {
    input: InputLatch,
    is_grounded: bool,
}

impl VehicleState {
    pub fn throttle_value(&self) -> f64 {
        self.input.throttle_value
    }

    pub fn turn_input(&self) -> f64 {
        self.input.turn_input
    }

    /// Result of the most recent ground probe.
    pub fn is_grounded(&self) -> bool {
        self.is_grounded
    }

    pub fn jump_pending(&self) -> bool {
        self.input.jump_requested()
    }
}

/// What a single tick did to the body. Returned to the host for logging and
/// debug drawing; the controller itself keeps none of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub probe: ProbeResult,
    /// Yaw added this tick, in degrees. Zero when no rotation was applied.
    pub yaw_delta: f64,
    /// Forward force handed to the body, if the vehicle was driven.
    pub drive_force: Option<Vector3<f64>>,
    /// Speed before the clamp, if the clamp had to act.
    pub clamped_from: Option<f64>,
    pub jumped: bool,
}

// =========================================================================
// == Controller ==
// =========================================================================

/// The arcade vehicle controller.
///
/// Input handlers may be called any number of times between ticks. `tick` runs
/// once per frame and, in order: probes the ground, integrates yaw, applies
/// throttle force, clamps speed, applies a pending jump, and finally clears the
/// throttle and turn latches.
#[cfg_attr(feature = "bevy", derive(bevy_ecs::component::Component))]
#[derive(Debug, Clone)]
pub struct VehicleController {
    config: VehicleConfig,
    probe: GroundProbe,
    state: VehicleState,
}

impl VehicleController {
    /// Builds a controller for a Z-up world. Fails if the config is invalid.
    pub fn new(config: VehicleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            probe: GroundProbe::new(config.ground_probe_distance),
            config,
            state: VehicleState::default(),
        })
    }

    /// Points the ground probe along `-world_up` instead of `-Z`.
    pub fn with_world_up(mut self, world_up: Vector3<f64>) -> Self {
        self.probe = self.probe.with_world_up(world_up);
        self
    }

    pub fn config(&self) -> &VehicleConfig {
        &self.config
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    // --- Input handlers ---

    pub fn on_throttle(&mut self, value: f64) {
        self.state.input.on_throttle(value);
    }

    pub fn on_steer(&mut self, steer: Vector2<f64>) {
        self.state
            .input
            .on_steer(steer, self.config.turn_angle_scale);
    }

    /// Queues a jump for the next tick. It fires only if that tick finds the
    /// vehicle grounded; otherwise it is dropped.
    pub fn on_jump(&mut self) {
        self.state.input.on_jump();
    }

    // --- Per-frame update ---

    pub fn tick(
        &mut self,
        delta_time: f64,
        body: &mut dyn PhysicsBody,
        world: &dyn CollisionQuery,
    ) -> TickReport {
        // Only probe once per tick; everything below reads the cached flag.
        let probe = self.probe.probe(&*body, world);
        self.state.is_grounded = probe.hit;
        let is_grounded = self.state.is_grounded;
        // The push follows the heading the tick started with, not the one
        // yaw integration is about to produce.
        let forward = body.forward_vector();

        let yaw_delta = self.integrate_yaw(delta_time, is_grounded, body);
        let drive_force = self.apply_throttle(is_grounded, forward, body);
        let clamped_from = self.clamp_speed(body);
        let jumped = self.apply_jump(is_grounded, body);

        // Any jump was taken above, so this only clears throttle and turn.
        self.state.input.reset();

        TickReport {
            probe,
            yaw_delta,
            drive_force,
            clamped_from,
            jumped,
        }
    }

    fn integrate_yaw(
        &self,
        delta_time: f64,
        is_grounded: bool,
        body: &mut dyn PhysicsBody,
    ) -> f64 {
        let turn_input = self.state.input.turn_input;
        if turn_input == 0.0 || !self.config.rotation_policy.allows(is_grounded) {
            return 0.0;
        }
        // Non-positive time never rotates backwards.
        if !delta_time.is_finite() || delta_time <= 0.0 {
            return 0.0;
        }

        let yaw_delta = turn_input * delta_time;
        let rotation = body.relative_rotation().add_yaw(yaw_delta);
        body.set_relative_rotation(rotation);
        yaw_delta
    }

    fn apply_throttle(
        &self,
        is_grounded: bool,
        forward: Vector3<f64>,
        body: &mut dyn PhysicsBody,
    ) -> Option<Vector3<f64>> {
        let throttle = self.state.input.throttle_value;
        if !is_grounded || throttle <= self.config.throttle_deadzone {
            return None;
        }

        let force = forward * throttle * self.config.throttle_acceleration;
        body.add_force(force);
        Some(force)
    }

    /// Rescales the body's velocity onto the speed cap, keeping its direction.
    /// This corrects whatever the physics step produced; it does not limit the
    /// force handed over this tick.
    fn clamp_speed(&self, body: &mut dyn PhysicsBody) -> Option<f64> {
        let velocity = body.linear_velocity();
        let speed = velocity.norm();
        if speed <= self.config.max_throttle_speed {
            return None;
        }

        body.set_linear_velocity(velocity / speed * self.config.max_throttle_speed);
        Some(speed)
    }

    fn apply_jump(&mut self, is_grounded: bool, body: &mut dyn PhysicsBody) -> bool {
        if !self.state.input.take_jump() || !is_grounded {
            return false;
        }
        let Some(jump_force) = self.config.jump_force else {
            return false;
        };

        let impulse = body.up_vector() * jump_force;
        body.add_force(impulse);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RotationPolicy;
    use crate::testing::{EmptyWorld, FlatGround, MockBody};
    use approx::assert_abs_diff_eq;

    const DT: f64 = 0.016;

    fn controller() -> VehicleController {
        VehicleController::new(VehicleConfig::new(2300.0, 1000.0, 90.0).with_jump_force(350.0))
            .unwrap()
    }

    fn grounded_body() -> MockBody {
        MockBody::at_height(5.0)
    }

    fn airborne_body() -> MockBody {
        MockBody::at_height(500.0)
    }

    #[test]
    fn invalid_config_refuses_to_build() {
        let err = VehicleController::new(VehicleConfig::new(0.0, 1.0, 1.0)).unwrap_err();
        assert_eq!(err, ConfigError::InvalidMaxThrottleSpeed(0.0));
    }

    #[test]
    fn grounded_throttle_pushes_along_forward() {
        let mut car = controller();
        let mut body = grounded_body();
        body.forward = Vector3::new(1.0, 0.0, 0.0);
        let ground = FlatGround::at(0.0);

        car.on_throttle(0.5);
        let report = car.tick(DT, &mut body, &ground);

        assert!(report.probe.hit);
        assert_eq!(body.forces.len(), 1);
        assert_abs_diff_eq!(body.forces[0], Vector3::new(500.0, 0.0, 0.0), epsilon = 1e-9);
        assert_eq!(report.drive_force, Some(body.forces[0]));
    }

    #[test]
    fn throttle_uses_heading_from_tick_start() {
        let mut car = controller();
        let mut body = grounded_body();

        car.on_throttle(1.0);
        car.on_steer(Vector2::new(1.0, 0.0));
        let report = car.tick(1.0, &mut body, &FlatGround::at(0.0));

        // Yaw swung the body a quarter turn, but the push went along the old +Y.
        assert_abs_diff_eq!(body.forward, Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(
            report.drive_force.unwrap(),
            Vector3::new(0.0, 1000.0, 0.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn throttle_inside_deadzone_applies_nothing() {
        let ground = FlatGround::at(0.0);
        for throttle in [-1.0, 0.0, 0.05, 0.1] {
            let mut car = controller();
            let mut body = grounded_body();
            car.on_throttle(throttle);
            let report = car.tick(DT, &mut body, &ground);
            assert!(body.forces.is_empty(), "throttle {throttle} applied force");
            assert!(report.drive_force.is_none());
        }
    }

    #[test]
    fn airborne_throttle_applies_nothing() {
        let mut car = controller();
        let mut body = airborne_body();
        car.on_throttle(1.0);
        car.tick(DT, &mut body, &FlatGround::at(0.0));
        assert!(body.forces.is_empty());
        assert!(!car.state().is_grounded());
    }

    #[test]
    fn airborne_steer_still_yaws_by_default() {
        let mut car = controller();
        let mut body = airborne_body();
        // 0.5 * 90 deg/s = 45 deg/s
        car.on_steer(Vector2::new(0.5, 0.0));
        let report = car.tick(0.1, &mut body, &EmptyWorld);

        assert_abs_diff_eq!(report.yaw_delta, 4.5, epsilon = 1e-12);
        assert_abs_diff_eq!(body.rotation.yaw, 4.5, epsilon = 1e-12);
        assert_eq!(body.rotation.pitch, 0.0);
        assert_eq!(body.rotation.roll, 0.0);
        assert!(body.forces.is_empty());
    }

    #[test]
    fn grounded_only_policy_freezes_airborne_yaw() {
        let config = VehicleConfig::new(2300.0, 1000.0, 90.0)
            .with_rotation_policy(RotationPolicy::GroundedOnly);
        let mut car = VehicleController::new(config).unwrap();

        let mut body = airborne_body();
        car.on_steer(Vector2::new(1.0, 0.0));
        car.tick(0.1, &mut body, &FlatGround::at(0.0));
        assert_eq!(body.rotation.yaw, 0.0);

        let mut body = grounded_body();
        car.on_steer(Vector2::new(1.0, 0.0));
        car.tick(0.1, &mut body, &FlatGround::at(0.0));
        assert_abs_diff_eq!(body.rotation.yaw, 9.0, epsilon = 1e-12);
    }

    #[test]
    fn non_positive_delta_time_skips_rotation() {
        for dt in [0.0, -0.5, f64::NAN] {
            let mut car = controller();
            let mut body = grounded_body();
            car.on_steer(Vector2::new(1.0, 0.0));
            car.on_throttle(1.0);
            let report = car.tick(dt, &mut body, &FlatGround::at(0.0));

            assert_eq!(body.rotation.yaw, 0.0);
            assert_eq!(report.yaw_delta, 0.0);
            // The rest of the tick still runs.
            assert_eq!(body.forces.len(), 1);
            assert_eq!(car.state().turn_input(), 0.0);
        }
    }

    #[test]
    fn speed_above_cap_is_rescaled_keeping_direction() {
        let mut car = controller();
        let mut body = grounded_body();
        body.velocity = Vector3::new(3000.0, 4000.0, 0.0);

        let report = car.tick(DT, &mut body, &FlatGround::at(0.0));

        assert_abs_diff_eq!(report.clamped_from.unwrap(), 5000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(body.velocity.norm(), 2300.0, epsilon = 1e-9);
        assert_abs_diff_eq!(
            body.velocity.normalize(),
            Vector3::new(0.6, 0.8, 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn speed_under_cap_is_left_alone() {
        let mut car = controller();
        let mut body = airborne_body();
        body.velocity = Vector3::new(10.0, -20.0, 5.0);

        let report = car.tick(DT, &mut body, &EmptyWorld);

        assert!(report.clamped_from.is_none());
        assert_eq!(body.velocity_writes, 0);
        assert_eq!(body.velocity, Vector3::new(10.0, -20.0, 5.0));
    }

    #[test]
    fn clamp_runs_while_airborne() {
        let mut car = controller();
        let mut body = airborne_body();
        body.velocity = Vector3::new(0.0, 0.0, -9000.0);

        car.tick(DT, &mut body, &EmptyWorld);
        assert_abs_diff_eq!(body.velocity, Vector3::new(0.0, 0.0, -2300.0), epsilon = 1e-9);
    }

    #[test]
    fn latches_are_cleared_after_every_tick() {
        let mut car = controller();
        let ground = FlatGround::at(0.0);

        for body in [grounded_body(), airborne_body()] {
            let mut body = body;
            car.on_throttle(0.7);
            car.on_steer(Vector2::new(-0.3, 0.0));
            car.tick(DT, &mut body, &ground);
            assert_eq!(car.state().throttle_value(), 0.0);
            assert_eq!(car.state().turn_input(), 0.0);
        }
    }

    #[test]
    fn unrenewed_throttle_does_not_drive_next_tick() {
        let mut car = controller();
        let mut body = grounded_body();
        let ground = FlatGround::at(0.0);

        car.on_throttle(1.0);
        car.tick(DT, &mut body, &ground);
        car.tick(DT, &mut body, &ground);
        assert_eq!(body.forces.len(), 1);
    }

    #[test]
    fn last_throttle_sample_of_a_tick_wins() {
        let mut car = controller();
        let mut body = grounded_body();

        car.on_throttle(0.2);
        car.on_throttle(0.9);
        let report = car.tick(DT, &mut body, &FlatGround::at(0.0));

        assert_abs_diff_eq!(
            report.drive_force.unwrap(),
            Vector3::new(0.0, 900.0, 0.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn grounded_jump_pushes_along_up_once() {
        let mut car = controller();
        let mut body = grounded_body();
        body.up = Vector3::new(0.0, 0.0, 1.0);
        let ground = FlatGround::at(0.0);

        car.on_jump();
        let report = car.tick(DT, &mut body, &ground);
        assert!(report.jumped);
        assert_abs_diff_eq!(body.total_force(), Vector3::new(0.0, 0.0, 350.0), epsilon = 1e-9);

        // Consumed: the next tick does not jump again.
        let report = car.tick(DT, &mut body, &ground);
        assert!(!report.jumped);
        assert_eq!(body.forces.len(), 1);
    }

    #[test]
    fn airborne_jump_is_dropped_not_deferred() {
        let mut car = controller();
        let ground = FlatGround::at(0.0);

        let mut body = airborne_body();
        car.on_jump();
        let report = car.tick(DT, &mut body, &ground);
        assert!(!report.jumped);
        assert!(body.forces.is_empty());
        assert_eq!(body.velocity_writes, 0);

        // Landing afterwards must not replay the old jump.
        let mut body = grounded_body();
        let report = car.tick(DT, &mut body, &ground);
        assert!(!report.jumped);
        assert!(body.forces.is_empty());
    }

    #[test]
    fn jump_without_jump_force_is_ignored() {
        let mut car = VehicleController::new(VehicleConfig::new(2300.0, 1000.0, 90.0)).unwrap();
        let mut body = grounded_body();
        car.on_jump();
        let report = car.tick(DT, &mut body, &FlatGround::at(0.0));
        assert!(!report.jumped);
        assert!(body.forces.is_empty());
        assert!(!car.state().jump_pending());
    }

    #[test]
    fn ground_is_probed_exactly_once_per_tick() {
        let mut car = controller();
        let mut body = grounded_body();
        let ground = FlatGround::at(0.0);

        car.on_throttle(1.0);
        car.on_steer(Vector2::new(1.0, 0.0));
        car.on_jump();
        car.tick(DT, &mut body, &ground);
        assert_eq!(ground.traces(), 1);
        // The car's own colliders must never count as ground.
        assert_eq!(ground.last_ignore_self(), Some(true));

        car.tick(DT, &mut body, &ground);
        assert_eq!(ground.traces(), 2);
    }

    #[test]
    fn custom_world_up_moves_the_probe() {
        let mut car = controller().with_world_up(Vector3::y());
        let mut body = grounded_body();
        // Z-up plane never crossed by a probe running along -Y at z = 5.
        let report = car.tick(DT, &mut body, &FlatGround::at(0.0));
        assert!(!report.probe.hit);
        assert_abs_diff_eq!(report.probe.end, Vector3::new(0.0, -10.0, 5.0), epsilon = 1e-12);
    }
}
