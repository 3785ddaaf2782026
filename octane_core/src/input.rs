// octane_core/src/input.rs

use nalgebra::Vector2;

/// The latest value received on each input channel since the last reset.
///
/// Every setter overwrites; nothing is accumulated or averaged between events
/// on the same channel. Throttle and turn are cleared by `reset` at the end of
/// every tick, while jump is a one-shot flag cleared when it is taken.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputLatch {
    /// Forward input in [-1, 1]. Only positive values above the deadzone drive.
    pub throttle_value: f64,
    /// Steer sample already scaled into degrees per second of yaw.
    pub turn_input: f64,
    jump_requested: bool,
}

impl InputLatch {
    pub fn on_throttle(&mut self, value: f64) {
        self.throttle_value = finite_or_zero(value);
    }

    /// Latches the horizontal axis of a 2-D steer vector, scaled by
    /// `turn_angle_scale`. The vertical axis is unused.
    pub fn on_steer(&mut self, steer: Vector2<f64>, turn_angle_scale: f64) {
        self.turn_input = finite_or_zero(steer.x * turn_angle_scale);
    }

    pub fn on_jump(&mut self) {
        self.jump_requested = true;
    }

    pub fn jump_requested(&self) -> bool {
        self.jump_requested
    }

    /// Consumes the pending jump, if any. A second call in the same tick
    /// returns `false`.
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_requested)
    }

    /// Returns every channel to neutral.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
