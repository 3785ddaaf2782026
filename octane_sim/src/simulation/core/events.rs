// octane_sim/src/simulation/core/events.rs
use bevy::prelude::{Event, Vec2};

/// A named input action with its payload, as delivered by the input layer.
///
/// Any number of these may arrive between two ticks; the controller keeps the
/// last sample per channel.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum DriveInput {
    /// Forward input in [-1, 1].
    Throttle(f32),
    /// Steer stick; only `x` is used.
    Steer(Vec2),
    /// Trigger-only.
    Jump,
}
