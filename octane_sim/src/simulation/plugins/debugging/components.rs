use bevy::prelude::*;

/// A marker component that enables debug visualizations for the entity it's attached to.
///
/// `draw_probe_traces` only draws the ground probe of entities carrying it.
#[derive(Component, Debug, Default)]
pub struct ShowDebugGizmos;

/// The ground probe segment of the most recent tick, in Bevy world space.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct ProbeTrace {
    pub start: Vec3,
    pub end: Vec3,
    pub hit: bool,
}
