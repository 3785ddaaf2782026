// octane_sim/src/simulation/core/app_state.rs

use bevy::{ecs::schedule::SystemSet, prelude::States};

/// Defines the major phases of the application's lifecycle.
#[derive(States, Debug, Clone, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// The initial state. The scenario file is read and validated here.
    #[default]
    Loading,

    /// Configuration is in place. The arena and the vehicle are spawned.
    SceneBuilding,

    /// The scene is built. The main simulation loop is now running.
    Running,
}

/// System sets to control the order of execution during the SceneBuilding state.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SceneBuildSet {
    /// Pass 1: Static world geometry, lights and camera.
    World,

    /// Pass 2: The vehicle, its controller and its rigid body.
    Vehicle,

    /// Pass 3: Leave the building state.
    Finalize,
}

// =========================================================================
// == Per-Tick Drive Sets (FixedUpdate, ahead of the physics step) ==
// =========================================================================

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum DriveSet {
    /// Read held controls. Runs every tick, however many ticks a frame holds.
    Sample,
    /// Latch the input events that arrived since the previous tick.
    Input,
    /// Probe, integrate and reset. Exactly once per vehicle per tick.
    Control,
    /// Read-only reporting on what the tick did.
    Telemetry,
}
