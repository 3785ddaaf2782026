// octane_sim/src/simulation/config/structs.rs

use bevy::prelude::Resource;
use octane_core::prelude::{Rotator, VehicleConfig};
use serde::Deserialize;

// =========================================================================
// == Top-Level Configuration Resource ==
// =========================================================================

/// # ScenarioConfig
/// The Bevy resource holding all configuration for a simulation run.
/// This struct is the root of the data parsed from a `scenario.toml` file.
#[derive(Resource, Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ScenarioConfig {
    #[serde(default)] // Use default if the [simulation] section is missing
    pub simulation: Simulation,

    #[serde(default)]
    pub world: Arena,

    #[serde(default = "default_vehicle")]
    pub vehicle: VehicleConfig,

    #[serde(default)]
    pub spawn: SpawnPose,

    #[serde(default)]
    pub debug: DebugDraw,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            simulation: Simulation::default(),
            world: Arena::default(),
            vehicle: default_vehicle(),
            spawn: SpawnPose::default(),
            debug: DebugDraw::default(),
        }
    }
}

/// Arcade tuning in SI units: a 1200 kg body, ~10 m/s^2 at full throttle and
/// a ~4 m/s hop from a single-step jump force at 60 Hz.
fn default_vehicle() -> VehicleConfig {
    let mut vehicle = VehicleConfig::new(23.0, 12_000.0, 90.0).with_jump_force(288_000.0);
    vehicle.ground_probe_distance = 0.6;
    vehicle
}

// =========================================================================
// == Configuration Sub-Structs ==
// These map directly to the sections in the scenario.toml file.
// =========================================================================

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Simulation {
    /// Rate of the fixed tick that drives the controller and the physics step.
    #[serde(default = "default_fixed_hz")]
    pub fixed_hz: f64,
    /// Optional run length in seconds. The app exits once it has elapsed.
    #[serde(default)]
    pub duration_seconds: Option<f32>,
    /// How often the vehicle telemetry line is logged, in seconds.
    #[serde(default = "default_telemetry_period")]
    pub telemetry_period: f32,
}

fn default_fixed_hz() -> f64 {
    60.0
}

fn default_telemetry_period() -> f32 {
    1.0
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            fixed_hz: default_fixed_hz(),
            duration_seconds: None,
            telemetry_period: default_telemetry_period(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct Arena {
    /// Side length of the square arena floor, in meters.
    pub floor_size: f32,
    /// Global gravity vector in m/s^2, ENU.
    pub gravity: [f64; 3],
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            floor_size: 200.0,
            gravity: [0.0, 0.0, -9.81],
        }
    }
}

/// Where the vehicle starts, in the ENU world frame.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(deny_unknown_fields)]
pub struct SpawnPose {
    #[serde(default = "default_spawn_translation")]
    pub translation: [f64; 3],
    /// Heading in degrees, positive turning right from north.
    #[serde(default)]
    pub yaw_deg: f64,
}

fn default_spawn_translation() -> [f64; 3] {
    [0.0, 0.0, 1.0]
}

impl Default for SpawnPose {
    fn default() -> Self {
        Self {
            translation: default_spawn_translation(),
            yaw_deg: 0.0,
        }
    }
}

impl SpawnPose {
    pub fn rotation(&self) -> Rotator {
        Rotator::new(0.0, self.yaw_deg, 0.0)
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default)]
#[serde(deny_unknown_fields)]
pub struct DebugDraw {
    /// Draw the ground probe segment, green on hit and red on miss.
    #[serde(default)]
    pub draw_probe: bool,
}
