// octane_sim/src/simulation/plugins/vehicles/octane.rs

use crate::prelude::*; // Use the internal prelude of the octane_sim crate
use crate::simulation::core::events::DriveInput;
use crate::simulation::core::transforms::{
    bevy_quat_to_rotator, enu_pose_to_bevy_transform, enu_vector_to_bevy_vector,
};
use crate::simulation::plugins::debugging::{ProbeTrace, ShowDebugGizmos};
use crate::simulation::plugins::vehicles::avian_body::{AvianBody, AvianCollisionQuery};
use avian3d::prelude::*;
use nalgebra::{Vector2, Vector3};
use octane_core::prelude::VehicleController;

// --- BEVY COMPONENTS for the arcade car ---

/// Marks the player-driven car. Input actions are routed to every entity
/// carrying it.
#[derive(Component, Debug, Default)]
pub struct OctaneCar;

/// Chassis dimensions (x, y, z) in meters, Bevy axes.
const CHASSIS_SIZE: Vec3 = Vec3::new(1.8, 0.8, 4.0);
const CHASSIS_MASS: f32 = 1200.0;

// --- THE PLUGIN ---
pub struct OctaneCarPlugin;

impl Plugin for OctaneCarPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(AppState::SceneBuilding),
            spawn_octane
                .in_set(SceneBuildSet::Vehicle)
                .run_if(resource_exists::<ScenarioConfig>),
        )
        .add_systems(
            FixedUpdate,
            (
                latch_drive_inputs.in_set(DriveSet::Input),
                drive_octane_cars.in_set(DriveSet::Control),
                log_octane_telemetry
                    .in_set(DriveSet::Telemetry)
                    .run_if(resource_exists::<ScenarioConfig>),
            ),
        );
    }
}

// --- SYSTEMS ---

/// SPAWNING: Validates the vehicle tuning and, if it holds, spawns the car.
/// A config error is fatal to the car only; the arena still comes up.
fn spawn_octane(
    mut commands: Commands,
    config: Res<ScenarioConfig>,
    meshes: Option<ResMut<Assets<Mesh>>>,
    materials: Option<ResMut<Assets<StandardMaterial>>>,
) {
    let controller = match VehicleController::new(config.vehicle.clone()) {
        Ok(controller) => controller,
        Err(e) => {
            error!("[SPAWN] Invalid vehicle configuration, not spawning the car: {e}");
            return;
        }
    };

    let spawn = &config.spawn;
    let start_transform =
        enu_pose_to_bevy_transform(&Vector3::from(spawn.translation), &spawn.rotation());
    info!(
        "[SPAWN] Spawning Octane at {:?} heading {:.1} deg (max speed {:.1}, jump {})",
        spawn.translation,
        spawn.yaw_deg,
        config.vehicle.max_throttle_speed,
        config
            .vehicle
            .jump_force
            .map_or_else(|| "off".to_string(), |f| format!("{f:.0}")),
    );

    let mut entity_commands = commands.spawn((
        Name::new("Octane"),
        OctaneCar,
        controller,
        start_transform,
        RigidBody::Dynamic,
        Collider::cuboid(CHASSIS_SIZE.x, CHASSIS_SIZE.y, CHASSIS_SIZE.z),
        Mass(CHASSIS_MASS),
        Friction::new(0.7),
        // Driving forces must be applied consistently, so the body never sleeps.
        SleepingDisabled,
        LinearVelocity::default(),
        AngularVelocity::default(),
        // Cleared after every physics step: a force only lives for the tick that added it.
        ExternalForce::default().with_persistence(false),
        ProbeTrace::default(),
    ));

    if config.debug.draw_probe {
        entity_commands.insert(ShowDebugGizmos);
    }

    // Headless runs have no render assets; the body is still fully simulated.
    if let (Some(mut meshes), Some(mut materials)) = (meshes, materials) {
        entity_commands.insert(InheritedVisibility::VISIBLE);
        entity_commands.with_children(|parent| {
            parent.spawn((
                Mesh3d(meshes.add(Cuboid::new(CHASSIS_SIZE.x, CHASSIS_SIZE.y, CHASSIS_SIZE.z))),
                MeshMaterial3d(materials.add(Color::srgb(0.15, 0.35, 0.8))),
                Name::new("Octane_Body"),
            ));
        });
    }
}

/// RUNTIME: Latches every input action received since the previous tick.
/// Later events on a channel overwrite earlier ones.
pub(crate) fn latch_drive_inputs(
    mut inputs: EventReader<DriveInput>,
    mut query: Query<&mut VehicleController, With<OctaneCar>>,
) {
    for input in inputs.read() {
        for mut controller in &mut query {
            match *input {
                DriveInput::Throttle(value) => controller.on_throttle(value as f64),
                DriveInput::Steer(steer) => {
                    controller.on_steer(Vector2::new(steer.x as f64, steer.y as f64))
                }
                DriveInput::Jump => controller.on_jump(),
            }
        }
    }
}

/// RUNTIME: Runs the controller tick for every car. The tick probes the
/// ground exactly once, then applies rotation, force, clamp and jump.
fn drive_octane_cars(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    mut query: Query<
        (
            Entity,
            &Name,
            &mut VehicleController,
            &mut Transform,
            &mut LinearVelocity,
            &mut ExternalForce,
            &mut ProbeTrace,
        ),
        With<OctaneCar>,
    >,
) {
    let dt = time.delta_secs_f64();

    for (entity, name, mut controller, mut transform, mut velocity, mut force, mut probe_trace) in
        &mut query
    {
        let was_grounded = controller.state().is_grounded();

        let mut body = AvianBody {
            transform: &mut *transform,
            velocity: &mut *velocity,
            force: &mut *force,
        };
        let world = AvianCollisionQuery {
            spatial_query: &spatial_query,
            vehicle: entity,
        };
        let report = controller.tick(dt, &mut body, &world);

        *probe_trace = ProbeTrace {
            start: enu_vector_to_bevy_vector(&report.probe.start),
            end: enu_vector_to_bevy_vector(&report.probe.end),
            hit: report.probe.hit,
        };

        if report.probe.hit != was_grounded {
            debug!(
                "{} is now {}",
                name.as_str(),
                if report.probe.hit { "grounded" } else { "airborne" }
            );
        }
        if report.jumped {
            debug!("{} jumped", name.as_str());
        }
        if let Some(speed) = report.clamped_from {
            trace!(
                "{} speed {:.2} clamped to {:.2}",
                name.as_str(),
                speed,
                controller.config().max_throttle_speed
            );
        }
    }
}

/// A repeating timer for the telemetry line, or `None` when it is switched off.
fn telemetry_timer(period: f32) -> Option<Timer> {
    if period.is_nan() || period <= 0.0 {
        return None;
    }
    Some(Timer::from_seconds(period, TimerMode::Repeating))
}

/// RUNTIME: Periodic one-line summary of each car's motion.
fn log_octane_telemetry(
    time: Res<Time>,
    config: Res<ScenarioConfig>,
    mut timer: Local<Option<Timer>>,
    query: Query<(&Name, &VehicleController, &LinearVelocity, &Transform), With<OctaneCar>>,
) {
    if timer.is_none() {
        *timer = telemetry_timer(config.simulation.telemetry_period);
    }
    let Some(timer) = timer.as_mut() else {
        return;
    };
    if !timer.tick(time.delta()).just_finished() {
        return;
    }

    for (name, controller, velocity, transform) in &query {
        info!(
            "{}: speed {:.2} m/s, heading {:.1} deg, {}",
            name.as_str(),
            velocity.length(),
            bevy_quat_to_rotator(&transform.rotation).yaw,
            if controller.state().is_grounded() {
                "grounded"
            } else {
                "airborne"
            }
        );
    }
}
