// octane_sim/src/simulation/plugins/input.rs

//! Keyboard bindings for the drive actions.
//!
//! W/S or Up/Down throttle, A/D or Left/Right steer, Space jumps. The
//! controller clears throttle and turn at the end of every tick, so held keys
//! are sampled once per fixed tick rather than once per rendered frame. A
//! jump is a single press and is sent from `Update`, where presses are seen.

use crate::prelude::*;
use crate::simulation::core::events::DriveInput;

pub struct DriveInputPlugin;

impl Plugin for DriveInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            sample_held_drive_keys
                .in_set(DriveSet::Sample)
                .run_if(resource_exists::<ButtonInput<KeyCode>>),
        )
        .add_systems(
            Update,
            keyboard_jump
                .run_if(resource_exists::<ButtonInput<KeyCode>>)
                .run_if(in_state(AppState::Running)),
        );
    }
}

/// +1 when only `positive` is held, -1 when only `negative` is, else 0.
fn axis(keyboard: &ButtonInput<KeyCode>, positive: [KeyCode; 2], negative: [KeyCode; 2]) -> f32 {
    let pos = keyboard.any_pressed(positive) as i8;
    let neg = keyboard.any_pressed(negative) as i8;
    (pos - neg) as f32
}

fn sample_held_drive_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut inputs: EventWriter<DriveInput>,
) {
    let throttle = axis(
        &keyboard,
        [KeyCode::KeyW, KeyCode::ArrowUp],
        [KeyCode::KeyS, KeyCode::ArrowDown],
    );
    if throttle != 0.0 {
        inputs.write(DriveInput::Throttle(throttle));
    }

    let steer = axis(
        &keyboard,
        [KeyCode::KeyD, KeyCode::ArrowRight],
        [KeyCode::KeyA, KeyCode::ArrowLeft],
    );
    if steer != 0.0 {
        inputs.write(DriveInput::Steer(Vec2::new(steer, 0.0)));
    }
}

fn keyboard_jump(keyboard: Res<ButtonInput<KeyCode>>, mut inputs: EventWriter<DriveInput>) {
    if keyboard.just_pressed(KeyCode::Space) {
        inputs.write(DriveInput::Jump);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::plugins::vehicles::avian_body::AvianBody;
    use crate::simulation::plugins::vehicles::octane::{latch_drive_inputs, OctaneCar};
    use avian3d::prelude::{ExternalForce, LinearVelocity};
    use bevy::ecs::event::Events;
    use bevy::time::{TimePlugin, TimeUpdateStrategy};
    use nalgebra::Vector3;
    use std::time::Duration;

    fn drive_with(keys: &[KeyCode]) -> Vec<DriveInput> {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .add_event::<DriveInput>()
            .add_systems(Update, (sample_held_drive_keys, keyboard_jump).chain());
        {
            let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            for key in keys {
                keyboard.press(*key);
            }
        }
        app.update();

        let events = app.world().resource::<Events<DriveInput>>();
        events.iter_current_update_events().copied().collect()
    }

    #[test]
    fn no_keys_send_nothing() {
        assert!(drive_with(&[]).is_empty());
    }

    #[test]
    fn forward_and_right_send_throttle_and_steer() {
        let sent = drive_with(&[KeyCode::KeyW, KeyCode::ArrowRight]);
        assert_eq!(
            sent,
            vec![
                DriveInput::Throttle(1.0),
                DriveInput::Steer(Vec2::new(1.0, 0.0))
            ]
        );
    }

    #[test]
    fn opposing_keys_cancel() {
        assert!(drive_with(&[KeyCode::KeyA, KeyCode::KeyD]).is_empty());
    }

    #[test]
    fn space_requests_a_jump() {
        assert_eq!(drive_with(&[KeyCode::Space]), vec![DriveInput::Jump]);
    }

    // --- Held keys across fixed ticks ---

    struct SolidGround;

    impl CollisionQuery for SolidGround {
        fn line_trace(
            &self,
            _start: Vector3<f64>,
            _end: Vector3<f64>,
            _ignore_self: bool,
        ) -> Result<bool, ProbeError> {
            Ok(true)
        }
    }

    #[derive(Resource, Default)]
    struct TickLog(Vec<TickReport>);

    fn tick_on_solid_ground(
        mut cars: Query<&mut VehicleController, With<OctaneCar>>,
        mut log: ResMut<TickLog>,
    ) {
        for mut controller in &mut cars {
            let mut transform = Transform::default();
            let mut velocity = LinearVelocity::default();
            let mut force = ExternalForce::default();
            let mut body = AvianBody {
                transform: &mut transform,
                velocity: &mut velocity,
                force: &mut force,
            };
            log.0.push(controller.tick(0.01, &mut body, &SolidGround));
        }
    }

    /// A 10 ms fixed tick driven by frames of `frame` length, with W and D held.
    fn held_keys_app(frame: Duration) -> App {
        let mut app = App::new();
        app.add_plugins(TimePlugin)
            .insert_resource(Time::<Fixed>::from_duration(Duration::from_millis(10)))
            .insert_resource(TimeUpdateStrategy::ManualDuration(frame))
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<TickLog>()
            .add_event::<DriveInput>()
            .configure_sets(
                FixedUpdate,
                (DriveSet::Sample, DriveSet::Input, DriveSet::Control).chain(),
            )
            .add_systems(
                FixedUpdate,
                (
                    sample_held_drive_keys.in_set(DriveSet::Sample),
                    latch_drive_inputs.in_set(DriveSet::Input),
                    tick_on_solid_ground.in_set(DriveSet::Control),
                ),
            );

        let controller =
            VehicleController::new(VehicleConfig::new(23.0, 12_000.0, 90.0)).unwrap();
        app.world_mut().spawn((OctaneCar, controller));
        {
            let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keyboard.press(KeyCode::KeyW);
            keyboard.press(KeyCode::KeyD);
        }

        // The first update only starts the clock.
        app.update();
        app.world_mut().resource_mut::<TickLog>().0.clear();
        app
    }

    #[test]
    fn every_tick_of_a_slow_frame_drives() {
        let mut app = held_keys_app(Duration::from_millis(20));
        app.update();

        let log = &app.world().resource::<TickLog>().0;
        assert_eq!(log.len(), 2, "a 20 ms frame holds two 10 ms ticks");
        for report in log {
            assert!(report.drive_force.is_some());
            assert!(report.yaw_delta > 0.0);
        }
    }

    #[test]
    fn one_tick_frames_drive_the_same_amount_per_tick() {
        let mut app = held_keys_app(Duration::from_millis(10));
        app.update();
        app.update();

        let log = &app.world().resource::<TickLog>().0;
        assert_eq!(log.len(), 2);
        assert!(log.iter().all(|report| report.drive_force.is_some()));
    }
}
