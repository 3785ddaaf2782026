// octane_sim/src/simulation/core/transforms.rs

use bevy::prelude::{Quat as BevyQuat, Transform as BevyTransform, Vec3 as BevyVec3};
use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use octane_core::prelude::Rotator;
use std::f64::consts::FRAC_PI_2;

// =========================================================================
// == Coordinate System Conversion Helpers ==
// The controller works in a right-handed ENU world (X east, Y north, Z up).
// Bevy is right-handed Y-up with -Z forward. Everything crossing the
// boundary between the two goes through these functions.
// =========================================================================

thread_local! {
    /// Quaternion representing the rotation from the ENU coordinate frame to the Bevy coordinate frame.
    /// ENU's X-axis (1,0,0) becomes (1,0,0) in Bevy coords.
    /// ENU's Y-axis (0,1,0) (North) becomes (0,0,-1) in Bevy coords (Bevy -Z).
    /// ENU's Z-axis (0,0,1) (Up) becomes (0,1,0) in Bevy coords (Bevy Y).
    /// This corresponds to a -90 degree rotation around the X-axis.
    pub static Q_ENU_FRAME_TO_BEVY_FRAME: UnitQuaternion<f64> =
        UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -FRAC_PI_2);
}

/// Converts a 3D coordinate vector from ENU to Bevy world.
pub fn enu_vector_to_bevy_vector(enu_vec: &Vector3<f64>) -> BevyVec3 {
    BevyVec3::new(
        enu_vec.x as f32,  // East -> Bevy X
        enu_vec.z as f32,  // ENU Up -> Bevy Y
        -enu_vec.y as f32, // ENU North -> Bevy -Z
    )
}

/// Converts a 3D coordinate vector from Bevy world to ENU.
pub fn bevy_vector_to_enu_vector(bevy_vec: &BevyVec3) -> Vector3<f64> {
    Vector3::new(
        bevy_vec.x as f64,  // Bevy X -> ENU East
        -bevy_vec.z as f64, // Bevy -Z -> ENU North
        bevy_vec.y as f64,  // Bevy Y -> ENU Up
    )
}

/// Converts an object's orientation from ENU frame to Bevy world frame.
pub fn enu_quat_to_bevy_quat(enu_obj_quat: &UnitQuaternion<f64>) -> BevyQuat {
    // q_obj_in_Bevy = Q_Frame(Bevy_from_ENU) * q_obj_in_ENU * Q_Frame(Bevy_from_ENU)_inverse
    let final_rot_f64 = Q_ENU_FRAME_TO_BEVY_FRAME.with(|q_enu_to_bevy_frame| {
        *q_enu_to_bevy_frame * enu_obj_quat * q_enu_to_bevy_frame.inverse()
    });

    BevyQuat::from_xyzw(
        final_rot_f64.coords.x as f32,
        final_rot_f64.coords.y as f32,
        final_rot_f64.coords.z as f32,
        final_rot_f64.coords.w as f32,
    )
}

/// Converts an object's orientation from Bevy world frame to ENU frame.
pub fn bevy_quat_to_enu_quat(bevy_obj_quat: &BevyQuat) -> UnitQuaternion<f64> {
    let bevy_q_f64 = UnitQuaternion::from_quaternion(Quaternion::new(
        bevy_obj_quat.w as f64, // nalgebra Quaternion::new is w,x,y,z
        bevy_obj_quat.x as f64,
        bevy_obj_quat.y as f64,
        bevy_obj_quat.z as f64,
    ));

    // q_obj_in_ENU = Q_Frame(Bevy_from_ENU)_inverse * q_obj_in_Bevy * Q_Frame(Bevy_from_ENU)
    Q_ENU_FRAME_TO_BEVY_FRAME.with(|q_enu_to_bevy_frame| {
        q_enu_to_bevy_frame.inverse() * bevy_q_f64 * *q_enu_to_bevy_frame
    })
}

// --- Rotator <-> ENU orientation ---
// A vehicle at rest faces north (+Y). Pitch is about east (X), positive
// raising the nose. Roll is about north (Y), the vehicle's forward axis.
// Yaw is about up (Z); nalgebra turns counter-clockwise seen from above
// while `Rotator::yaw` turns clockwise, so its sign flips here.

pub fn enu_quat_to_rotator(enu_quat: &UnitQuaternion<f64>) -> Rotator {
    let (about_east, about_north, about_up) = enu_quat.euler_angles();
    Rotator::new(
        about_east.to_degrees(),
        -about_up.to_degrees(),
        about_north.to_degrees(),
    )
}

pub fn rotator_to_enu_quat(rotator: &Rotator) -> UnitQuaternion<f64> {
    UnitQuaternion::from_euler_angles(
        rotator.pitch.to_radians(),
        rotator.roll.to_radians(),
        -rotator.yaw.to_radians(),
    )
}

pub fn rotator_to_bevy_quat(rotator: &Rotator) -> BevyQuat {
    enu_quat_to_bevy_quat(&rotator_to_enu_quat(rotator))
}

pub fn bevy_quat_to_rotator(bevy_quat: &BevyQuat) -> Rotator {
    enu_quat_to_rotator(&bevy_quat_to_enu_quat(bevy_quat))
}

/// Builds a Bevy transform from an ENU position and a rotator.
pub fn enu_pose_to_bevy_transform(translation: &Vector3<f64>, rotator: &Rotator) -> BevyTransform {
    BevyTransform::from_translation(enu_vector_to_bevy_vector(translation))
        .with_rotation(rotator_to_bevy_quat(rotator))
}
