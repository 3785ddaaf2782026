// octane_core/src/math.rs

use serde::{Deserialize, Serialize};

/// A body orientation expressed as three Euler angles in DEGREES.
///
/// The world frame is ENU (X east, Y north, Z up). `yaw` is the heading about
/// world up and is positive when turning RIGHT (clockwise seen from above), so a
/// positive steer sample produces a positive yaw delta. With the vehicle facing
/// north, `pitch` is about east and raises the nose when positive, and `roll`
/// is about north. The vehicle controller carries both through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotator {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

impl Rotator {
    pub const ZERO: Self = Self {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    pub fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Returns a copy turned by `delta_deg` about world up, with the yaw wrapped
    /// back into (-180, 180].
    pub fn add_yaw(self, delta_deg: f64) -> Self {
        Self {
            yaw: normalize_axis(self.yaw + delta_deg),
            ..self
        }
    }
}

/// Wraps an angle in degrees into (-180, 180].
pub fn normalize_axis(angle_deg: f64) -> f64 {
    let wrapped = angle_deg.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
