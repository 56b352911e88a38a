// Math utilities and helper functions

use glam::Vec3;

/// Move `current` towards `target` by at most `max_delta`
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Wrap a value into `[0, period)`. A non-positive period collapses to 0.
pub fn wrap(value: f32, period: f32) -> f32 {
    if period <= 0.0 {
        return 0.0;
    }
    let wrapped = value.rem_euclid(period);
    // rem_euclid can round up to `period` for tiny negative inputs
    if wrapped >= period {
        0.0
    } else {
        wrapped
    }
}

/// Yaw angle (rotation about +Y) that faces along a ground-plane direction.
///
/// Returns `None` for a zero direction, where facing is undefined.
/// Facing straight back is always `PI`, never `-PI`.
pub fn yaw_from_direction(direction: Vec3) -> Option<f32> {
    if direction.x == 0.0 && direction.z == 0.0 {
        None
    } else {
        // Adding +0.0 turns a negative zero into a positive one
        Some((direction.x + 0.0).atan2(direction.z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_move_towards() {
        assert_eq!(move_towards(0.0, 1.0, 0.25), 0.25);
        assert_eq!(move_towards(0.9, 1.0, 0.25), 1.0);
        assert_eq!(move_towards(1.0, 0.0, 0.5), 0.5);
        assert_eq!(move_towards(0.2, 0.0, 0.5), 0.0);
    }

    #[test]
    fn test_wrap() {
        assert_relative_eq!(wrap(2.5, 1.0), 0.5);
        assert_relative_eq!(wrap(-0.25, 1.0), 0.75);
        assert_eq!(wrap(1.0, 1.0), 0.0);
        assert_eq!(wrap(3.0, 0.0), 0.0);
    }

    #[test]
    fn test_yaw_from_direction() {
        assert_eq!(yaw_from_direction(Vec3::ZERO), None);
        assert_relative_eq!(yaw_from_direction(Vec3::Z).unwrap(), 0.0);
        assert_relative_eq!(yaw_from_direction(Vec3::X).unwrap(), FRAC_PI_2);
        assert_relative_eq!(yaw_from_direction(Vec3::NEG_Z).unwrap(), PI);
    }

    #[test]
    fn test_yaw_straight_back_ignores_sign_of_zero() {
        assert_relative_eq!(yaw_from_direction(-Vec3::Z).unwrap(), PI);
        assert_relative_eq!(yaw_from_direction(Vec3::new(-0.0, 0.0, -1.0)).unwrap(), PI);
    }
}
