use crate::units::{Centimeters, Degrees, Hours, Pixels};
use thiserror::Error;

pub const SOLAR_NOON: f64 = 12.0;
pub const HOURS_NOON_TO_HORIZON: f64 = 6.0; // noon to 6am/6pm
pub const MAX_SUN_ANGLE: f64 = 89.0;
pub const MIN_SUN_ANGLE: f64 = 1.0;
pub const OVERHEAD_ANGLE: f64 = 90.0;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    #[error("Object height must be a finite positive number, got {0}")]
    InvalidHeight(f64),
    #[error("Sun angle is not a number")]
    InvalidAngle,
}

/// Stylized sun elevation for a time of day: 89° at noon falling linearly to
/// 1° at 6am and 6pm. Not real solar geometry.
pub fn sun_angle(time: Hours) -> Degrees {
    let hour_offset = (*time - SOLAR_NOON).abs();
    Degrees::new(
        MAX_SUN_ANGLE - (hour_offset / HOURS_NOON_TO_HORIZON) * (MAX_SUN_ANGLE - MIN_SUN_ANGLE),
    )
}

/// Horizontal shadow cast by a vertical object of `height`.
///
/// At or below the horizon the shadow is unbounded (`f64::INFINITY`); with the
/// sun directly overhead there is none.
pub fn shadow_length(height: Centimeters, angle: Degrees) -> Result<Centimeters, GeometryError> {
    if !height.is_finite() || *height <= 0.0 {
        return Err(GeometryError::InvalidHeight(*height));
    }
    if angle.is_nan() {
        return Err(GeometryError::InvalidAngle);
    }

    if *angle <= 0.0 {
        return Ok(Centimeters::new(f64::INFINITY));
    }
    if *angle >= OVERHEAD_ANGLE {
        return Ok(Centimeters::new(0.0));
    }
    Ok(Centimeters::new(*height / angle.to_radians().tan()))
}

pub fn scale_to_display(
    height: Centimeters,
    max_input_height: Centimeters,
    container_height: Pixels,
) -> Pixels {
    Pixels::new((*height / *max_input_height) * *container_height)
}

/// Shadow in viewport pixels. Scaled from the displayed object height rather
/// than from `shadow` so the diagram stays bounded; an unbounded `shadow` maps
/// to `offscreen`.
pub fn display_shadow_length(
    display_height: Pixels,
    angle: Degrees,
    shadow: Centimeters,
    offscreen: Pixels,
) -> Pixels {
    if !shadow.is_finite() {
        return offscreen;
    }
    if *shadow == 0.0 {
        return Pixels::new(0.0);
    }
    Pixels::new(*display_height / angle.to_radians().tan())
}

/// Hypotenuse from the top of the object to the tip of its shadow.
pub fn sunbeam_length(display_height: Pixels, display_shadow: Pixels) -> Pixels {
    Pixels::new(display_height.hypot(*display_shadow))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cm(v: f64) -> Centimeters {
        Centimeters::new(v)
    }

    #[test]
    fn test_sun_angle_at_noon_and_edges() {
        assert_eq!(sun_angle(Hours::new(12.0)), Degrees::new(89.0));
        assert_eq!(sun_angle(Hours::new(6.0)), Degrees::new(1.0));
        assert_eq!(sun_angle(Hours::new(18.0)), Degrees::new(1.0));
        assert_eq!(sun_angle(Hours::new(9.0)), Degrees::new(45.0));
    }

    #[test]
    fn test_sun_angle_symmetric_around_noon() {
        for i in 0..=24 {
            let d = i as f64 * 0.25;
            let morning = sun_angle(Hours::new(SOLAR_NOON - d));
            let afternoon = sun_angle(Hours::new(SOLAR_NOON + d));
            assert_eq!(morning, afternoon, "asymmetric at offset {}", d);
            assert!((MIN_SUN_ANGLE..=MAX_SUN_ANGLE).contains(&*morning));
        }
    }

    #[test]
    fn test_shadow_length_policy_edges() {
        for h in [1.0, 50.0, 170.0, 250.0] {
            assert_eq!(shadow_length(cm(h), Degrees::new(90.0)).unwrap(), cm(0.0));
            assert_eq!(shadow_length(cm(h), Degrees::new(95.0)).unwrap(), cm(0.0));
            assert_eq!(
                shadow_length(cm(h), Degrees::new(0.0)).unwrap(),
                cm(f64::INFINITY)
            );
            assert!(!shadow_length(cm(h), Degrees::new(-3.0)).unwrap().is_finite());
        }
    }

    #[test]
    fn test_shadow_length_at_45_degrees_equals_height() {
        let shadow = shadow_length(cm(170.0), Degrees::new(45.0)).unwrap();
        assert!((*shadow - 170.0).abs() < 1e-9);
    }

    #[test]
    fn test_shadow_length_strictly_decreasing_in_angle() {
        let mut previous = f64::INFINITY;
        for a in 1..90 {
            let shadow = *shadow_length(cm(170.0), Degrees::new(a as f64)).unwrap();
            assert!(shadow < previous, "not decreasing at {}°", a);
            previous = shadow;
        }
    }

    #[test]
    fn test_shadow_length_rejects_bad_height() {
        assert_eq!(
            shadow_length(cm(0.0), Degrees::new(45.0)),
            Err(GeometryError::InvalidHeight(0.0))
        );
        assert_eq!(
            shadow_length(cm(-10.0), Degrees::new(45.0)),
            Err(GeometryError::InvalidHeight(-10.0))
        );
        assert!(shadow_length(cm(f64::NAN), Degrees::new(45.0)).is_err());
        assert!(shadow_length(cm(f64::INFINITY), Degrees::new(45.0)).is_err());
        assert_eq!(
            shadow_length(cm(170.0), Degrees::new(f64::NAN)),
            Err(GeometryError::InvalidAngle)
        );
    }

    #[test]
    fn test_end_to_end_scenarios() {
        let noon = shadow_length(cm(170.0), sun_angle(Hours::new(12.0))).unwrap();
        assert!((*noon - 2.97).abs() < 0.01);

        let dawn = shadow_length(cm(200.0), sun_angle(Hours::new(6.0))).unwrap();
        assert!((*dawn - 11457.99).abs() < 0.01);

        let morning = shadow_length(cm(100.0), sun_angle(Hours::new(9.0))).unwrap();
        assert!((*morning - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_to_display_is_linear() {
        let max = cm(250.0);
        let container = Pixels::new(280.0);
        assert_eq!(scale_to_display(cm(250.0), max, container), Pixels::new(280.0));
        assert_eq!(scale_to_display(cm(125.0), max, container), Pixels::new(140.0));
        assert!((*scale_to_display(cm(170.0), max, container) - 190.4).abs() < 1e-9);
    }

    #[test]
    fn test_display_shadow_uses_offscreen_for_unbounded_shadow() {
        let offscreen = Pixels::new(5000.0);
        let px = display_shadow_length(
            Pixels::new(190.4),
            Degrees::new(0.0),
            cm(f64::INFINITY),
            offscreen,
        );
        assert_eq!(px, offscreen);

        let px = display_shadow_length(Pixels::new(100.0), Degrees::new(45.0), cm(170.0), offscreen);
        assert!((*px - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_display_shadow_is_zero_when_sun_is_overhead() {
        let offscreen = Pixels::new(5000.0);
        let shadow = shadow_length(cm(170.0), Degrees::new(OVERHEAD_ANGLE)).unwrap();
        assert_eq!(shadow, cm(0.0));

        let px = display_shadow_length(Pixels::new(190.4), Degrees::new(90.0), shadow, offscreen);
        assert_eq!(px, Pixels::new(0.0));
        assert_eq!(sunbeam_length(Pixels::new(190.4), px), Pixels::new(190.4));
    }

    #[test]
    fn test_sunbeam_length() {
        assert_eq!(
            sunbeam_length(Pixels::new(3.0), Pixels::new(4.0)),
            Pixels::new(5.0)
        );
    }
}
