use crate::clock;
use crate::geometry::{self, GeometryError, OVERHEAD_ANGLE};
use crate::units::{Centimeters, Degrees, Hours, Pixels};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

pub const HEIGHT_RANGE: RangeInclusive<f64> = 50.0..=250.0;
pub const TIME_RANGE: RangeInclusive<f64> = 6.0..=18.0;
pub const TIME_STEP: f64 = 0.25;
pub const DEFAULT_HEIGHT: f64 = 170.0; // average adult, cm
pub const DEFAULT_TIME: f64 = 9.5;

pub const MAX_INPUT_HEIGHT: f64 = 250.0;
pub const CONTAINER_HEIGHT: f64 = 280.0;
pub const OBJECT_WIDTH: f64 = 40.0;
pub const OFFSCREEN_SHADOW: f64 = 5000.0;

pub const INFINITE_SHADOW_LABEL: &str = "∞";

/// Finest interval a sweep accepts, the same as the slider step.
pub const MIN_SWEEP_STEP: f64 = TIME_STEP;

/// The two user-controlled values. Everything else is derived from these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Inputs {
    pub height: Centimeters,
    pub time: Hours,
}

impl Default for Inputs {
    fn default() -> Self {
        Self {
            height: Centimeters::new(DEFAULT_HEIGHT),
            time: Hours::new(DEFAULT_TIME),
        }
    }
}

impl Inputs {
    /// Builds inputs the way the controls would, clamped and snapped.
    pub fn new(height: f64, time: f64) -> Self {
        let mut inputs = Self::default();
        inputs.set_height(height);
        inputs.set_time(time);
        inputs
    }

    pub fn set_height(&mut self, height: f64) {
        self.height = Centimeters::new(clamp_to(height, &HEIGHT_RANGE, DEFAULT_HEIGHT));
    }

    pub fn set_time(&mut self, time: f64) {
        let snapped = (time / TIME_STEP).round() * TIME_STEP;
        self.time = Hours::new(clamp_to(snapped, &TIME_RANGE, DEFAULT_TIME));
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn clamp_to(value: f64, range: &RangeInclusive<f64>, fallback: f64) -> f64 {
    if value.is_nan() {
        return fallback;
    }
    value.clamp(*range.start(), *range.end())
}

/// Mapping between the physical scene and the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub max_input_height: Centimeters,
    pub container_height: Pixels,
    pub object_width: Pixels,
    pub offscreen_shadow: Pixels,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            max_input_height: Centimeters::new(MAX_INPUT_HEIGHT),
            container_height: Pixels::new(CONTAINER_HEIGHT),
            object_width: Pixels::new(OBJECT_WIDTH),
            offscreen_shadow: Pixels::new(OFFSCREEN_SHADOW),
        }
    }
}

/// Every value derived from a pair of [`Inputs`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub inputs: Inputs,
    pub sun_angle: Degrees,
    pub shadow_length: Centimeters,
    pub display_height: Pixels,
    pub display_shadow_length: Pixels,
    pub sunbeam_length: Pixels,
    /// Rotation of the sun around the scene centre, 0° straight up.
    pub sun_rotation: Degrees,
    pub formatted_time: String,
}

impl Scene {
    pub fn compute(inputs: &Inputs, viewport: &Viewport, zone: &str) -> Result<Self, GeometryError> {
        let sun_angle = geometry::sun_angle(inputs.time);
        let shadow_length = geometry::shadow_length(inputs.height, sun_angle)?;

        let display_height = geometry::scale_to_display(
            inputs.height,
            viewport.max_input_height,
            viewport.container_height,
        );
        let display_shadow_length = geometry::display_shadow_length(
            display_height,
            sun_angle,
            shadow_length,
            viewport.offscreen_shadow,
        );

        log::debug!(
            "Recomputed scene: {} at {} -> {} shadow {}",
            inputs.height,
            inputs.time,
            sun_angle,
            shadow_length
        );

        Ok(Self {
            inputs: *inputs,
            sun_angle,
            shadow_length,
            display_height,
            display_shadow_length,
            sunbeam_length: geometry::sunbeam_length(display_height, display_shadow_length),
            sun_rotation: Degrees::new(OVERHEAD_ANGLE - *sun_angle),
            formatted_time: clock::format_clock_time_in(inputs.time, zone),
        })
    }

    /// Shadow length as shown to the user, without the unit.
    pub fn shadow_label(&self) -> String {
        format_shadow_length(self.shadow_length)
    }

    pub fn casts_sunbeam(&self) -> bool {
        self.shadow_length.is_finite()
            && *self.shadow_length > 0.0
            && *self.sun_angle < OVERHEAD_ANGLE
    }
}

/// Two decimals, or `∞` for an unbounded shadow.
pub fn format_shadow_length(shadow: Centimeters) -> String {
    if shadow.is_finite() {
        format!("{:.2}", *shadow)
    } else {
        INFINITE_SHADOW_LABEL.to_string()
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SweepError {
    #[error("Step must be at least 0.25 hours, got {0}")]
    StepTooSmall(f64),
    #[error("Time range {0} to {1} must be ascending and within 6 to 18")]
    InvalidRange(f64, f64),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// One row of a [`sweep`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepRow {
    pub time: Hours,
    pub sun_angle: Degrees,
    pub shadow_length: Centimeters,
}

/// Shadow of one object at every `step` hours from `from` through `to`.
/// Both ends must lie in [`TIME_RANGE`], so a sweep has at most
/// 12 / [`MIN_SWEEP_STEP`] + 1 rows.
pub fn sweep(
    height: Centimeters,
    from: Hours,
    to: Hours,
    step: f64,
) -> Result<Vec<SweepRow>, SweepError> {
    if step.is_nan() || step < MIN_SWEEP_STEP {
        return Err(SweepError::StepTooSmall(step));
    }
    if !TIME_RANGE.contains(&*from) || !TIME_RANGE.contains(&*to) || *from > *to {
        return Err(SweepError::InvalidRange(*from, *to));
    }

    let last = ((*to - *from) / step + 1e-9).floor() as usize;
    (0..=last)
        .map(|i| {
            let time = Hours::new(*from + i as f64 * step);
            let sun_angle = geometry::sun_angle(time);
            let shadow_length = geometry::shadow_length(height, sun_angle)?;
            Ok(SweepRow {
                time,
                sun_angle,
                shadow_length,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(height: f64, time: f64) -> Scene {
        Scene::compute(&Inputs::new(height, time), &Viewport::default(), clock::DEFAULT_ZONE)
            .unwrap()
    }

    #[test]
    fn test_default_inputs() {
        let inputs = Inputs::default();
        assert_eq!(inputs.height, Centimeters::new(170.0));
        assert_eq!(inputs.time, Hours::new(9.5));
    }

    #[test]
    fn test_inputs_clamp_and_snap() {
        let mut inputs = Inputs::default();

        inputs.set_height(10.0);
        assert_eq!(*inputs.height, 50.0);
        inputs.set_height(400.0);
        assert_eq!(*inputs.height, 250.0);
        inputs.set_height(f64::NAN);
        assert_eq!(*inputs.height, DEFAULT_HEIGHT);

        inputs.set_time(9.6);
        assert_eq!(*inputs.time, 9.5);
        inputs.set_time(9.13);
        assert_eq!(*inputs.time, 9.25);
        inputs.set_time(2.0);
        assert_eq!(*inputs.time, 6.0);
        inputs.set_time(21.0);
        assert_eq!(*inputs.time, 18.0);

        inputs.reset();
        assert_eq!(inputs, Inputs::default());
    }

    #[test]
    fn test_default_scene() {
        let s = scene(170.0, 9.5);
        assert_eq!(s.formatted_time, "9:30 AM IST");
        assert!((*s.sun_angle - 52.333_333).abs() < 1e-5);
        assert!((*s.display_height - 190.4).abs() < 1e-9);
        assert!((*s.display_shadow_length - 146.98).abs() < 0.01);
        assert!((*s.sun_rotation - 37.666_667).abs() < 1e-5);
        assert!(s.casts_sunbeam());
    }

    #[test]
    fn test_noon_scene() {
        let s = scene(170.0, 12.0);
        assert_eq!(s.sun_angle, Degrees::new(89.0));
        assert_eq!(s.shadow_label(), "2.97");
        assert_eq!(s.formatted_time, "12:00 PM IST");
    }

    #[test]
    fn test_dawn_scene() {
        let s = scene(200.0, 6.0);
        assert_eq!(s.sun_angle, Degrees::new(1.0));
        assert_eq!(s.shadow_label(), "11457.99");
        assert!(*s.display_shadow_length > *s.display_height * 50.0);
    }

    #[test]
    fn test_shadow_label_for_unbounded_shadow() {
        let mut s = scene(170.0, 9.0);
        assert_eq!(s.shadow_label(), "170.00");

        s.shadow_length = Centimeters::new(f64::INFINITY);
        assert_eq!(s.shadow_label(), "∞");
        assert!(!s.casts_sunbeam());
    }

    #[test]
    fn test_sunbeam_spans_object_and_shadow() {
        let s = scene(100.0, 9.0);
        let expected = (*s.display_height).hypot(*s.display_shadow_length);
        assert!((*s.sunbeam_length - expected).abs() < 1e-9);
    }

    #[test]
    fn test_scene_serializes_to_json() {
        let s = scene(100.0, 9.0);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["sun_angle"], 45.0);
        assert_eq!(json["inputs"]["height"], 100.0);
        assert_eq!(json["formatted_time"], "9:00 AM IST");
    }

    #[test]
    fn test_sweep_covers_the_day() {
        let height = Centimeters::new(170.0);

        let hourly = sweep(height, Hours::new(6.0), Hours::new(18.0), 1.0).unwrap();
        assert_eq!(hourly.len(), 13);
        assert_eq!(hourly[0].time, Hours::new(6.0));
        assert_eq!(hourly[6].sun_angle, Degrees::new(89.0));
        assert_eq!(hourly[12].time, Hours::new(18.0));

        let quarters = sweep(height, Hours::new(6.0), Hours::new(18.0), MIN_SWEEP_STEP).unwrap();
        assert_eq!(quarters.len(), 49);

        // the last row never overshoots `to`
        let uneven = sweep(height, Hours::new(9.0), Hours::new(10.0), 0.4).unwrap();
        assert_eq!(uneven.len(), 3);
        assert!((*uneven[2].time - 9.8).abs() < 1e-9);
    }

    #[test]
    fn test_sweep_rejects_tiny_or_missing_step() {
        let height = Centimeters::new(170.0);
        let (from, to) = (Hours::new(6.0), Hours::new(18.0));

        assert_eq!(
            sweep(height, from, to, 1e-12),
            Err(SweepError::StepTooSmall(1e-12))
        );
        assert_eq!(sweep(height, from, to, 0.0), Err(SweepError::StepTooSmall(0.0)));
        assert!(matches!(
            sweep(height, from, to, f64::NAN),
            Err(SweepError::StepTooSmall(_))
        ));
    }

    #[test]
    fn test_sweep_rejects_bad_range() {
        let height = Centimeters::new(170.0);

        assert_eq!(
            sweep(height, Hours::new(15.0), Hours::new(9.0), 1.0),
            Err(SweepError::InvalidRange(15.0, 9.0))
        );
        assert_eq!(
            sweep(height, Hours::new(6.0), Hours::new(1e300), 1.0),
            Err(SweepError::InvalidRange(6.0, 1e300))
        );
        assert!(matches!(
            sweep(Centimeters::new(-1.0), Hours::new(6.0), Hours::new(7.0), 1.0),
            Err(SweepError::Geometry(GeometryError::InvalidHeight(_)))
        ));
    }
}
