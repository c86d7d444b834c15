use derive_more::{Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Physical length in the object's domain.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    PartialOrd,
    Default,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
)]
#[serde(transparent)]
#[display("{_0} cm")]
pub struct Centimeters(f64);

crate::impl_measure_newtype!(Centimeters);

/// Length on the visualization viewport.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    PartialOrd,
    Default,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
)]
#[serde(transparent)]
#[display("{_0} px")]
pub struct Pixels(f64);

crate::impl_measure_newtype!(Pixels);

/// Sun elevation above the horizon.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    PartialOrd,
    Default,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
)]
#[serde(transparent)]
#[display("{_0}°")]
pub struct Degrees(f64);

crate::impl_measure_newtype!(Degrees);

impl Degrees {
    pub fn to_radians(self) -> f64 {
        self.0 * (PI / 180.0)
    }
}

/// Decimal hours on a 24h clock (9.5 is 9:30).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    PartialOrd,
    Default,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
)]
#[serde(transparent)]
#[display("{_0}h")]
pub struct Hours(f64);

crate::impl_measure_newtype!(Hours);
