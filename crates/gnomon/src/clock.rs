use crate::units::Hours;
use serde::Serialize;
use std::fmt;
use strum::{Display as StrumDisplay, EnumString};

pub const DEFAULT_ZONE: &str = "IST";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive)]
pub enum Meridiem {
    #[strum(serialize = "AM")]
    Am,
    #[strum(serialize = "PM")]
    Pm,
}

/// A decimal hour split into 12-hour clock parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
    pub meridiem: Meridiem,
}

impl ClockTime {
    /// Minutes are rounded to the nearest whole minute and a rounded 60 carries
    /// into the next hour, so 11.999 reads 12:00 PM. Hours wrap modulo 24.
    pub fn from_hours(time: Hours) -> Self {
        let whole = time.floor();
        let mut minute = ((*time - whole) * 60.0).round() as u32;
        let mut hour24 = whole.rem_euclid(24.0) as u32;
        if minute >= 60 {
            minute = 0;
            hour24 = (hour24 + 1) % 24;
        }

        let meridiem = if hour24 >= 12 {
            Meridiem::Pm
        } else {
            Meridiem::Am
        };
        let hour = match hour24 % 12 {
            0 => 12,
            h => h,
        };

        Self {
            hour,
            minute,
            meridiem,
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02} {}", self.hour, self.minute, self.meridiem)
    }
}

pub fn format_clock_time(time: Hours) -> String {
    format_clock_time_in(time, DEFAULT_ZONE)
}

pub fn format_clock_time_in(time: Hours, zone: &str) -> String {
    let clock = ClockTime::from_hours(time);
    if zone.is_empty() {
        clock.to_string()
    } else {
        format!("{} {}", clock, zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(t: f64) -> String {
        format_clock_time(Hours::new(t))
    }

    #[test]
    fn test_format_clock_time() {
        let cases = vec![
            (9.5, "9:30 AM IST"),
            (12.0, "12:00 PM IST"),
            (0.0, "12:00 AM IST"),
            (6.0, "6:00 AM IST"),
            (6.25, "6:15 AM IST"),
            (13.75, "1:45 PM IST"),
            (18.0, "6:00 PM IST"),
            (23.5, "11:30 PM IST"),
        ];

        for (time, expected) in cases {
            assert_eq!(fmt(time), expected, "time {}", time);
        }
    }

    #[test]
    fn test_minute_rounding_carries_into_next_hour() {
        assert_eq!(fmt(11.999), "12:00 PM IST");
        assert_eq!(fmt(9.9999), "10:00 AM IST");
        assert_eq!(fmt(23.9999), "12:00 AM IST");
    }

    #[test]
    fn test_hours_wrap_around_the_day() {
        assert_eq!(fmt(24.0), "12:00 AM IST");
        assert_eq!(fmt(25.5), "1:30 AM IST");
        assert_eq!(fmt(-1.0), "11:00 PM IST");
    }

    #[test]
    fn test_zone_label() {
        assert_eq!(format_clock_time_in(Hours::new(9.5), "UTC"), "9:30 AM UTC");
        assert_eq!(format_clock_time_in(Hours::new(9.5), ""), "9:30 AM");
    }

    #[test]
    fn test_meridiem_parsing() {
        assert_eq!("pm".parse::<Meridiem>().unwrap(), Meridiem::Pm);
        assert_eq!("AM".parse::<Meridiem>().unwrap(), Meridiem::Am);
        assert!("noon".parse::<Meridiem>().is_err());
    }
}
