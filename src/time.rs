//! Julian Date conversions and sidereal time.
//!
//! The Julian Date (JD) is the continuous count of days since noon UTC on
//! January 1, 4713 BCE in the proleptic Julian calendar. It is the standard
//! timekeeping format for ephemerides, astronomical observations, and
//! sidereal calculations.
//!
//! # Key Epochs
//!
//! - **JD 2451545.0**: J2000.0 epoch (2000 January 1.5)
//! - **Modified Julian Date (MJD)**: JD − 2400000.5 (starts at midnight)
//!
//! Calendar conversion follows Jean Meeus, *Astronomical Algorithms*
//! (2nd ed., Chapter 7): dates convert to JD through the Gregorian
//! correction, and JD converts back through the Julian branch for
//! JD < 2299161 (before the October 1582 reform).
//!
//! # Examples
//!
//! ```
//! use starward::time::JulianDate;
//!
//! let jd = JulianDate::from_calendar(2000, 1, 1, 12, 0, 0.0).unwrap();
//! assert!((jd.value() - 2451545.0).abs() < 1e-9);
//! assert!(jd.gmst() > 18.6 && jd.gmst() < 18.8);
//! ```

use crate::constants::{JD_J2000, JULIAN_CENTURY, MJD_OFFSET};
use crate::error::{AstroError, Result};
use crate::recorder::{note, Recorder};
use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Sub};

const MICROS_PER_DAY: i64 = 86_400_000_000;

/// A Julian Date with full double precision.
#[derive(Debug, Clone, Copy, Default)]
pub struct JulianDate {
    jd: f64,
}

impl JulianDate {
    /// Wraps a raw Julian Date in days.
    pub fn new(jd: f64) -> Self {
        JulianDate { jd }
    }

    /// The Julian Date of the J2000.0 epoch.
    pub fn j2000() -> Self {
        JulianDate { jd: JD_J2000 }
    }

    /// The current instant.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Creates from a Modified Julian Date.
    pub fn from_mjd(mjd: f64) -> Self {
        JulianDate { jd: mjd + MJD_OFFSET }
    }

    /// Converts a UTC datetime to a Julian Date.
    ///
    /// The day fraction carries microsecond precision, so round-tripping
    /// through [`to_datetime`](Self::to_datetime) recovers the original
    /// instant to well under 1e-5 s.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        let mut year = dt.year();
        let mut month = dt.month() as i32;
        let day = dt.day() as f64;

        let day_fraction = dt.hour() as f64 / 24.0
            + dt.minute() as f64 / 1440.0
            + dt.second() as f64 / 86_400.0
            + dt.timestamp_subsec_micros() as f64 / 86_400_000_000.0;

        if month <= 2 {
            year -= 1;
            month += 12;
        }

        let a = (year as f64 / 100.0).floor();
        let b = 2.0 - a + (a / 4.0).floor();

        let jd = (365.25 * (year as f64 + 4716.0)).floor()
            + (30.6001 * ((month + 1) as f64)).floor()
            + day
            + day_fraction
            + b
            - 1524.5;

        JulianDate { jd }
    }

    /// Creates from calendar components, assumed UTC. Seconds may be
    /// fractional.
    ///
    /// # Errors
    /// Returns `AstroError::InvalidDateTime` for out-of-range components.
    pub fn from_calendar(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self> {
        if !(1..=12).contains(&month)
            || !(1..=31).contains(&day)
            || hour >= 24
            || minute >= 60
            || !(0.0..60.0).contains(&second)
        {
            return Err(AstroError::InvalidDateTime {
                reason: format!("{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second}"),
            });
        }

        let micro = (((second - second.floor()) * 1e6).round() as u32).min(999_999);
        let dt = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_micro_opt(hour, minute, second.floor() as u32, micro))
            .ok_or_else(|| AstroError::InvalidDateTime {
                reason: format!("{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second}"),
            })?;
        Ok(Self::from_datetime(dt.and_utc()))
    }

    /// The raw Julian Date in days.
    pub fn value(&self) -> f64 {
        self.jd
    }

    /// Modified Julian Date (JD − 2400000.5).
    pub fn mjd(&self) -> f64 {
        self.jd - MJD_OFFSET
    }

    /// Julian centuries since J2000.0.
    pub fn t_j2000(&self) -> f64 {
        (self.jd - JD_J2000) / JULIAN_CENTURY
    }

    /// Days since J2000.0.
    pub fn days_since_j2000(&self) -> f64 {
        self.jd - JD_J2000
    }

    /// Converts back to a UTC datetime (Meeus Ch. 7).
    ///
    /// # Errors
    /// Returns `AstroError::InvalidDateTime` if the resulting calendar date
    /// cannot be represented by `chrono` (far proleptic dates).
    pub fn to_datetime(&self) -> Result<DateTime<Utc>> {
        let shifted = self.jd + 0.5;
        let mut z = shifted.floor() as i64;
        let f = shifted - shifted.floor();

        let mut micros = (f * MICROS_PER_DAY as f64).round() as i64;
        if micros >= MICROS_PER_DAY {
            z += 1;
            micros = 0;
        }

        // Julian branch before the Gregorian reform (JD < 2299161)
        let a = if z < 2_299_161 {
            z
        } else {
            let alpha = ((z as f64 - 1_867_216.25) / 36_524.25).floor() as i64;
            z + 1 + alpha - alpha / 4
        };

        let b = a + 1524;
        let c = ((b as f64 - 122.1) / 365.25).floor() as i64;
        let d = (365.25 * c as f64).floor() as i64;
        let e = ((b - d) as f64 / 30.6001).floor() as i64;

        let day = b - d - (30.6001 * e as f64).floor() as i64;
        let month = if e < 14 { e - 1 } else { e - 13 };
        let year = if month > 2 { c - 4716 } else { c - 4715 };

        let hour = micros / 3_600_000_000;
        let minute = (micros / 60_000_000) % 60;
        let second = (micros / 1_000_000) % 60;
        let microsecond = micros % 1_000_000;

        NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
            .and_then(|d| {
                d.and_hms_micro_opt(hour as u32, minute as u32, second as u32, microsecond as u32)
            })
            .map(|ndt| ndt.and_utc())
            .ok_or_else(|| AstroError::InvalidDateTime {
                reason: format!("JD {} is outside the representable calendar range", self.jd),
            })
    }

    /// Greenwich Mean Sidereal Time in hours, normalized to [0, 24).
    ///
    /// Uses the IAU 2006 precession polynomial in seconds of time.
    pub fn gmst(&self) -> f64 {
        self.gmst_recorded(None)
    }

    /// [`gmst`](Self::gmst) reporting intermediate values to a recorder.
    pub fn gmst_recorded(&self, mut recorder: Option<&mut Recorder>) -> f64 {
        let t = self.t_j2000();

        note(
            &mut recorder,
            "Julian centuries since J2000.0",
            format!("T = (JD - 2451545.0) / 36525 = ({:.10} - 2451545.0) / 36525 = {t:.12}", self.jd),
        );

        let gmst_sec = 67_310.548_41
            + (876_600.0 * 3600.0 + 8_640_184.812_866) * t
            + 0.093_104 * t * t
            - 6.2e-6 * t * t * t;

        note(
            &mut recorder,
            "GMST polynomial (IAU 2006)",
            format!(
                "θ = 67310.54841 + (876600×3600 + 8640184.812866)T + 0.093104T² − 6.2×10⁻⁶T³\n\
                 = {gmst_sec:.6} seconds"
            ),
        );

        let mut hours = (gmst_sec / 3600.0) % 24.0;
        if hours < 0.0 {
            hours += 24.0;
        }

        note(&mut recorder, "Result", format!("GMST = {hours:.10} hours"));

        hours
    }

    /// Local Mean Sidereal Time in hours at the given longitude (degrees,
    /// positive east of Greenwich), normalized to [0, 24).
    pub fn lst(&self, longitude_east_deg: f64) -> f64 {
        let mut h = (self.gmst() + longitude_east_deg / 15.0) % 24.0;
        if h < 0.0 {
            h += 24.0;
        }
        h
    }
}

impl PartialEq for JulianDate {
    /// Approximate equality: 1e-12 relative tolerance.
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.jd, other.jd);
        if a == b {
            return true;
        }
        (a - b).abs() <= 1e-12 * a.abs().max(b.abs())
    }
}

impl PartialOrd for JulianDate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.jd.partial_cmp(&other.jd)
    }
}

impl Add<f64> for JulianDate {
    type Output = JulianDate;

    /// Adding a float adds days.
    fn add(self, days: f64) -> JulianDate {
        JulianDate { jd: self.jd + days }
    }
}

impl Sub<f64> for JulianDate {
    type Output = JulianDate;

    fn sub(self, days: f64) -> JulianDate {
        JulianDate { jd: self.jd - days }
    }
}

impl Sub for JulianDate {
    type Output = f64;

    /// Subtracting two Julian Dates yields the day count between them.
    fn sub(self, other: JulianDate) -> f64 {
        self.jd - other.jd
    }
}

impl fmt::Display for JulianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JD {:.6}", self.jd)
    }
}

impl Serialize for JulianDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.jd)
    }
}
