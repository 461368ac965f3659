//! Angle representation with exact unit conversions and stable trigonometry.
//!
//! [`Angle`] is an immutable, copyable value wrapping a radian scalar. It can
//! be built from any one of degrees, radians, hours, arcminutes, or
//! arcseconds, from sexagesimal components, or parsed from a string in the
//! common astronomical notations:
//!
//! ```
//! use starward::angle::Angle;
//!
//! let a = Angle::parse("45d30m00s").unwrap();
//! let b = Angle::parse("45°30′00″").unwrap();
//! let c = Angle::parse("45:30:00").unwrap();
//! assert_eq!(a, b);
//! assert_eq!(b, c);
//! assert!((a.degrees() - 45.5).abs() < 1e-12);
//!
//! let ra = Angle::parse("12h30m00s").unwrap();
//! assert!((ra.degrees() - 187.5).abs() < 1e-12);
//! ```
//!
//! Equality is approximate (1e-12 relative tolerance on the radian value);
//! ordering is by radian value.

use crate::error::{AstroError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

lazy_static! {
    /// HMS: "12h30m00s", "12h 30m", "12H"
    static ref HMS_REGEX: Regex = Regex::new(
        r"^([+-]?\d+(?:\.\d*)?)[hH]\s*(?:(\d+(?:\.\d*)?)[mM]?)?\s*(?:(\d+(?:\.\d*)?)[sS]?)?$"
    )
    .expect("HMS regex compilation failed");

    /// DMS with letter or unicode separators: "45d30m00s", "45°30′00″"
    static ref DMS_REGEX: Regex = Regex::new(
        r#"^([+-]?\d+(?:\.\d*)?)[dD°]\s*(\d+(?:\.\d*)?)['′mM]?\s*(\d+(?:\.\d*)?)["″sS]?$"#
    )
    .expect("DMS regex compilation failed");

    /// Colon-separated sexagesimal: "45:30:00"
    static ref COLON_REGEX: Regex = Regex::new(
        r"^([+-]?\d+(?:\.\d*)?):(\d+(?:\.\d*)?):(\d+(?:\.\d*)?)$"
    )
    .expect("colon regex compilation failed");

    /// Space-separated sexagesimal: "+45 30 00"
    static ref SPACE_REGEX: Regex = Regex::new(
        r"^([+-]?\d+(?:\.\d*)?)\s+(\d+(?:\.\d*)?)\s+(\d+(?:\.\d*)?)$"
    )
    .expect("space regex compilation failed");

    /// Plain decimal degrees, optionally suffixed: "45.5", "45.5d", "45.5°"
    static ref PLAIN_REGEX: Regex = Regex::new(r"^([+-]?\d+(?:\.\d*)?)[dD°]?$")
        .expect("plain regex compilation failed");
}

/// Units accepted by [`Angle::new`] and the CLI's `--unit` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleUnit {
    Degrees,
    Radians,
    Hours,
    Arcminutes,
    Arcseconds,
}

impl FromStr for AngleUnit {
    type Err = AstroError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "deg" | "degree" | "degrees" | "d" => Ok(AngleUnit::Degrees),
            "rad" | "radian" | "radians" => Ok(AngleUnit::Radians),
            "hours" | "hour" | "hr" | "h" => Ok(AngleUnit::Hours),
            "arcmin" | "arcminute" | "arcminutes" => Ok(AngleUnit::Arcminutes),
            "arcsec" | "arcsecond" | "arcseconds" => Ok(AngleUnit::Arcseconds),
            _ => Err(AstroError::ParseError {
                what: "angle unit",
                input: s.to_string(),
                expected: "deg | rad | hours | arcmin | arcsec",
            }),
        }
    }
}

/// An angular quantity stored internally in radians.
#[derive(Debug, Clone, Copy, Default)]
pub struct Angle {
    radians: f64,
}

impl Angle {
    /// Creates an angle from a value in the given unit.
    pub fn new(value: f64, unit: AngleUnit) -> Self {
        match unit {
            AngleUnit::Degrees => Self::from_degrees(value),
            AngleUnit::Radians => Self::from_radians(value),
            AngleUnit::Hours => Self::from_hours(value),
            AngleUnit::Arcminutes => Self::from_arcminutes(value),
            AngleUnit::Arcseconds => Self::from_arcseconds(value),
        }
    }

    /// Creates an angle from decimal degrees.
    pub fn from_degrees(degrees: f64) -> Self {
        Angle { radians: degrees.to_radians() }
    }

    /// Creates an angle from radians.
    pub fn from_radians(radians: f64) -> Self {
        Angle { radians }
    }

    /// Creates an angle from decimal hours (15° per hour, for RA and LST).
    pub fn from_hours(hours: f64) -> Self {
        Angle { radians: (hours * 15.0).to_radians() }
    }

    /// Creates an angle from arcminutes.
    pub fn from_arcminutes(arcminutes: f64) -> Self {
        Angle { radians: (arcminutes / 60.0).to_radians() }
    }

    /// Creates an angle from arcseconds.
    pub fn from_arcseconds(arcseconds: f64) -> Self {
        Angle { radians: (arcseconds / 3600.0).to_radians() }
    }

    /// Creates an angle from degrees, arcminutes, arcseconds.
    ///
    /// The sign is carried on the degrees field. Pass `-0.0` for angles in
    /// the open interval (-1°, 0°):
    ///
    /// ```
    /// use starward::angle::Angle;
    /// let a = Angle::from_dms(-0.0, 30.0, 0.0);
    /// assert!((a.degrees() + 0.5).abs() < 1e-12);
    /// ```
    pub fn from_dms(degrees: f64, minutes: f64, seconds: f64) -> Self {
        let sign = if degrees.is_sign_negative() { -1.0 } else { 1.0 };
        let total = degrees.abs() + minutes / 60.0 + seconds / 3600.0;
        Self::from_degrees(sign * total)
    }

    /// Creates an angle from hours, minutes, seconds of time.
    pub fn from_hms(hours: f64, minutes: f64, seconds: f64) -> Self {
        let sign = if hours.is_sign_negative() { -1.0 } else { 1.0 };
        let total = hours.abs() + minutes / 60.0 + seconds / 3600.0;
        Self::from_hours(sign * total)
    }

    /// Parses an angle from a string.
    ///
    /// Supported formats:
    /// - `"45.5"` or `"45.5d"` — decimal degrees
    /// - `"45d30m00s"` / `"45°30′00″"` — DMS
    /// - `"12h30m00s"` — HMS
    /// - `"45:30:00"` — DMS (colon form)
    /// - `"+45 30 00"` — DMS (space form)
    ///
    /// # Errors
    /// Returns `AstroError::ParseError` for unrecognized input.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();

        if let Some(caps) = HMS_REGEX.captures(value) {
            let h: f64 = caps[1].parse().unwrap_or(0.0);
            let m: f64 = caps.get(2).map_or(0.0, |m| m.as_str().parse().unwrap_or(0.0));
            let s: f64 = caps.get(3).map_or(0.0, |m| m.as_str().parse().unwrap_or(0.0));
            let h = if caps[1].starts_with('-') && h == 0.0 { -0.0 } else { h };
            return Ok(Self::from_hms(h, m, s));
        }

        for re in [&*DMS_REGEX, &*COLON_REGEX, &*SPACE_REGEX] {
            if let Some(caps) = re.captures(value) {
                let d: f64 = caps[1].parse().unwrap_or(0.0);
                let m: f64 = caps[2].parse().unwrap_or(0.0);
                let s: f64 = caps[3].parse().unwrap_or(0.0);
                let d = if caps[1].starts_with('-') && d == 0.0 { -0.0 } else { d };
                return Ok(Self::from_dms(d, m, s));
            }
        }

        if let Some(caps) = PLAIN_REGEX.captures(value) {
            let d: f64 = caps[1].parse().unwrap_or(0.0);
            return Ok(Self::from_degrees(d));
        }

        Err(AstroError::ParseError {
            what: "angle",
            input: value.to_string(),
            expected: "decimal degrees, DMS (45d30m00s, 45°30′00″, 45:30:00) or HMS (12h30m00s)",
        })
    }

    /// The angle in radians.
    pub fn radians(&self) -> f64 {
        self.radians
    }

    /// The angle in decimal degrees.
    pub fn degrees(&self) -> f64 {
        self.radians.to_degrees()
    }

    /// The angle in decimal hours (for RA and sidereal time).
    pub fn hours(&self) -> f64 {
        self.degrees() / 15.0
    }

    /// The angle in arcminutes.
    pub fn arcminutes(&self) -> f64 {
        self.degrees() * 60.0
    }

    /// The angle in arcseconds.
    pub fn arcseconds(&self) -> f64 {
        self.degrees() * 3600.0
    }

    /// True if the underlying value is negative.
    ///
    /// Needed by sexagesimal formatters when the leading field of
    /// [`to_dms`](Self::to_dms) is zero but the angle itself is negative
    /// (e.g. -0° 30′ 00″).
    pub fn is_negative(&self) -> bool {
        self.radians < 0.0
    }

    /// Splits into (degrees, arcminutes, arcseconds), sign on the degrees.
    pub fn to_dms(&self) -> (i32, u32, f64) {
        let total_seconds = self.arcseconds().abs();
        let degrees = (total_seconds / 3600.0).floor() as i32;
        let remaining = total_seconds % 3600.0;
        let minutes = (remaining / 60.0).floor() as u32;
        let seconds = remaining % 60.0;

        let degrees = if self.radians < 0.0 { -degrees } else { degrees };
        (degrees, minutes, seconds)
    }

    /// Splits into (hours, minutes, seconds), sign on the hours.
    pub fn to_hms(&self) -> (i32, u32, f64) {
        let total_seconds = (self.hours() * 3600.0).abs();
        let hours = (total_seconds / 3600.0).floor() as i32;
        let remaining = total_seconds % 3600.0;
        let minutes = (remaining / 60.0).floor() as u32;
        let seconds = remaining % 60.0;

        let hours = if self.radians < 0.0 { -hours } else { hours };
        (hours, minutes, seconds)
    }

    /// Formats as a DMS string with the given fractional-second precision.
    ///
    /// With `unicode` the separators are `° ′ ″`, otherwise `d m s`.
    pub fn format_dms(&self, precision: usize, unicode: bool) -> String {
        let (d, m, s) = self.to_dms();
        let sign = if self.is_negative() { "-" } else { "" };
        let width = precision + if precision > 0 { 3 } else { 2 };
        if unicode {
            format!("{sign}{}° {:02}′ {:0width$.precision$}″", d.abs(), m, s)
        } else {
            format!("{sign}{}d {:02}m {:0width$.precision$}s", d.abs(), m, s)
        }
    }

    /// Formats as an HMS string with the given fractional-second precision.
    pub fn format_hms(&self, precision: usize, unicode: bool) -> String {
        let (h, m, s) = self.to_hms();
        let sign = if self.is_negative() { "-" } else { "" };
        let width = precision + if precision > 0 { 3 } else { 2 };
        if unicode {
            format!("{sign}{}ʰ {:02}ᵐ {:0width$.precision$}ˢ", h.abs(), m, s)
        } else {
            format!("{sign}{}h {:02}m {:0width$.precision$}s", h.abs(), m, s)
        }
    }

    /// Reduces the angle to `[center - 180°, center + 180°)`.
    ///
    /// The default center of 180° gives `[0°, 360°)`; `normalize(0.0)`
    /// gives `[-180°, 180°)`.
    pub fn normalize(&self, center_deg: f64) -> Angle {
        let lower = center_deg - 180.0;
        let mut deg = (self.degrees() - lower) % 360.0;
        if deg < 0.0 {
            deg += 360.0;
        }
        Angle::from_degrees(deg + lower)
    }

    /// Reduces the angle to `[0°, 360°)`.
    pub fn normalized(&self) -> Angle {
        self.normalize(180.0)
    }

    /// The absolute value of the angle.
    pub fn abs(&self) -> Angle {
        Angle { radians: self.radians.abs() }
    }

    pub fn sin(&self) -> f64 {
        self.radians.sin()
    }

    pub fn cos(&self) -> f64 {
        self.radians.cos()
    }

    pub fn tan(&self) -> f64 {
        self.radians.tan()
    }
}

impl PartialEq for Angle {
    /// Approximate equality: 1e-12 relative tolerance on the radian value.
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.radians, other.radians);
        if a == b {
            return true;
        }
        (a - b).abs() <= 1e-12 * a.abs().max(b.abs())
    }
}

impl PartialOrd for Angle {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.radians.partial_cmp(&other.radians)
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, rhs: Angle) -> Angle {
        Angle { radians: self.radians + rhs.radians }
    }
}

impl Sub for Angle {
    type Output = Angle;
    fn sub(self, rhs: Angle) -> Angle {
        Angle { radians: self.radians - rhs.radians }
    }
}

impl Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Angle {
        Angle { radians: -self.radians }
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;
    fn mul(self, rhs: f64) -> Angle {
        Angle { radians: self.radians * rhs }
    }
}

impl Mul<Angle> for f64 {
    type Output = Angle;
    fn mul(self, rhs: Angle) -> Angle {
        rhs * self
    }
}

impl Div<f64> for Angle {
    type Output = Angle;
    fn div(self, rhs: f64) -> Angle {
        Angle { radians: self.radians / rhs }
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_dms(2, true))
    }
}

impl Serialize for Angle {
    /// Angles serialize as decimal degrees.
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.degrees())
    }
}
