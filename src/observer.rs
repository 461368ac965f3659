//! Observer location on Earth.
//!
//! Besides plain decimal degrees, sites can be parsed from the usual
//! geographic notations, with an optional compass letter on either end:
//!
//! ```
//! use starward::observer::Observer;
//!
//! let site = Observer::parse("NYC", "40.7128 N", "74.0060 W").unwrap();
//! assert!((site.latitude.degrees() - 40.7128).abs() < 1e-9);
//! assert!((site.longitude.degrees() + 74.0060).abs() < 1e-9);
//!
//! let site = Observer::parse("Columbia", "39:00:01.7", "-92:18:03.2").unwrap();
//! assert!((site.longitude.degrees() + 92.300_888).abs() < 1e-5);
//! ```

use crate::angle::Angle;
use crate::error::{validate_latitude, AstroError, Result};
use serde::Serialize;
use std::fmt;

/// A named observing site.
///
/// Latitude is signed (+N), longitude is signed (+E). Elevation and timezone
/// are carried for display and profile round-trips; they do not enter the
/// coordinate formulas.
///
/// # Example
/// ```
/// use starward::observer::Observer;
///
/// let greenwich = Observer::from_degrees("Greenwich", 51.4772, -0.0005)
///     .unwrap()
///     .with_elevation(62.0);
/// assert!((greenwich.latitude.degrees() - 51.4772).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Observer {
    pub name: String,
    pub latitude: Angle,
    pub longitude: Angle,
    pub elevation_m: f64,
    pub timezone: Option<String>,
}

impl Observer {
    /// Creates an observer from decimal degrees.
    ///
    /// # Errors
    /// Returns `AstroError::InvalidCoordinate` if latitude is outside
    /// [-90°, 90°]. Longitude is stored as given.
    pub fn from_degrees(name: &str, lat_deg: f64, lon_deg: f64) -> Result<Self> {
        validate_latitude(lat_deg)?;
        Ok(Observer {
            name: name.to_string(),
            latitude: Angle::from_degrees(lat_deg),
            longitude: Angle::from_degrees(lon_deg),
            elevation_m: 0.0,
            timezone: None,
        })
    }

    /// Parses a site from latitude/longitude strings.
    ///
    /// Accepts every notation [`Angle::parse`] understands (decimal degrees,
    /// DMS with letters, unicode, colons or spaces), plus an optional
    /// compass letter before or after the value: `"40.7128 N"`,
    /// `"W 74°00′21.6″"`. A compass letter overrides any numeric sign.
    ///
    /// # Errors
    /// Returns a parse error for unrecognized input or a compass letter on
    /// the wrong axis, and `AstroError::InvalidCoordinate` for an
    /// out-of-range latitude.
    pub fn parse(name: &str, lat_str: &str, lon_str: &str) -> Result<Self> {
        let lat = parse_geographic(lat_str, true)?;
        let lon = parse_geographic(lon_str, false)?;
        Self::from_degrees(name, lat, lon)
    }

    pub fn with_elevation(mut self, elevation_m: f64) -> Self {
        self.elevation_m = elevation_m;
        self
    }

    pub fn with_timezone(mut self, timezone: &str) -> Self {
        self.timezone = Some(timezone.to_string());
        self
    }
}

/// Splits a leading or trailing compass letter off a coordinate string.
fn extract_compass(input: &str) -> (&str, Option<char>) {
    let s = input.trim();
    if let Some(first) = s.chars().next() {
        if matches!(first.to_ascii_uppercase(), 'N' | 'S' | 'E' | 'W') && s.len() > 1 {
            return (&s[1..], Some(first.to_ascii_uppercase()));
        }
    }
    if let Some(last) = s.chars().last() {
        if matches!(last.to_ascii_uppercase(), 'N' | 'S' | 'E' | 'W') {
            return (&s[..s.len() - 1], Some(last.to_ascii_uppercase()));
        }
    }
    (s, None)
}

fn parse_geographic(input: &str, is_latitude: bool) -> Result<f64> {
    let (body, compass) = extract_compass(input);
    let angle = Angle::parse(body.trim())?;

    let degrees = match compass {
        Some('N') | Some('E') => angle.degrees().abs(),
        Some('S') | Some('W') => -angle.degrees().abs(),
        _ => angle.degrees(),
    };

    let axis_ok = match compass {
        Some('N') | Some('S') => is_latitude,
        Some('E') | Some('W') => !is_latitude,
        _ => true,
    };
    if !axis_ok {
        return Err(AstroError::ParseError {
            what: if is_latitude { "latitude" } else { "longitude" },
            input: input.to_string(),
            expected: if is_latitude { "a N/S coordinate" } else { "an E/W coordinate" },
        });
    }

    Ok(degrees)
}

impl fmt::Display for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}, {:.0} m)",
            self.name,
            self.latitude.format_dms(1, true),
            self.longitude.format_dms(1, true),
            self.elevation_m
        )
    }
}
