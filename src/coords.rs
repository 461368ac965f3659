//! Celestial coordinate frames and transformations.
//!
//! Three frames are supported, every conversion composing through ICRS:
//!
//! - **ICRS** (J2000 equatorial): RA in [0°, 360°), Dec in [-90°, +90°]
//! - **Galactic**: longitude l from the Galactic centre, latitude b from the
//!   Galactic plane
//! - **Horizontal** (topocentric Alt/Az): altitude from the horizon, azimuth
//!   measured from North through East
//!
//! Galactic conversions use the fixed J2000.0 IAU constants and the standard
//! spherical-triangle relations; ICRS → horizontal goes through the local
//! hour angle. The horizontal → ICRS direction is deliberately not offered
//! at this layer because it needs the same time-and-place arguments the
//! forward direction consumed.
//!
//! At the poles the longitude-like coordinate is indeterminate; whenever the
//! relevant cosine falls below 1e-10 it is defined to be 0. This is a
//! documented choice, not an accident.

use crate::angle::Angle;
use crate::error::{validate_dec, validate_ra, AstroError, Result};
use crate::recorder::{note, Recorder};
use crate::time::JulianDate;
use serde::Serialize;
use std::fmt;

/// North Galactic Pole RA, J2000.0 degrees.
pub const NGP_RA: f64 = 192.859_481_3;
/// North Galactic Pole Dec, J2000.0 degrees.
pub const NGP_DEC: f64 = 27.128_251_1;
/// Galactic longitude of the North Celestial Pole, degrees.
pub const L_NCP: f64 = 122.931_918_5;

/// Cosine threshold below which a pole's longitude is taken as 0.
const POLE_EPS: f64 = 1e-10;

/// International Celestial Reference System coordinates (J2000 equatorial).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IcrsCoord {
    pub ra: Angle,
    pub dec: Angle,
}

impl IcrsCoord {
    /// Creates ICRS coordinates; RA is normalized to [0°, 360°).
    ///
    /// # Errors
    /// Returns `AstroError::InvalidCoordinate` if |dec| > 90°.
    pub fn new(ra: Angle, dec: Angle) -> Result<Self> {
        validate_dec(dec.degrees())?;
        Ok(IcrsCoord { ra: ra.normalized(), dec })
    }

    /// Creates from decimal degrees.
    pub fn from_degrees(ra_deg: f64, dec_deg: f64) -> Result<Self> {
        validate_ra(ra_deg)?;
        Self::new(Angle::from_degrees(ra_deg), Angle::from_degrees(dec_deg))
    }

    /// Creates from HMS right ascension and DMS declination components.
    pub fn from_hms_dms(
        ra_h: f64,
        ra_m: f64,
        ra_s: f64,
        dec_d: f64,
        dec_m: f64,
        dec_s: f64,
    ) -> Result<Self> {
        Self::new(Angle::from_hms(ra_h, ra_m, ra_s), Angle::from_dms(dec_d, dec_m, dec_s))
    }

    /// Parses a coordinate pair from a string.
    ///
    /// Supported formats:
    /// - `"12h30m00s +45d30m00s"`
    /// - `"12:30:00 +45:30:00"` (colon-form RA is read as hours)
    /// - `"187.5 45.5"` (decimal degrees)
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        let parts: Vec<&str> = value.split_whitespace().collect();

        let (ra_str, dec_str) = if parts.len() == 2 {
            (parts[0], parts[1])
        } else {
            return Err(AstroError::ParseError {
                what: "coordinate",
                input: value.to_string(),
                expected: "\"<ra> <dec>\", e.g. \"12h30m00s +45d30m00s\" or \"187.5 45.5\"",
            });
        };

        let ra = if ra_str.contains(['h', 'H']) {
            Angle::parse(ra_str)?
        } else if ra_str.contains(':') {
            // Colon-separated RA is hours by convention
            let fields: Vec<&str> = ra_str.split(':').collect();
            if fields.len() != 3 {
                return Err(AstroError::ParseError {
                    what: "right ascension",
                    input: ra_str.to_string(),
                    expected: "HH:MM:SS",
                });
            }
            let parse = |s: &str| {
                s.parse::<f64>().map_err(|_| AstroError::ParseError {
                    what: "right ascension",
                    input: ra_str.to_string(),
                    expected: "HH:MM:SS",
                })
            };
            Angle::from_hms(parse(fields[0])?, parse(fields[1])?, parse(fields[2])?)
        } else {
            Angle::parse(ra_str)?
        };

        let dec = Angle::parse(dec_str)?;
        Self::new(ra, dec)
    }

    /// Converts to Galactic coordinates.
    pub fn to_galactic(&self) -> GalacticCoord {
        GalacticCoord::from_icrs_recorded(self, None)
    }

    /// Converts to horizontal coordinates for the given time and place.
    pub fn to_horizontal(&self, jd: JulianDate, lat: Angle, lon: Angle) -> HorizontalCoord {
        HorizontalCoord::from_icrs_recorded(self, jd, lat, lon, None)
    }

    pub fn format(&self, precision: usize) -> String {
        format!("{} {}", self.ra.format_hms(precision, true), self.dec.format_dms(precision, true))
    }
}

impl fmt::Display for IcrsCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(2))
    }
}

/// Galactic coordinates: l toward the Galactic centre, b from the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GalacticCoord {
    pub l: Angle,
    pub b: Angle,
}

impl GalacticCoord {
    /// Creates Galactic coordinates; l is normalized to [0°, 360°).
    ///
    /// # Errors
    /// Returns `AstroError::InvalidCoordinate` if |b| > 90°.
    pub fn new(l: Angle, b: Angle) -> Result<Self> {
        if b.degrees().abs() > 90.0 {
            return Err(AstroError::InvalidCoordinate {
                coord_type: "Galactic latitude",
                value: b.degrees(),
                valid_range: "[-90, 90]",
            });
        }
        Ok(GalacticCoord { l: l.normalized(), b })
    }

    /// Creates from decimal degrees.
    pub fn from_degrees(l_deg: f64, b_deg: f64) -> Result<Self> {
        Self::new(Angle::from_degrees(l_deg), Angle::from_degrees(b_deg))
    }

    /// Converts to ICRS coordinates.
    pub fn to_icrs(&self) -> IcrsCoord {
        self.to_icrs_recorded(None)
    }

    /// [`to_icrs`](Self::to_icrs) reporting intermediate values.
    pub fn to_icrs_recorded(&self, mut recorder: Option<&mut Recorder>) -> IcrsCoord {
        let ra_ngp = NGP_RA.to_radians();
        let dec_ngp = NGP_DEC.to_radians();
        let l_ncp = L_NCP.to_radians();

        note(
            &mut recorder,
            "Reference frame parameters",
            format!("NGP RA = {NGP_RA:.6}°\nNGP Dec = {NGP_DEC:.6}°\nl(NCP) = {L_NCP:.6}°"),
        );

        let (sin_b, cos_b) = self.b.radians().sin_cos();
        let (sin_dec_ngp, cos_dec_ngp) = dec_ngp.sin_cos();
        let (sin_dl, cos_dl) = (self.l.radians() - l_ncp).sin_cos();

        let sin_dec = sin_b * sin_dec_ngp + cos_b * cos_dec_ngp * cos_dl;
        let dec = sin_dec.clamp(-1.0, 1.0).asin();
        let cos_dec = dec.cos();

        note(
            &mut recorder,
            "Declination",
            format!("sin(δ) = sin(b)sin(δ_NGP) + cos(b)cos(δ_NGP)cos(l−l_NCP) = {sin_dec:.10}\nδ = {:.6}°", dec.to_degrees()),
        );

        // RA is indeterminate at the celestial poles
        let ra = if cos_dec.abs() < POLE_EPS {
            0.0
        } else {
            let y = -cos_b * sin_dl;
            let x = sin_b * cos_dec_ngp - cos_b * sin_dec_ngp * cos_dl;
            ra_ngp + y.atan2(x)
        };

        let result = IcrsCoord {
            ra: Angle::from_radians(ra).normalized(),
            dec: Angle::from_radians(dec),
        };

        note(
            &mut recorder,
            "Result (ICRS)",
            format!("RA = {}\nDec = {}", result.ra.format_hms(2, true), result.dec.format_dms(2, true)),
        );

        result
    }

    /// Converts from ICRS via the standard spherical-triangle relations.
    pub fn from_icrs(coord: &IcrsCoord) -> Self {
        Self::from_icrs_recorded(coord, None)
    }

    /// [`from_icrs`](Self::from_icrs) reporting intermediate values.
    pub fn from_icrs_recorded(coord: &IcrsCoord, mut recorder: Option<&mut Recorder>) -> Self {
        let ra_ngp = NGP_RA.to_radians();
        let dec_ngp = NGP_DEC.to_radians();
        let l_ncp = L_NCP.to_radians();

        note(
            &mut recorder,
            "Input ICRS coordinates",
            format!("RA = {}\nDec = {}", coord.ra.format_hms(2, true), coord.dec.format_dms(2, true)),
        );

        let (sin_dec, cos_dec) = coord.dec.radians().sin_cos();
        let (sin_dec_ngp, cos_dec_ngp) = dec_ngp.sin_cos();
        let (sin_da, cos_da) = (coord.ra.radians() - ra_ngp).sin_cos();

        let sin_b = sin_dec * sin_dec_ngp + cos_dec * cos_dec_ngp * cos_da;
        let b = sin_b.clamp(-1.0, 1.0).asin();
        let cos_b = b.cos();

        note(
            &mut recorder,
            "Galactic latitude",
            format!("sin(b) = sin(δ)sin(δ_NGP) + cos(δ)cos(δ_NGP)cos(α−α_NGP) = {sin_b:.10}\nb = {:.6}°", b.to_degrees()),
        );

        // l is indeterminate at the galactic poles
        let l = if cos_b.abs() < POLE_EPS {
            0.0
        } else {
            let y = cos_dec * sin_da;
            let x = sin_dec * cos_dec_ngp - cos_dec * sin_dec_ngp * cos_da;
            l_ncp - y.atan2(x)
        };

        let result = GalacticCoord {
            l: Angle::from_radians(l).normalized(),
            b: Angle::from_radians(b),
        };

        note(
            &mut recorder,
            "Result (Galactic)",
            format!("l = {:.6}°\nb = {:.6}°", result.l.degrees(), result.b.degrees()),
        );

        result
    }

    pub fn format(&self, precision: usize) -> String {
        format!("l={:.precision$}° b={:.precision$}°", self.l.degrees(), self.b.degrees())
    }
}

impl fmt::Display for GalacticCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(4))
    }
}

/// Horizontal (Alt/Az) coordinates, local to an observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HorizontalCoord {
    pub alt: Angle,
    pub az: Angle,
}

impl HorizontalCoord {
    /// Creates horizontal coordinates; azimuth is normalized to [0°, 360°).
    ///
    /// # Errors
    /// Returns `AstroError::InvalidCoordinate` if |alt| > 90°.
    pub fn new(alt: Angle, az: Angle) -> Result<Self> {
        if alt.degrees().abs() > 90.0 {
            return Err(AstroError::InvalidCoordinate {
                coord_type: "Altitude",
                value: alt.degrees(),
                valid_range: "[-90, 90]",
            });
        }
        Ok(HorizontalCoord { alt, az: az.normalized() })
    }

    /// Creates from decimal degrees.
    pub fn from_degrees(alt_deg: f64, az_deg: f64) -> Result<Self> {
        Self::new(Angle::from_degrees(alt_deg), Angle::from_degrees(az_deg))
    }

    /// Converts from ICRS for an observing time and place.
    ///
    /// Azimuth is measured from North through East.
    pub fn from_icrs(coord: &IcrsCoord, jd: JulianDate, lat: Angle, lon: Angle) -> Self {
        Self::from_icrs_recorded(coord, jd, lat, lon, None)
    }

    /// [`from_icrs`](Self::from_icrs) reporting intermediate values.
    pub fn from_icrs_recorded(
        coord: &IcrsCoord,
        jd: JulianDate,
        lat: Angle,
        lon: Angle,
        mut recorder: Option<&mut Recorder>,
    ) -> Self {
        let lst = jd.lst(lon.degrees());
        // Hour angle lives in (-180°, 180°]: the general normalizer is
        // half-open on the wrong end for this one range
        let ha = (Angle::from_hours(lst) - coord.ra).normalize(0.0);
        let ha = if ha.degrees() <= -180.0 { ha + Angle::from_degrees(360.0) } else { ha };

        note(
            &mut recorder,
            "Hour angle",
            format!(
                "LST = {lst:.10} h\nHA = LST − RA = {}",
                ha.format_hms(2, true)
            ),
        );

        let (sin_dec, cos_dec) = (coord.dec.sin(), coord.dec.cos());
        let (sin_lat, cos_lat) = (lat.sin(), lat.cos());
        let (sin_ha, cos_ha) = (ha.sin(), ha.cos());

        let sin_alt = sin_dec * sin_lat + cos_dec * cos_lat * cos_ha;
        let alt = sin_alt.clamp(-1.0, 1.0).asin();

        note(
            &mut recorder,
            "Altitude",
            format!("sin(alt) = sin(δ)sin(φ) + cos(δ)cos(φ)cos(H) = {sin_alt:.10}\nalt = {:.6}°", alt.to_degrees()),
        );

        let y = -cos_dec * sin_ha;
        let x = sin_dec * cos_lat - cos_dec * sin_lat * cos_ha;
        let az = y.atan2(x);

        note(
            &mut recorder,
            "Azimuth",
            format!("az = atan2(−cos(δ)sin(H), sin(δ)cos(φ) − cos(δ)sin(φ)cos(H)) = {:.6}°", az.to_degrees()),
        );

        HorizontalCoord {
            alt: Angle::from_radians(alt),
            az: Angle::from_radians(az).normalized(),
        }
    }

    /// Zenith angle (90° − altitude).
    pub fn zenith_angle(&self) -> Angle {
        Angle::from_degrees(90.0) - self.alt
    }

    pub fn format(&self, precision: usize) -> String {
        format!(
            "Alt={} Az={:.precision$}°",
            self.alt.format_dms(precision, true),
            self.az.degrees()
        )
    }
}

impl fmt::Display for HorizontalCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(2))
    }
}

/// Mean obliquity of the ecliptic at the given date.
pub fn obliquity_of_date(jd: JulianDate) -> Angle {
    let t = jd.t_j2000();
    Angle::from_degrees(23.439_291 - 0.013_004_2 * t)
}

/// Rotates ecliptic (longitude, latitude) of date into equatorial (RA, Dec).
///
/// RA comes back normalized to [0°, 360°).
pub fn ecliptic_to_equatorial(lon: Angle, lat: Angle, jd: JulianDate) -> (Angle, Angle) {
    let eps = obliquity_of_date(jd);
    let (sin_eps, cos_eps) = (eps.sin(), eps.cos());

    let x = lon.cos() * lat.cos();
    let y_ecl = lon.sin() * lat.cos();
    let z_ecl = lat.sin();

    let y = y_ecl * cos_eps - z_ecl * sin_eps;
    let z = y_ecl * sin_eps + z_ecl * cos_eps;

    let ra = Angle::from_radians(y.atan2(x)).normalized();
    let dec = Angle::from_radians(z.clamp(-1.0, 1.0).asin());
    (ra, dec)
}

/// A coordinate in any supported frame. The set is closed by design.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "frame", rename_all = "lowercase")]
pub enum Frame {
    Icrs(IcrsCoord),
    Galactic(GalacticCoord),
    Horizontal(HorizontalCoord),
}

impl Frame {
    pub fn name(&self) -> &'static str {
        match self {
            Frame::Icrs(_) => "icrs",
            Frame::Galactic(_) => "galactic",
            Frame::Horizontal(_) => "horizontal",
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frame::Icrs(c) => write!(f, "{c}"),
            Frame::Galactic(c) => write!(f, "{c}"),
            Frame::Horizontal(c) => write!(f, "{c}"),
        }
    }
}

/// Observer-time-place parameters threaded to horizontal conversions.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformParams {
    pub jd: Option<JulianDate>,
    pub lat: Option<Angle>,
    pub lon: Option<Angle>,
}

/// Transforms a coordinate to the named target frame.
///
/// Frame aliases are case-insensitive: `icrs | j2000 | equatorial`,
/// `galactic | gal`, `horizontal | altaz | alt-az`.
///
/// # Errors
/// - `AstroError::UnknownFrame` for an unrecognized target name
/// - `AstroError::MissingParameter` when the target is horizontal and any of
///   `jd`, `lat`, `lon` is absent, or when the input itself is horizontal
///   (the reverse transform is unsupported at this layer)
pub fn transform(coord: &Frame, target: &str, params: &TransformParams) -> Result<Frame> {
    let target_frame = match target.trim().to_lowercase().as_str() {
        "icrs" | "j2000" | "equatorial" => "icrs",
        "galactic" | "gal" => "galactic",
        "horizontal" | "altaz" | "alt-az" => "horizontal",
        _ => {
            return Err(AstroError::UnknownFrame { name: target.to_string() });
        }
    };

    let icrs = match coord {
        Frame::Icrs(c) => *c,
        Frame::Galactic(g) => g.to_icrs(),
        Frame::Horizontal(_) => {
            return Err(AstroError::MissingParameter {
                operation: "a transform from horizontal coordinates",
                parameter: "an invertible source frame (use the forward direction)",
            });
        }
    };

    match target_frame {
        "icrs" => Ok(Frame::Icrs(icrs)),
        "galactic" => Ok(Frame::Galactic(GalacticCoord::from_icrs(&icrs))),
        _ => {
            let (jd, lat, lon) = match (params.jd, params.lat, params.lon) {
                (Some(jd), Some(lat), Some(lon)) => (jd, lat, lon),
                _ => {
                    return Err(AstroError::MissingParameter {
                        operation: "horizontal conversion",
                        parameter: "jd, lat, lon",
                    });
                }
            };
            Ok(Frame::Horizontal(icrs.to_horizontal(jd, lat, lon)))
        }
    }
}
