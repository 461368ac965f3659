//! Observability: altitude/azimuth, airmass, transit, rise/set, and
//! Moon separation for arbitrary ICRS targets.

use crate::angle::Angle;
use crate::constants::SOLAR_TO_SIDEREAL;
use crate::coords::IcrsCoord;
use crate::moon::moon_position;
use crate::observer::Observer;
use crate::separation::angular_separation;
use crate::sun::solar_altitude;
use crate::time::JulianDate;
use serde::Serialize;

/// Airmass below this apparent altitude (degrees) is treated as undefined.
const AIRMASS_MIN_ALTITUDE: f64 = 0.1;

/// Relative atmospheric path length along the line of sight, by the
/// Pickering (2002) interpolative formula:
///
/// ```text
/// X = 1 / sin(h + 244 / (165 + 47 h^1.1))      (h = altitude in degrees)
/// ```
///
/// Defined only above 0.1°; at or below that the result is
/// `f64::INFINITY`, the "no meaningful airmass" sentinel.
///
/// # Example
/// ```
/// use starward::angle::Angle;
/// use starward::visibility::airmass;
///
/// assert!((airmass(Angle::from_degrees(90.0)) - 1.0).abs() < 0.01);
/// assert!((airmass(Angle::from_degrees(45.0)) - 1.41).abs() < 0.02);
/// assert!(airmass(Angle::from_degrees(-5.0)).is_infinite());
/// ```
pub fn airmass(alt: Angle) -> f64 {
    let h = alt.degrees();
    if h <= AIRMASS_MIN_ALTITUDE {
        return f64::INFINITY;
    }
    1.0 / (h + 244.0 / (165.0 + 47.0 * h.powf(1.1))).to_radians().sin()
}

/// Altitude of a target above an observer's horizon at an instant.
pub fn target_altitude(target: &IcrsCoord, observer: &Observer, jd: JulianDate) -> Angle {
    target
        .to_horizontal(jd, observer.latitude, observer.longitude)
        .alt
}

/// Azimuth of a target (North through East) at an instant.
pub fn target_azimuth(target: &IcrsCoord, observer: &Observer, jd: JulianDate) -> Angle {
    target
        .to_horizontal(jd, observer.latitude, observer.longitude)
        .az
}

/// Instant of meridian transit nearest `jd`: the correction
/// `(α − LST) / 15` hours, reduced to ±12 h and rescaled from sidereal to
/// solar time, applied once.
pub fn transit_time(target: &IcrsCoord, observer: &Observer, jd: JulianDate) -> JulianDate {
    let mut dh = target.ra.hours() - jd.lst(observer.longitude.degrees());
    while dh < -12.0 {
        dh += 24.0;
    }
    while dh >= 12.0 {
        dh -= 24.0;
    }
    jd + dh * SOLAR_TO_SIDEREAL / 24.0
}

/// Altitude at meridian transit: `90° − |φ − δ|`, capped at +90°.
///
/// Negative means the target never rises for that observer.
pub fn transit_altitude(target: &IcrsCoord, observer: &Observer) -> Angle {
    let alt = 90.0 - (observer.latitude.degrees() - target.dec.degrees()).abs();
    Angle::from_degrees(alt.min(90.0))
}

/// Rise and set instants around the transit nearest `jd`, for a horizon
/// altitude in degrees (0 for the geometric horizon).
///
/// `(None, None)` means the target either never rises or never sets that
/// day; disambiguate by comparing [`transit_altitude`] against the horizon.
pub fn target_rise_set(
    target: &IcrsCoord,
    observer: &Observer,
    jd: JulianDate,
    horizon_deg: f64,
) -> (Option<JulianDate>, Option<JulianDate>) {
    let transit = transit_time(target, observer, jd);
    let h0 = Angle::from_degrees(horizon_deg);
    let phi = observer.latitude;
    let dec = target.dec;

    let cos_h = (h0.sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos());
    if !(-1.0..=1.0).contains(&cos_h) {
        return (None, None);
    }

    let half_arc_hours = cos_h.acos().to_degrees() / 15.0;
    let offset = half_arc_hours * SOLAR_TO_SIDEREAL / 24.0;
    (Some(transit - offset), Some(transit + offset))
}

/// Angular separation between the Moon and a target at an instant.
pub fn moon_target_separation(target: &IcrsCoord, jd: JulianDate) -> Angle {
    angular_separation(&moon_position(jd).to_icrs(), target)
}

/// True when the Sun is below the geometric horizon.
pub fn is_night(observer: &Observer, jd: JulianDate) -> bool {
    solar_altitude(observer, jd).degrees() < 0.0
}

/// Aggregate observability report for a target.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Visibility {
    pub altitude: Angle,
    pub azimuth: Angle,
    /// `f64::INFINITY` (JSON null) when the target is below 0.1°
    pub airmass: f64,
    pub transit: JulianDate,
    pub transit_altitude: Angle,
    pub rise: Option<JulianDate>,
    pub set: Option<JulianDate>,
    pub moon_separation: Angle,
    pub is_night: bool,
}

/// Computes the full observability picture for a target at an instant.
pub fn compute_visibility(target: &IcrsCoord, observer: &Observer, jd: JulianDate) -> Visibility {
    let horizontal = target.to_horizontal(jd, observer.latitude, observer.longitude);
    let (rise, set) = target_rise_set(target, observer, jd, 0.0);

    Visibility {
        altitude: horizontal.alt,
        azimuth: horizontal.az,
        airmass: airmass(horizontal.alt),
        transit: transit_time(target, observer, jd),
        transit_altitude: transit_altitude(target, observer),
        rise,
        set,
        moon_separation: moon_target_separation(target, jd),
        is_night: is_night(observer, jd),
    }
}
