//! Low-precision lunar ephemeris, phases, and rise/set.
//!
//! Positions use the truncated Meeus series: mean elements as polynomials in
//! Julian centuries, the principal periodic terms in longitude (equation of
//! the centre, evection, variation, the annual term, reduction to the
//! ecliptic) and latitude, and the leading terms of the distance expansion.
//! Accuracy is roughly half a degree in position — enough for phase and
//! rise/set work.
//!
//! Rise and set use the same hour-angle threshold recipe as the Sun, with
//! the threshold sitting below the geometric horizon by the Moon's
//! horizontal parallax less the refraction allowance, iterated because the
//! Moon moves about half a degree per hour.

use crate::angle::Angle;
use crate::constants::{EARTH_RADIUS_KM, SOLAR_TO_SIDEREAL, SYNODIC_MONTH};
use crate::coords::{ecliptic_to_equatorial, IcrsCoord};
use crate::observer::Observer;
use crate::sun::sun_position;
use crate::time::JulianDate;
use serde::Serialize;

/// Mean radius of the Moon in kilometers.
const MOON_RADIUS_KM: f64 = 1_737.4;

/// Refraction allowance at the horizon, degrees.
const HORIZON_REFRACTION: f64 = 0.583;

/// Geocentric lunar position at an instant.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MoonPosition {
    /// Ecliptic longitude of date
    pub longitude: Angle,
    /// Ecliptic latitude (within ±5.3°)
    pub latitude: Angle,
    pub ra: Angle,
    pub dec: Angle,
    /// Geocentric distance in kilometers
    pub distance_km: f64,
    /// Apparent angular diameter
    pub angular_diameter: Angle,
    /// Equatorial horizontal parallax
    pub parallax: Angle,
}

impl MoonPosition {
    pub fn to_icrs(&self) -> IcrsCoord {
        IcrsCoord { ra: self.ra, dec: self.dec }
    }
}

/// The eight conventional phase buckets of the synodic month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoonPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    pub fn name(&self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::FullMoon => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        }
    }

    /// Elongation from the Sun at the centre of this bucket, degrees.
    pub fn elongation_deg(&self) -> f64 {
        match self {
            MoonPhase::NewMoon => 0.0,
            MoonPhase::WaxingCrescent => 45.0,
            MoonPhase::FirstQuarter => 90.0,
            MoonPhase::WaxingGibbous => 135.0,
            MoonPhase::FullMoon => 180.0,
            MoonPhase::WaningGibbous => 225.0,
            MoonPhase::LastQuarter => 270.0,
            MoonPhase::WaningCrescent => 315.0,
        }
    }

    /// Picks the bucket for an elongation in degrees.
    fn from_elongation(elongation_deg: f64) -> Self {
        match elongation_deg {
            e if e < 22.5 => MoonPhase::NewMoon,
            e if e < 67.5 => MoonPhase::WaxingCrescent,
            e if e < 112.5 => MoonPhase::FirstQuarter,
            e if e < 157.5 => MoonPhase::WaxingGibbous,
            e if e < 202.5 => MoonPhase::FullMoon,
            e if e < 247.5 => MoonPhase::WaningGibbous,
            e if e < 292.5 => MoonPhase::LastQuarter,
            e if e < 337.5 => MoonPhase::WaningCrescent,
            _ => MoonPhase::NewMoon,
        }
    }
}

/// Phase information at an instant.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MoonPhaseInfo {
    /// Elongation from the Sun in ecliptic longitude, degrees [0, 360)
    pub phase_angle: f64,
    /// Illuminated fraction of the disk, [0, 1]
    pub illumination: f64,
    pub percent_illuminated: f64,
    /// Age within the synodic month, days
    pub age_days: f64,
    pub phase: MoonPhase,
}

impl MoonPhaseInfo {
    pub fn name(&self) -> &'static str {
        self.phase.name()
    }
}

/// Computes the geocentric lunar position for a Julian Date.
pub fn moon_position(jd: JulianDate) -> MoonPosition {
    let t = jd.t_j2000();

    // Mean elements (Meeus Ch. 47)
    let l_prime = 218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t * t
        + t * t * t / 538_841.0;
    let d = 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t * t + t * t * t / 545_868.0;
    let m = 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t * t + t * t * t / 24_490_000.0;
    let m_prime =
        134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t * t + t * t * t / 69_699.0;
    let f = 93.272_095 + 483_202.017_523_3 * t - 0.003_653_9 * t * t - t * t * t / 3_526_000.0;

    let d_rad = d.to_radians();
    let m_rad = m.to_radians();
    let mp_rad = m_prime.to_radians();
    let f_rad = f.to_radians();

    // Principal periodic terms: equation of the centre, evection, variation,
    // annual term, reduction to the ecliptic
    let longitude = l_prime
        + 6.288_774 * mp_rad.sin()
        + 1.274_027 * (2.0 * d_rad - mp_rad).sin()
        + 0.658_314 * (2.0 * d_rad).sin()
        + 0.213_618 * (2.0 * mp_rad).sin()
        - 0.185_116 * m_rad.sin()
        - 0.114_332 * (2.0 * f_rad).sin();

    let latitude = 5.128_122 * f_rad.sin()
        + 0.280_602 * (mp_rad + f_rad).sin()
        + 0.277_693 * (mp_rad - f_rad).sin()
        + 0.173_237 * (2.0 * d_rad - f_rad).sin()
        + 0.055_413 * (2.0 * d_rad - mp_rad + f_rad).sin();

    let distance_km = 385_000.56 - 20_905.355 * mp_rad.cos()
        - 3_699.111 * (2.0 * d_rad - mp_rad).cos()
        - 2_955.968 * (2.0 * d_rad).cos()
        - 569.925 * (2.0 * mp_rad).cos();

    let longitude = Angle::from_degrees(longitude).normalized();
    let latitude = Angle::from_degrees(latitude);

    let parallax = Angle::from_radians((EARTH_RADIUS_KM / distance_km).asin());
    let angular_diameter = Angle::from_radians(2.0 * (MOON_RADIUS_KM / distance_km).asin());

    let (ra, dec) = ecliptic_to_equatorial(longitude, latitude, jd);

    MoonPosition { longitude, latitude, ra, dec, distance_km, angular_diameter, parallax }
}

/// Elongation of the Moon from the Sun in ecliptic longitude, degrees
/// [0, 360). Zero at new moon, 180° at full moon.
fn elongation_deg(jd: JulianDate) -> f64 {
    let moon_lon = moon_position(jd).longitude;
    let sun_lon = sun_position(jd).longitude;
    (moon_lon - sun_lon).normalized().degrees()
}

/// Computes phase information for a Julian Date.
pub fn moon_phase(jd: JulianDate) -> MoonPhaseInfo {
    let elongation = elongation_deg(jd);

    // Equivalent to (1 + cos(180° − elongation)) / 2
    let illumination = (1.0 - elongation.to_radians().cos()) / 2.0;
    let age_days = elongation / 360.0 * SYNODIC_MONTH;

    MoonPhaseInfo {
        phase_angle: elongation,
        illumination,
        percent_illuminated: illumination * 100.0,
        age_days,
        phase: MoonPhase::from_elongation(elongation),
    }
}

/// Lunar altitude above the horizon for an observer at an instant.
pub fn moon_altitude(observer: &Observer, jd: JulianDate) -> Angle {
    let pos = moon_position(jd);
    pos.to_icrs()
        .to_horizontal(jd, observer.latitude, observer.longitude)
        .alt
}

/// Instant of lunar meridian transit nearest the UTC noon of `jd`'s date.
fn lunar_transit(observer: &Observer, jd: JulianDate) -> JulianDate {
    let mut t = JulianDate::new((jd.value() + 0.5).floor());
    // The Moon's RA moves ~0.55°/h, so refine an extra time
    for _ in 0..3 {
        let pos = moon_position(t);
        let mut dh = pos.ra.hours() - t.lst(observer.longitude.degrees());
        while dh < -12.0 {
            dh += 24.0;
        }
        while dh >= 12.0 {
            dh -= 24.0;
        }
        t = t + dh * SOLAR_TO_SIDEREAL / 24.0;
    }
    t
}

/// Threshold crossing for the Moon; iterated because the Moon's declination
/// and parallax both change noticeably within a day.
fn moon_event(observer: &Observer, jd: JulianDate, rising: bool) -> Option<JulianDate> {
    let transit = lunar_transit(observer, jd);
    let phi = observer.latitude;

    let mut event = transit;
    for _ in 0..3 {
        let pos = moon_position(event);
        // Threshold sits below the geometric horizon: 0° − parallax + refraction
        let h0 = Angle::from_degrees(HORIZON_REFRACTION - pos.parallax.degrees());
        let cos_h = (h0.sin() - phi.sin() * pos.dec.sin()) / (phi.cos() * pos.dec.cos());
        if !(-1.0..=1.0).contains(&cos_h) {
            return None;
        }
        let half_arc_hours = cos_h.acos().to_degrees() / 15.0;
        let offset = half_arc_hours * SOLAR_TO_SIDEREAL / 24.0;
        event = if rising { transit - offset } else { transit + offset };
    }
    Some(event)
}

/// Moonrise on the date of `jd`, or `None` when the Moon does not cross the
/// horizon that day.
pub fn moonrise(observer: &Observer, jd: JulianDate) -> Option<JulianDate> {
    moon_event(observer, jd, true)
}

/// Moonset on the date of `jd`, or `None` when the Moon does not cross the
/// horizon that day.
pub fn moonset(observer: &Observer, jd: JulianDate) -> Option<JulianDate> {
    moon_event(observer, jd, false)
}

/// Finds the next instant after `jd` at which the Moon reaches the given
/// phase (elongation 0°, 90°, 180°, or 270° for the principal phases).
///
/// Converges by fixed-point iteration at the mean synodic rate; the result
/// is strictly after `jd` and within one synodic month.
pub fn next_phase(jd: JulianDate, phase: MoonPhase) -> JulianDate {
    let target = phase.elongation_deg();
    let rate = 360.0 / SYNODIC_MONTH; // mean elongation rate, deg/day

    let mut delta = (target - elongation_deg(jd)).rem_euclid(360.0);
    if delta < 1e-6 {
        delta = 360.0;
    }
    let mut t = jd + delta / rate;

    for _ in 0..6 {
        let mut d = (target - elongation_deg(t)).rem_euclid(360.0);
        if d > 180.0 {
            d -= 360.0;
        }
        t = t + d / rate;
    }
    t
}
