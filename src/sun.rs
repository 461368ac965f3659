//! Low-precision solar ephemeris, rise/set, twilight, and day length.
//!
//! Positions come from the standard low-precision formulas (mean longitude,
//! mean anomaly, and equation of centre as linear/trig functions of days
//! since J2000), good to roughly a hundredth of a degree in ecliptic
//! longitude — ample for rise/set work. The ecliptic latitude of the Sun is
//! zero within this approximation.
//!
//! Rise, set, and the twilights are hour-angle threshold crossings:
//!
//! ```text
//! cos H₀ = (sin h₀ − sin φ sin δ) / (cos φ cos δ)
//! ```
//!
//! When the right-hand side leaves [-1, 1] the event does not occur on that
//! date (polar day or polar night) and the result is `None`.
//!
//! Rise/set use h₀ = −0.833°, folding the conventional 34′ of refraction and
//! the 16′ solar semidiameter into the threshold.

use crate::angle::Angle;
use crate::constants::SOLAR_TO_SIDEREAL;
use crate::coords::{ecliptic_to_equatorial, IcrsCoord};
use crate::observer::Observer;
use crate::recorder::{note, Recorder};
use crate::time::JulianDate;
use serde::Serialize;

/// Altitude threshold for sunrise/sunset: refraction plus semidiameter.
pub const SUN_RISE_SET_ALTITUDE: f64 = -0.833;

/// Solar altitude at the end of civil twilight.
pub const CIVIL_TWILIGHT_ALTITUDE: f64 = -6.0;

/// Solar altitude at the end of nautical twilight.
pub const NAUTICAL_TWILIGHT_ALTITUDE: f64 = -12.0;

/// Solar altitude at the end of astronomical twilight.
pub const ASTRONOMICAL_TWILIGHT_ALTITUDE: f64 = -18.0;

/// Apparent geocentric solar position at an instant.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SunPosition {
    /// Ecliptic longitude of date
    pub longitude: Angle,
    /// Ecliptic latitude (zero in this approximation)
    pub latitude: Angle,
    pub ra: Angle,
    pub dec: Angle,
    /// Earth-Sun distance in AU
    pub distance_au: f64,
    /// Equation of time in minutes (apparent minus mean solar time)
    pub equation_of_time_min: f64,
}

impl SunPosition {
    pub fn to_icrs(&self) -> IcrsCoord {
        IcrsCoord { ra: self.ra, dec: self.dec }
    }
}

/// Computes the apparent solar position for a Julian Date.
pub fn sun_position(jd: JulianDate) -> SunPosition {
    sun_position_recorded(jd, None)
}

/// [`sun_position`] reporting intermediate values to a recorder.
pub fn sun_position_recorded(jd: JulianDate, mut recorder: Option<&mut Recorder>) -> SunPosition {
    let n = jd.days_since_j2000();

    let mean_longitude = Angle::from_degrees(280.460 + 0.985_647_4 * n).normalized();
    let mean_anomaly = Angle::from_degrees(357.528 + 0.985_600_3 * n).normalized();
    let g = mean_anomaly.radians();

    note(
        &mut recorder,
        "Mean elements",
        format!(
            "n = JD − 2451545.0 = {n:.6} days\n\
             L = 280.460° + 0.9856474°·n = {:.6}°\n\
             g = 357.528° + 0.9856003°·n = {:.6}°",
            mean_longitude.degrees(),
            mean_anomaly.degrees()
        ),
    );

    // Equation of centre, then the radius vector from the same anomaly
    let centre = 1.915 * g.sin() + 0.020 * (2.0 * g).sin();
    let longitude = Angle::from_degrees(mean_longitude.degrees() + centre).normalized();
    let latitude = Angle::from_degrees(0.0);
    let distance_au = 1.000_14 - 0.016_71 * g.cos() - 0.000_14 * (2.0 * g).cos();

    note(
        &mut recorder,
        "Ecliptic longitude",
        format!("C = 1.915° sin g + 0.020° sin 2g = {centre:.6}°\nλ = L + C = {:.6}°", longitude.degrees()),
    );

    let (ra, dec) = ecliptic_to_equatorial(longitude, latitude, jd);

    // Apparent RA against mean solar time, reduced to (-180°, 180°]
    let mut eot_deg = mean_longitude.degrees() - ra.degrees();
    while eot_deg <= -180.0 {
        eot_deg += 360.0;
    }
    while eot_deg > 180.0 {
        eot_deg -= 360.0;
    }
    let equation_of_time_min = 4.0 * eot_deg;

    note(
        &mut recorder,
        "Equatorial position",
        format!(
            "RA = {}\nDec = {}\nR = {distance_au:.6} AU\nEoT = {equation_of_time_min:.3} min",
            ra.format_hms(2, true),
            dec.format_dms(2, true)
        ),
    );

    SunPosition { longitude, latitude, ra, dec, distance_au, equation_of_time_min }
}

/// Solar altitude above the horizon for an observer at an instant.
pub fn solar_altitude(observer: &Observer, jd: JulianDate) -> Angle {
    let pos = sun_position(jd);
    pos.to_icrs()
        .to_horizontal(jd, observer.latitude, observer.longitude)
        .alt
}

/// Instant of local solar meridian transit nearest the UTC noon of `jd`'s
/// date.
pub fn solar_noon(observer: &Observer, jd: JulianDate) -> JulianDate {
    // Seed at UTC noon of the civil date containing jd, then apply the
    // LST = α correction twice (the Sun moves ~1°/day).
    let mut t = JulianDate::new((jd.value() + 0.5).floor());
    for _ in 0..2 {
        let pos = sun_position(t);
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

/// Hour-angle threshold crossing for the Sun. `rising` selects the morning
/// branch. `None` when the Sun never crosses `h0_deg` on that date.
fn sun_event(observer: &Observer, jd: JulianDate, h0_deg: f64, rising: bool) -> Option<JulianDate> {
    let noon = solar_noon(observer, jd);
    let h0 = Angle::from_degrees(h0_deg);
    let phi = observer.latitude;

    let mut event = noon;
    for _ in 0..2 {
        let dec = sun_position(event).dec;
        let cos_h = (h0.sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos());
        if !(-1.0..=1.0).contains(&cos_h) {
            return None;
        }
        let half_arc_hours = cos_h.acos().to_degrees() / 15.0;
        let offset = half_arc_hours * SOLAR_TO_SIDEREAL / 24.0;
        event = if rising { noon - offset } else { noon + offset };
    }
    Some(event)
}

/// Sunrise on the date of `jd`, or `None` during polar day/night.
pub fn sunrise(observer: &Observer, jd: JulianDate) -> Option<JulianDate> {
    sun_event(observer, jd, SUN_RISE_SET_ALTITUDE, true)
}

/// Sunset on the date of `jd`, or `None` during polar day/night.
pub fn sunset(observer: &Observer, jd: JulianDate) -> Option<JulianDate> {
    sun_event(observer, jd, SUN_RISE_SET_ALTITUDE, false)
}

/// Morning and evening civil twilight (Sun at −6°).
pub fn civil_twilight(
    observer: &Observer,
    jd: JulianDate,
) -> (Option<JulianDate>, Option<JulianDate>) {
    twilight(observer, jd, CIVIL_TWILIGHT_ALTITUDE)
}

/// Morning and evening nautical twilight (Sun at −12°).
pub fn nautical_twilight(
    observer: &Observer,
    jd: JulianDate,
) -> (Option<JulianDate>, Option<JulianDate>) {
    twilight(observer, jd, NAUTICAL_TWILIGHT_ALTITUDE)
}

/// Morning and evening astronomical twilight (Sun at −18°).
pub fn astronomical_twilight(
    observer: &Observer,
    jd: JulianDate,
) -> (Option<JulianDate>, Option<JulianDate>) {
    twilight(observer, jd, ASTRONOMICAL_TWILIGHT_ALTITUDE)
}

fn twilight(
    observer: &Observer,
    jd: JulianDate,
    h0_deg: f64,
) -> (Option<JulianDate>, Option<JulianDate>) {
    (
        sun_event(observer, jd, h0_deg, true),
        sun_event(observer, jd, h0_deg, false),
    )
}

/// Length of daylight in hours for the date of `jd`.
///
/// 24 during polar day, 0 during polar night.
pub fn day_length(observer: &Observer, jd: JulianDate) -> f64 {
    match (sunrise(observer, jd), sunset(observer, jd)) {
        (Some(rise), Some(set)) => (set - rise) * 24.0,
        _ => {
            let noon_alt = solar_altitude(observer, solar_noon(observer, jd));
            if noon_alt.degrees() > SUN_RISE_SET_ALTITUDE {
                24.0
            } else {
                0.0
            }
        }
    }
}
