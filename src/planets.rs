//! Keplerian positions, magnitudes, and phases for the seven classical
//! planets.
//!
//! Each planet carries J2000 mean orbital elements and centennial rates from
//! the standard approximate-elements table (valid 1800–2050, degrading
//! gracefully outside). Given a Julian Date we form the elements of date,
//! solve Kepler's equation by Newton-Raphson, rotate the orbital-plane
//! position into the J2000 ecliptic, and subtract Earth's heliocentric
//! position (computed by the same machinery) to get the geocentric apparent
//! place.
//!
//! Magnitudes use the V(1,0) + phase-term polynomials; Saturn's ring
//! contribution is deliberately omitted, so Saturn runs a little faint when
//! the rings are open.

use crate::angle::Angle;
use crate::constants::{AU_KM, OBLIQUITY_J2000};
use crate::coords::IcrsCoord;
use crate::error::{AstroError, Result};
use crate::observer::Observer;
use crate::time::JulianDate;
use crate::visibility::{target_rise_set, transit_time};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Kepler solver tolerance in radians.
const KEPLER_TOLERANCE: f64 = 1e-10;

/// Kepler solver iteration cap; overruns are defects, not expected outcomes.
const KEPLER_MAX_ITERATIONS: u32 = 30;

/// Rise/set altitude threshold for planets: 34 arcminutes of refraction.
const PLANET_RISE_SET_ALTITUDE: f64 = -0.5667;

/// The seven classical planets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Planet {
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl Planet {
    /// All planets in heliocentric order.
    pub const ALL: [Planet; 7] = [
        Planet::Mercury,
        Planet::Venus,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Planet::Mercury => "Mercury",
            Planet::Venus => "Venus",
            Planet::Mars => "Mars",
            Planet::Jupiter => "Jupiter",
            Planet::Saturn => "Saturn",
            Planet::Uranus => "Uranus",
            Planet::Neptune => "Neptune",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Planet::Mercury => "☿",
            Planet::Venus => "♀",
            Planet::Mars => "♂",
            Planet::Jupiter => "♃",
            Planet::Saturn => "♄",
            Planet::Uranus => "♅",
            Planet::Neptune => "♆",
        }
    }

    /// Equatorial radius in kilometers.
    pub fn radius_km(&self) -> f64 {
        match self {
            Planet::Mercury => 2_439.7,
            Planet::Venus => 6_051.8,
            Planet::Mars => 3_389.5,
            Planet::Jupiter => 69_911.0,
            Planet::Saturn => 58_232.0,
            Planet::Uranus => 25_362.0,
            Planet::Neptune => 24_622.0,
        }
    }

    fn elements(&self) -> &'static Elements {
        match self {
            Planet::Mercury => &MERCURY,
            Planet::Venus => &VENUS,
            Planet::Mars => &MARS,
            Planet::Jupiter => &JUPITER,
            Planet::Saturn => &SATURN,
            Planet::Uranus => &URANUS,
            Planet::Neptune => &NEPTUNE,
        }
    }
}

impl FromStr for Planet {
    type Err = AstroError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mercury" => Ok(Planet::Mercury),
            "venus" => Ok(Planet::Venus),
            "mars" => Ok(Planet::Mars),
            "jupiter" => Ok(Planet::Jupiter),
            "saturn" => Ok(Planet::Saturn),
            "uranus" => Ok(Planet::Uranus),
            "neptune" => Ok(Planet::Neptune),
            _ => Err(AstroError::ParseError {
                what: "planet",
                input: s.to_string(),
                expected: "mercury | venus | mars | jupiter | saturn | uranus | neptune",
            }),
        }
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// J2000 mean orbital elements and centennial rates: semi-major axis (AU),
/// eccentricity, inclination, mean longitude, longitude of perihelion,
/// longitude of ascending node (degrees).
struct Elements {
    a: f64,
    a_dot: f64,
    e: f64,
    e_dot: f64,
    i: f64,
    i_dot: f64,
    l: f64,
    l_dot: f64,
    long_peri: f64,
    long_peri_dot: f64,
    long_node: f64,
    long_node_dot: f64,
}

static MERCURY: Elements = Elements {
    a: 0.387_099_27,
    a_dot: 0.000_000_37,
    e: 0.205_635_93,
    e_dot: 0.000_019_06,
    i: 7.004_979_02,
    i_dot: -0.005_947_49,
    l: 252.250_323_50,
    l_dot: 149_472.674_111_75,
    long_peri: 77.457_796_28,
    long_peri_dot: 0.160_476_89,
    long_node: 48.330_765_93,
    long_node_dot: -0.125_340_81,
};

static VENUS: Elements = Elements {
    a: 0.723_335_66,
    a_dot: 0.000_003_90,
    e: 0.006_776_72,
    e_dot: -0.000_041_07,
    i: 3.394_676_05,
    i_dot: -0.000_788_90,
    l: 181.979_099_50,
    l_dot: 58_517.815_387_29,
    long_peri: 131.602_467_18,
    long_peri_dot: 0.002_683_29,
    long_node: 76.679_842_55,
    long_node_dot: -0.277_694_18,
};

static EARTH: Elements = Elements {
    a: 1.000_002_61,
    a_dot: 0.000_005_62,
    e: 0.016_711_23,
    e_dot: -0.000_043_92,
    i: -0.000_015_31,
    i_dot: -0.012_946_68,
    l: 100.464_571_66,
    l_dot: 35_999.372_449_81,
    long_peri: 102.937_681_93,
    long_peri_dot: 0.323_273_64,
    long_node: 0.0,
    long_node_dot: 0.0,
};

static MARS: Elements = Elements {
    a: 1.523_710_34,
    a_dot: 0.000_018_47,
    e: 0.093_394_10,
    e_dot: 0.000_078_82,
    i: 1.849_691_42,
    i_dot: -0.008_131_31,
    l: -4.553_432_05,
    l_dot: 19_140.302_684_99,
    long_peri: -23.943_629_59,
    long_peri_dot: 0.444_410_88,
    long_node: 49.559_538_91,
    long_node_dot: -0.292_573_43,
};

static JUPITER: Elements = Elements {
    a: 5.202_887_00,
    a_dot: -0.000_116_07,
    e: 0.048_386_24,
    e_dot: -0.000_132_53,
    i: 1.304_396_95,
    i_dot: -0.001_837_14,
    l: 34.396_440_51,
    l_dot: 3_034.746_127_75,
    long_peri: 14.728_479_83,
    long_peri_dot: 0.212_526_68,
    long_node: 100.473_909_09,
    long_node_dot: 0.204_691_06,
};

static SATURN: Elements = Elements {
    a: 9.536_675_94,
    a_dot: -0.001_250_60,
    e: 0.053_861_79,
    e_dot: -0.000_509_91,
    i: 2.485_991_87,
    i_dot: 0.001_936_09,
    l: 49.954_244_23,
    l_dot: 1_222.493_622_01,
    long_peri: 92.598_878_31,
    long_peri_dot: -0.418_972_16,
    long_node: 113.662_424_48,
    long_node_dot: -0.288_677_94,
};

static URANUS: Elements = Elements {
    a: 19.189_164_64,
    a_dot: -0.001_961_76,
    e: 0.047_257_44,
    e_dot: -0.000_043_97,
    i: 0.772_637_83,
    i_dot: -0.002_429_39,
    l: 313.238_104_51,
    l_dot: 428.482_027_85,
    long_peri: 170.954_276_30,
    long_peri_dot: 0.408_052_81,
    long_node: 74.016_925_03,
    long_node_dot: 0.042_405_89,
};

static NEPTUNE: Elements = Elements {
    a: 30.069_922_76,
    a_dot: 0.000_262_91,
    e: 0.008_590_48,
    e_dot: 0.000_051_05,
    i: 1.770_043_47,
    i_dot: 0.000_353_72,
    l: -55.120_029_69,
    l_dot: 218.459_453_25,
    long_peri: 44.964_762_27,
    long_peri_dot: -0.322_414_64,
    long_node: 131.784_225_74,
    long_node_dot: -0.005_086_64,
};

/// Apparent geocentric position and visual circumstances of a planet.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PlanetPosition {
    pub planet: Planet,
    pub helio_longitude: Angle,
    pub helio_latitude: Angle,
    /// Heliocentric distance in AU
    pub helio_distance: f64,
    pub ra: Angle,
    pub dec: Angle,
    /// Geocentric distance in AU
    pub distance_au: f64,
    /// Apparent visual magnitude
    pub magnitude: f64,
    /// Angular separation from the Sun as seen from Earth
    pub elongation: Angle,
    /// Sun-planet-Earth angle
    pub phase_angle: Angle,
    pub angular_diameter: Angle,
}

impl PlanetPosition {
    /// Illuminated fraction of the disk, [0, 1].
    pub fn illumination(&self) -> f64 {
        (1.0 + self.phase_angle.cos()) / 2.0
    }

    pub fn symbol(&self) -> &'static str {
        self.planet.symbol()
    }

    pub fn to_icrs(&self) -> IcrsCoord {
        IcrsCoord { ra: self.ra, dec: self.dec }
    }
}

/// Solves Kepler's equation `M = E − e sin E` for the eccentric anomaly by
/// Newton-Raphson, starting from E = M.
///
/// # Errors
/// Returns `AstroError::Convergence` if the solution has not settled to
/// 1e-10 rad within 30 iterations. This must not fire for the supported
/// planets (e < 0.21) and is surfaced diagnostically rather than absorbed.
pub fn kepler_solve(mean_anomaly_rad: f64, eccentricity: f64) -> Result<f64> {
    let m = mean_anomaly_rad;
    let mut e_anom = m;

    for _ in 0..KEPLER_MAX_ITERATIONS {
        let delta = (e_anom - eccentricity * e_anom.sin() - m) / (1.0 - eccentricity * e_anom.cos());
        e_anom -= delta;
        if delta.abs() < KEPLER_TOLERANCE {
            return Ok(e_anom);
        }
    }

    Err(AstroError::Convergence {
        calculation: "Kepler's equation",
        iterations: KEPLER_MAX_ITERATIONS,
    })
}

/// Heliocentric rectangular coordinates in the J2000 ecliptic frame, AU.
fn heliocentric_rectangular(el: &Elements, jd: JulianDate) -> Result<[f64; 3]> {
    let t = jd.t_j2000();

    let a = el.a + el.a_dot * t;
    let e = el.e + el.e_dot * t;
    let i = (el.i + el.i_dot * t).to_radians();
    let l = el.l + el.l_dot * t;
    let long_peri = el.long_peri + el.long_peri_dot * t;
    let long_node = (el.long_node + el.long_node_dot * t).to_radians();

    // Mean anomaly, reduced to [-180°, 180°) before the solver
    let mut m = (l - long_peri) % 360.0;
    if m < -180.0 {
        m += 360.0;
    } else if m >= 180.0 {
        m -= 360.0;
    }

    let e_anom = kepler_solve(m.to_radians(), e)?;

    // Position in the orbital plane, perihelion toward +x
    let x_orb = a * (e_anom.cos() - e);
    let y_orb = a * (1.0 - e * e).sqrt() * e_anom.sin();
    let r = (x_orb * x_orb + y_orb * y_orb).sqrt();
    let nu = y_orb.atan2(x_orb);

    // Argument of latitude, then the rotation into the ecliptic
    let u = (long_peri.to_radians() - long_node) + nu;
    let (sin_u, cos_u) = u.sin_cos();
    let (sin_node, cos_node) = long_node.sin_cos();
    let (sin_i, cos_i) = i.sin_cos();

    Ok([
        r * (cos_node * cos_u - sin_node * sin_u * cos_i),
        r * (sin_node * cos_u + cos_node * sin_u * cos_i),
        r * sin_u * sin_i,
    ])
}

fn norm(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// V(1,0) magnitude plus phase-angle terms (α in degrees).
fn apparent_magnitude(planet: Planet, r: f64, delta: f64, alpha_deg: f64) -> f64 {
    let base = 5.0 * (r * delta).log10();
    let a = alpha_deg;
    match planet {
        Planet::Mercury => -0.42 + base + 0.0380 * a - 0.000_273 * a * a + 0.000_002 * a * a * a,
        Planet::Venus => -4.40 + base + 0.0009 * a + 0.000_239 * a * a - 0.000_000_65 * a * a * a,
        Planet::Mars => -1.52 + base + 0.016 * a,
        Planet::Jupiter => -9.40 + base + 0.005 * a,
        // Ring contribution omitted
        Planet::Saturn => -8.88 + base + 0.044 * a,
        Planet::Uranus => -7.19 + base + 0.002 * a,
        Planet::Neptune => -6.87 + base,
    }
}

/// Computes the apparent geocentric position of a planet.
///
/// # Errors
/// Returns `AstroError::Convergence` only if the Kepler solver fails, which
/// indicates a defect rather than an expected outcome.
pub fn planet_position(planet: Planet, jd: JulianDate) -> Result<PlanetPosition> {
    let helio = heliocentric_rectangular(planet.elements(), jd)?;
    let earth = heliocentric_rectangular(&EARTH, jd)?;

    let r = norm(helio);
    let helio_longitude = Angle::from_radians(helio[1].atan2(helio[0])).normalized();
    let helio_latitude = Angle::from_radians((helio[2] / r).clamp(-1.0, 1.0).asin());

    // Geocentric vector in the J2000 ecliptic, then rotate to equatorial
    let geo = [helio[0] - earth[0], helio[1] - earth[1], helio[2] - earth[2]];
    let delta = norm(geo);
    let r_earth = norm(earth);

    let eps = OBLIQUITY_J2000.to_radians();
    let (sin_eps, cos_eps) = eps.sin_cos();
    let x_eq = geo[0];
    let y_eq = geo[1] * cos_eps - geo[2] * sin_eps;
    let z_eq = geo[1] * sin_eps + geo[2] * cos_eps;

    let ra = Angle::from_radians(y_eq.atan2(x_eq)).normalized();
    let dec = Angle::from_radians((z_eq / delta).clamp(-1.0, 1.0).asin());

    // Elongation: Sun-Earth-planet angle. The Sun's direction from Earth is
    // the negated Earth vector.
    let sun_dir = [-earth[0], -earth[1], -earth[2]];
    let cos_elong = dot(sun_dir, geo) / (r_earth * delta);
    let elongation = Angle::from_radians(cos_elong.clamp(-1.0, 1.0).acos());

    // Phase angle: Sun-planet-Earth angle at the planet
    let cos_phase = dot(helio, geo) / (r * delta);
    let phase_angle = Angle::from_radians(cos_phase.clamp(-1.0, 1.0).acos());

    let magnitude = apparent_magnitude(planet, r, delta, phase_angle.degrees());
    let angular_diameter =
        Angle::from_radians((2.0 * planet.radius_km() / (delta * AU_KM)).asin());

    Ok(PlanetPosition {
        planet,
        helio_longitude,
        helio_latitude,
        helio_distance: r,
        ra,
        dec,
        distance_au: delta,
        magnitude,
        elongation,
        phase_angle,
        angular_diameter,
    })
}

/// Positions of all seven planets at the same instant, in heliocentric
/// order.
pub fn all_planet_positions(jd: JulianDate) -> Result<Vec<PlanetPosition>> {
    Planet::ALL.iter().map(|&p| planet_position(p, jd)).collect()
}

/// Altitude of a planet above an observer's horizon.
pub fn planet_altitude(planet: Planet, observer: &Observer, jd: JulianDate) -> Result<Angle> {
    let pos = planet_position(planet, jd)?;
    Ok(pos
        .to_icrs()
        .to_horizontal(jd, observer.latitude, observer.longitude)
        .alt)
}

/// Meridian transit of a planet nearest `jd`.
pub fn planet_transit(planet: Planet, observer: &Observer, jd: JulianDate) -> Result<JulianDate> {
    let pos = planet_position(planet, jd)?;
    Ok(transit_time(&pos.to_icrs(), observer, jd))
}

/// Rise of a planet on the date of `jd`, or `None` when it never crosses
/// the horizon that day.
pub fn planet_rise(
    planet: Planet,
    observer: &Observer,
    jd: JulianDate,
) -> Result<Option<JulianDate>> {
    let pos = planet_position(planet, jd)?;
    let (rise, _) = target_rise_set(&pos.to_icrs(), observer, jd, PLANET_RISE_SET_ALTITUDE);
    Ok(rise)
}

/// Set of a planet on the date of `jd`, or `None` when it never crosses
/// the horizon that day.
pub fn planet_set(
    planet: Planet,
    observer: &Observer,
    jd: JulianDate,
) -> Result<Option<JulianDate>> {
    let pos = planet_position(planet, jd)?;
    let (_, set) = target_rise_set(&pos.to_icrs(), observer, jd, PLANET_RISE_SET_ALTITUDE);
    Ok(set)
}
