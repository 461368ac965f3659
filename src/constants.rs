//! Astronomical constants with references and uncertainties.
//!
//! Values are sourced from IAU 2015 Resolution B3 and CODATA 2018 unless
//! noted. The metadata table backs the `constants` CLI surface; internal
//! calculations use the bare `pub const` scalars so they never go through a
//! lookup.

use crate::error::{AstroError, Result};
use serde::Serialize;
use std::fmt;

/// Julian Date of the J2000.0 epoch: 2000 January 1.5.
pub const JD_J2000: f64 = 2_451_545.0;

/// Offset between Julian Date and Modified Julian Date.
pub const MJD_OFFSET: f64 = 2_400_000.5;

/// Days in a Julian year.
pub const JULIAN_YEAR: f64 = 365.25;

/// Days in a Julian century.
pub const JULIAN_CENTURY: f64 = 36_525.0;

/// Astronomical Unit in kilometers (IAU 2012, exact).
pub const AU_KM: f64 = 149_597_870.7;

/// Mean obliquity of the ecliptic at J2000.0, degrees (IAU 2006).
pub const OBLIQUITY_J2000: f64 = 23.439_291_111;

/// Mean length of the synodic month in days.
pub const SYNODIC_MONTH: f64 = 29.530_6;

/// Earth equatorial radius in kilometers (WGS84).
pub const EARTH_RADIUS_KM: f64 = 6_378.137;

/// Ratio of a mean solar day to a mean sidereal day.
pub const SOLAR_TO_SIDEREAL: f64 = 0.997_269_56;

/// An astronomical constant with metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Constant {
    /// Short lookup symbol (e.g. "c", "AU", "JD_J2000")
    pub symbol: &'static str,
    /// Human-readable name
    pub name: &'static str,
    pub value: f64,
    pub unit: &'static str,
    /// None when unknown; Some(0.0) means exact by definition
    pub uncertainty: Option<f64>,
    pub reference: &'static str,
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.uncertainty {
            Some(u) if u > 0.0 => write!(f, "{} = {} ± {} {}", self.name, self.value, u, self.unit),
            _ => write!(f, "{} = {} {}", self.name, self.value, self.unit),
        }
    }
}

/// The full metadata table.
pub static CONSTANTS: &[Constant] = &[
    Constant {
        symbol: "c",
        name: "Speed of light",
        value: 299_792_458.0,
        unit: "m/s",
        uncertainty: Some(0.0),
        reference: "SI 2019 (exact)",
    },
    Constant {
        symbol: "G",
        name: "Gravitational constant",
        value: 6.674_30e-11,
        unit: "m³/(kg·s²)",
        uncertainty: Some(1.5e-15),
        reference: "CODATA 2018",
    },
    Constant {
        symbol: "AU",
        name: "Astronomical Unit",
        value: 149_597_870_700.0,
        unit: "m",
        uncertainty: Some(0.0),
        reference: "IAU 2012 (exact)",
    },
    Constant {
        symbol: "JD_J2000",
        name: "Julian Date of J2000.0",
        value: JD_J2000,
        unit: "days",
        uncertainty: None,
        reference: "IAU (exact)",
    },
    Constant {
        symbol: "MJD_OFFSET",
        name: "Modified Julian Date offset",
        value: MJD_OFFSET,
        unit: "days",
        uncertainty: None,
        reference: "IAU (exact)",
    },
    Constant {
        symbol: "JULIAN_YEAR",
        name: "Julian year",
        value: JULIAN_YEAR,
        unit: "days",
        uncertainty: None,
        reference: "IAU (exact)",
    },
    Constant {
        symbol: "JULIAN_CENTURY",
        name: "Julian century",
        value: JULIAN_CENTURY,
        unit: "days",
        uncertainty: None,
        reference: "IAU (exact)",
    },
    Constant {
        symbol: "ARCSEC_PER_RAD",
        name: "Arcseconds per radian",
        value: 206_264.806_247_096_36,
        unit: "arcsec/rad",
        uncertainty: None,
        reference: "Derived (exact)",
    },
    Constant {
        symbol: "R_EARTH",
        name: "Earth equatorial radius",
        value: 6_378_137.0,
        unit: "m",
        uncertainty: None,
        reference: "WGS84",
    },
    Constant {
        symbol: "F_EARTH",
        name: "Earth flattening",
        value: 1.0 / 298.257_223_563,
        unit: "",
        uncertainty: None,
        reference: "WGS84",
    },
    Constant {
        symbol: "OMEGA_EARTH",
        name: "Earth rotation rate",
        value: 7.292_115e-5,
        unit: "rad/s",
        uncertainty: None,
        reference: "IERS",
    },
    Constant {
        symbol: "OBLIQUITY_J2000",
        name: "Mean obliquity at J2000.0",
        value: OBLIQUITY_J2000,
        unit: "degrees",
        uncertainty: None,
        reference: "IAU 2006",
    },
    Constant {
        symbol: "NGP_RA",
        name: "Galactic North Pole RA (ICRS)",
        value: 192.859_481_3,
        unit: "degrees",
        uncertainty: None,
        reference: "IAU 1958, precessed to J2000",
    },
    Constant {
        symbol: "NGP_DEC",
        name: "Galactic North Pole Dec (ICRS)",
        value: 27.128_251_1,
        unit: "degrees",
        uncertainty: None,
        reference: "IAU 1958, precessed to J2000",
    },
    Constant {
        symbol: "GAL_NODE",
        name: "Galactic longitude of ascending node",
        value: 32.932,
        unit: "degrees",
        uncertainty: None,
        reference: "IAU 1958",
    },
    Constant {
        symbol: "M_SUN",
        name: "Solar mass",
        value: 1.988_41e30,
        unit: "kg",
        uncertainty: Some(4e25),
        reference: "IAU 2015",
    },
    Constant {
        symbol: "R_SUN",
        name: "Solar radius",
        value: 6.957e8,
        unit: "m",
        uncertainty: Some(0.0),
        reference: "IAU 2015 (nominal)",
    },
    Constant {
        symbol: "L_SUN",
        name: "Solar luminosity",
        value: 3.828e26,
        unit: "W",
        uncertainty: Some(0.0),
        reference: "IAU 2015 (nominal)",
    },
];

/// All constants, in table order.
pub fn all() -> &'static [Constant] {
    CONSTANTS
}

/// Case-insensitive substring search over symbol and name.
pub fn search(query: &str) -> Vec<&'static Constant> {
    let q = query.to_lowercase();
    CONSTANTS
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&q) || c.symbol.to_lowercase().contains(&q))
        .collect()
}

/// Looks up a constant by its symbol (case-insensitive).
///
/// # Errors
/// Returns `AstroError::UnknownConstant` for unrecognized symbols.
pub fn get(symbol: &str) -> Result<&'static Constant> {
    CONSTANTS
        .iter()
        .find(|c| c.symbol.eq_ignore_ascii_case(symbol))
        .ok_or_else(|| AstroError::UnknownConstant { name: symbol.to_string() })
}
