//! Display precision policy.
//!
//! All calculations run in full IEEE 754 double precision; these settings
//! control only how many digits formatters emit. The rule "calculations
//! never lose precision to display settings" is load-bearing and tested.

use crate::error::{AstroError, Result};
use lazy_static::lazy_static;
use std::str::FromStr;
use std::sync::RwLock;

/// Predefined precision levels for different use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecisionLevel {
    /// Quick reference: 3.14
    Compact,
    /// Readable: 3.1416
    Display,
    /// Default: 3.141593
    Standard,
    /// Research: 3.1415926536
    High,
    /// Maximum double precision: 3.141592653589793
    Full,
}

impl PrecisionLevel {
    /// Decimal places implied by this level.
    pub fn decimals(&self) -> usize {
        match self {
            PrecisionLevel::Compact => 2,
            PrecisionLevel::Display => 4,
            PrecisionLevel::Standard => 6,
            PrecisionLevel::High => 10,
            PrecisionLevel::Full => 15,
        }
    }
}

impl FromStr for PrecisionLevel {
    type Err = AstroError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "compact" => Ok(PrecisionLevel::Compact),
            "display" => Ok(PrecisionLevel::Display),
            "standard" => Ok(PrecisionLevel::Standard),
            "high" => Ok(PrecisionLevel::High),
            "full" => Ok(PrecisionLevel::Full),
            _ => Err(AstroError::ParseError {
                what: "precision level",
                input: s.to_string(),
                expected: "compact | display | standard | high | full, or a decimal count",
            }),
        }
    }
}

/// Formatting configuration derived from a precision level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecisionConfig {
    /// General floating point decimals
    pub decimals: usize,
    /// Decimal places for arcseconds in angle display
    pub angle_arcsec: usize,
    /// Decimal places for seconds in time display
    pub time_seconds: usize,
    /// Decimal places for coordinate degrees
    pub coordinates: usize,
    /// Radians keep at least ten decimals
    pub radians: usize,
    /// Switch to scientific notation beyond this decimal exponent
    pub scientific_threshold: i32,
}

impl Default for PrecisionConfig {
    fn default() -> Self {
        Self::from_level(PrecisionLevel::Standard)
    }
}

impl PrecisionConfig {
    /// Scales the per-kind precisions from a single level.
    ///
    /// Arcseconds and time seconds are capped at 3 decimals (a milliarcsecond
    /// and a millisecond are already past the accuracy of anything here).
    pub fn from_level(level: PrecisionLevel) -> Self {
        Self::from_decimals(level.decimals())
    }

    /// Same scaling from a raw decimal count.
    pub fn from_decimals(decimals: usize) -> Self {
        PrecisionConfig {
            decimals,
            angle_arcsec: decimals.min(3),
            time_seconds: decimals.min(3),
            coordinates: decimals,
            radians: decimals.max(10),
            scientific_threshold: 6.max(decimals as i32),
        }
    }

    /// Formats a float, switching to scientific notation for extreme
    /// magnitudes.
    pub fn format_float(&self, value: f64) -> String {
        if value == 0.0 {
            return format!("{:.*}", self.decimals, 0.0);
        }
        let exponent = value.abs().log10().floor() as i32;
        if exponent.abs() > self.scientific_threshold {
            format!("{:.*e}", self.decimals, value)
        } else {
            format!("{:.*}", self.decimals, value)
        }
    }

    pub fn format_degrees(&self, value: f64) -> String {
        format!("{:.*}", self.coordinates, value)
    }

    pub fn format_radians(&self, value: f64) -> String {
        format!("{:.*}", self.radians, value)
    }
}

lazy_static! {
    static ref GLOBAL_PRECISION: RwLock<PrecisionConfig> = RwLock::new(PrecisionConfig::default());
}

/// The current process-wide precision configuration.
pub fn get_precision() -> PrecisionConfig {
    *GLOBAL_PRECISION.read().expect("precision lock poisoned")
}

/// Replaces the process-wide precision configuration.
pub fn set_precision(config: PrecisionConfig) {
    *GLOBAL_PRECISION.write().expect("precision lock poisoned") = config;
}

/// Parses either a level name or a raw decimal count.
pub fn parse_precision(s: &str) -> Result<PrecisionConfig> {
    if let Ok(level) = s.parse::<PrecisionLevel>() {
        return Ok(PrecisionConfig::from_level(level));
    }
    s.parse::<usize>()
        .map(PrecisionConfig::from_decimals)
        .map_err(|_| AstroError::ParseError {
            what: "precision",
            input: s.to_string(),
            expected: "compact | display | standard | high | full, or a decimal count",
        })
}
