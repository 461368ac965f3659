//! Error types for starward calculations.
//!
//! Handles validation and error reporting for angle parsing, coordinate
//! conversions, time calculations, and ephemeris computations.
//!
//! # Error Types
//!
//! The main error type is [`AstroError`], which covers all possible errors in the crate:
//!
//! - **Coordinate errors**: Invalid RA, Dec, latitude, or altitude values
//! - **Format errors**: Unparseable angle or coordinate strings
//! - **Usage errors**: Missing parameters, unknown frame or constant names
//! - **Convergence errors**: Iterative solvers exceeding their caps
//!
//! Note that "no event today" (no sunrise at polar latitudes, a target that
//! never rises) is *not* an error: those results are modeled as `Option` in
//! the data model and callers must handle the `None` explicitly.
//!
//! # Examples
//!
//! ```
//! use starward::error::{AstroError, validate_dec};
//!
//! match validate_dec(95.0) {
//!     Ok(_) => println!("Valid declination"),
//!     Err(e) => println!("Error: {}", e), // "Invalid Declination: 95 (valid range: [-90, 90])"
//! }
//! ```

use thiserror::Error;

/// Main error type for starward operations.
///
/// Each variant carries enough context to render a useful one-line message
/// at the CLI boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AstroError {
    /// Invalid coordinate value
    #[error("Invalid {coord_type}: {value} (valid range: {valid_range})")]
    InvalidCoordinate {
        /// Type of coordinate (e.g., "RA", "Declination", "Latitude")
        coord_type: &'static str,
        /// The invalid value
        value: f64,
        /// Valid range description
        valid_range: &'static str,
    },

    /// Unparseable angle or coordinate string
    #[error("Cannot parse {what} from {input:?} (expected: {expected})")]
    ParseError {
        /// What was being parsed ("angle", "coordinate", ...)
        what: &'static str,
        /// The offending input
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// Unknown coordinate frame name
    #[error("Unknown coordinate frame: {name:?}")]
    UnknownFrame {
        /// The unrecognized frame name
        name: String,
    },

    /// Unknown constant name
    #[error("Unknown constant: {name:?}")]
    UnknownConstant {
        /// The unrecognized constant symbol
        name: String,
    },

    /// Missing required argument for an operation
    #[error("{operation} requires {parameter}")]
    MissingParameter {
        /// The operation that was attempted
        operation: &'static str,
        /// The parameter that was missing
        parameter: &'static str,
    },

    /// Invalid time/date
    #[error("Invalid date/time: {reason}")]
    InvalidDateTime {
        /// Description of the issue
        reason: String,
    },

    /// Iterative solver failed to converge
    #[error("{calculation} did not converge after {iterations} iterations")]
    Convergence {
        /// What calculation failed
        calculation: &'static str,
        /// Iterations performed before giving up
        iterations: u32,
    },

    /// Value out of valid range
    #[error("{parameter} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Parameter name
        parameter: &'static str,
        /// The invalid value
        value: f64,
        /// Min value (inclusive)
        min: f64,
        /// Max value (inclusive)
        max: f64,
    },
}

/// Type alias for Results in this crate.
///
/// All fallible operations in starward return this Result type.
pub type Result<T> = std::result::Result<T, AstroError>;

/// Validate right ascension (0 <= RA < 360).
///
/// # Errors
/// Returns `AstroError::InvalidCoordinate` if RA is outside [0, 360).
#[inline]
pub fn validate_ra(ra: f64) -> Result<()> {
    if !(0.0..360.0).contains(&ra) {
        Err(AstroError::InvalidCoordinate {
            coord_type: "RA",
            value: ra,
            valid_range: "[0, 360)",
        })
    } else {
        Ok(())
    }
}

/// Validate declination (-90 <= Dec <= 90).
///
/// # Errors
/// Returns `AstroError::InvalidCoordinate` if Dec is outside [-90, 90].
#[inline]
pub fn validate_dec(dec: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&dec) {
        Err(AstroError::InvalidCoordinate {
            coord_type: "Declination",
            value: dec,
            valid_range: "[-90, 90]",
        })
    } else {
        Ok(())
    }
}

/// Validate geographic latitude (-90 <= lat <= 90)
#[inline]
pub fn validate_latitude(lat: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&lat) {
        Err(AstroError::InvalidCoordinate {
            coord_type: "Latitude",
            value: lat,
            valid_range: "[-90, 90]",
        })
    } else {
        Ok(())
    }
}
