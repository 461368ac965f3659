//! # Starward
//!
//! Astronomy calculations for Rust: where celestial bodies appear in the
//! sky, when they rise and set, and how coordinates in one reference frame
//! map to another.
//!
//! ## Core Capabilities
//!
//! ### Angles & Time
//! - [`angle`] — angular values with exact unit conversions, sexagesimal
//!   parsing and formatting, stable trigonometry
//! - [`time`] — Julian Date, calendar conversion, GMST and local sidereal
//!   time
//! - [`constants`] — physical and astronomical constants with metadata
//!
//! ### Coordinate Frames
//! - [`coords`] — ICRS (J2000 equatorial), Galactic, and topocentric
//!   horizontal frames with a composite transform dispatcher
//! - [`separation`] — Vincenty angular separation and position angles
//!
//! ### Solar System Ephemerides
//! - [`sun`] — low-precision solar position, rise/set, twilight, equation
//!   of time, day length
//! - [`moon`] — lunar position, phase, rise/set, next-phase search
//! - [`planets`] — Keplerian positions, magnitudes, and phases for the
//!   seven classical planets
//!
//! ### Observation Planning
//! - [`visibility`] — altitude/azimuth, airmass, meridian transit,
//!   rise/set, Moon separation
//! - [`observer`] — observing sites on Earth
//! - [`precision`] — display-only precision policy
//! - [`recorder`] — optional "show your work" step collector
//!
//! ## Accuracy & Standards
//!
//! Algorithms follow Jean Meeus, *Astronomical Algorithms* (2nd edition),
//! the IAU 2006 sidereal time polynomial, and the standard approximate
//! Keplerian elements. Positions are low-precision by design: about 0.01°
//! for the Sun, 0.5° for the Moon, and an arcminute-scale for planets —
//! ample for rise/set work and observation planning, not for astrometry.
//!
//! ## Quick Example: is Vega worth observing tonight?
//!
//! ```
//! use starward::coords::IcrsCoord;
//! use starward::observer::Observer;
//! use starward::time::JulianDate;
//! use starward::visibility::compute_visibility;
//!
//! let vega = IcrsCoord::from_degrees(279.23473479, 38.78368896).unwrap();
//! let site = Observer::from_degrees("Kitt Peak", 31.9583, -111.6).unwrap();
//! let jd = JulianDate::from_calendar(2024, 8, 4, 6, 0, 0.0).unwrap();
//!
//! let vis = compute_visibility(&vega, &site, jd);
//! println!("altitude {:.1}°, airmass {:.2}", vis.altitude.degrees(), vis.airmass);
//! ```

pub mod angle;
pub mod constants;
pub mod coords;
pub mod error;
pub mod moon;
pub mod observer;
pub mod planets;
pub mod precision;
pub mod recorder;
pub mod separation;
pub mod sun;
pub mod time;
pub mod visibility;

pub use angle::{Angle, AngleUnit};
pub use coords::{Frame, GalacticCoord, HorizontalCoord, IcrsCoord, TransformParams};
pub use error::{AstroError, Result};
pub use moon::{MoonPhase, MoonPhaseInfo, MoonPosition};
pub use observer::Observer;
pub use planets::{Planet, PlanetPosition};
pub use recorder::Recorder;
pub use separation::{angular_separation, position_angle};
pub use sun::SunPosition;
pub use time::JulianDate;
pub use visibility::Visibility;

#[cfg(test)]
pub mod tests;
