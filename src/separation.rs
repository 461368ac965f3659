//! Angular separation and position angle on the celestial sphere.
//!
//! Separations use the Vincenty formula, which stays numerically stable for
//! both very small and nearly antipodal separations, unlike the haversine or
//! law-of-cosines forms.

use crate::angle::Angle;
use crate::coords::IcrsCoord;
use crate::recorder::{note, Recorder};

/// Angular separation between two points using the Vincenty formula.
///
/// # Example
/// ```
/// use starward::angle::Angle;
/// use starward::coords::IcrsCoord;
/// use starward::separation::angular_separation;
///
/// // Sirius to Betelgeuse is a bit over 27°
/// let sirius = IcrsCoord::new(Angle::from_hms(6.0, 45.0, 8.9), Angle::from_dms(-16.0, 42.0, 58.0)).unwrap();
/// let betelgeuse = IcrsCoord::new(Angle::from_hms(5.0, 55.0, 10.3), Angle::from_dms(7.0, 24.0, 25.4)).unwrap();
/// let sep = angular_separation(&sirius, &betelgeuse);
/// assert!(sep.degrees() > 26.0 && sep.degrees() < 28.0);
/// ```
pub fn angular_separation(c1: &IcrsCoord, c2: &IcrsCoord) -> Angle {
    angular_separation_recorded(c1, c2, None)
}

/// [`angular_separation`] reporting intermediate values to a recorder.
pub fn angular_separation_recorded(
    c1: &IcrsCoord,
    c2: &IcrsCoord,
    mut recorder: Option<&mut Recorder>,
) -> Angle {
    let (lam1, phi1) = (c1.ra.radians(), c1.dec.radians());
    let (lam2, phi2) = (c2.ra.radians(), c2.dec.radians());

    note(
        &mut recorder,
        "Input coordinates",
        format!(
            "Point 1: RA = {}, Dec = {}\nPoint 2: RA = {}, Dec = {}",
            c1.ra.format_hms(2, true),
            c1.dec.format_dms(2, true),
            c2.ra.format_hms(2, true),
            c2.dec.format_dms(2, true)
        ),
    );

    let dlam = lam2 - lam1;
    let (sin_phi1, cos_phi1) = phi1.sin_cos();
    let (sin_phi2, cos_phi2) = phi2.sin_cos();
    let (sin_dlam, cos_dlam) = dlam.sin_cos();

    let term1 = cos_phi2 * sin_dlam;
    let term2 = cos_phi1 * sin_phi2 - sin_phi1 * cos_phi2 * cos_dlam;
    let numerator = (term1 * term1 + term2 * term2).sqrt();
    let denominator = sin_phi1 * sin_phi2 + cos_phi1 * cos_phi2 * cos_dlam;

    note(
        &mut recorder,
        "Vincenty formula",
        format!(
            "numerator = √[(cos φ₂ sin Δλ)² + (cos φ₁ sin φ₂ − sin φ₁ cos φ₂ cos Δλ)²]\n\
             = √[{term1:.10}² + {term2:.10}²] = {numerator:.10}\n\
             denominator = sin φ₁ sin φ₂ + cos φ₁ cos φ₂ cos Δλ = {denominator:.10}"
        ),
    );

    let result = Angle::from_radians(numerator.atan2(denominator));

    note(
        &mut recorder,
        "Result",
        format!("σ = atan2(num, den) = {:.10}° = {}", result.degrees(), result.format_dms(2, true)),
    );

    result
}

/// Position angle from point 1 to point 2, measured North through East.
///
/// 0° = North, 90° = East, 180° = South, 270° = West. The result is
/// normalized to [0°, 360°).
pub fn position_angle(c1: &IcrsCoord, c2: &IcrsCoord) -> Angle {
    position_angle_recorded(c1, c2, None)
}

/// [`position_angle`] reporting intermediate values to a recorder.
pub fn position_angle_recorded(
    c1: &IcrsCoord,
    c2: &IcrsCoord,
    mut recorder: Option<&mut Recorder>,
) -> Angle {
    let (lam1, phi1) = (c1.ra.radians(), c1.dec.radians());
    let (lam2, phi2) = (c2.ra.radians(), c2.dec.radians());
    let dlam = lam2 - lam1;

    let y = dlam.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlam.cos();

    note(
        &mut recorder,
        "Position angle formula",
        format!("y = sin(Δλ) × cos(φ₂) = {y:.10}\nx = cos(φ₁) sin(φ₂) − sin(φ₁) cos(φ₂) cos(Δλ) = {x:.10}"),
    );

    let result = Angle::from_radians(y.atan2(x)).normalized();

    note(
        &mut recorder,
        "Result",
        format!("PA = atan2(y, x) = {:.6}°", result.degrees()),
    );

    result
}
