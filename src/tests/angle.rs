use crate::angle::{Angle, AngleUnit};
use approx::assert_relative_eq;

#[test]
fn test_unit_round_trips() {
    for &d in &[0.0, 0.5, 45.5, 90.0, 179.999, 359.9, -33.25] {
        let a = Angle::from_degrees(d);
        assert_relative_eq!(a.degrees(), d, max_relative = 1e-10);
        assert_relative_eq!(Angle::from_radians(a.radians()).degrees(), d, max_relative = 1e-10);
        assert_relative_eq!(Angle::from_hours(a.hours()).degrees(), d, max_relative = 1e-10);
        assert_relative_eq!(
            Angle::from_arcseconds(a.arcseconds()).degrees(),
            d,
            max_relative = 1e-10
        );
    }
}

#[test]
fn test_unit_relationships() {
    let a = Angle::from_degrees(15.0);
    assert_relative_eq!(a.hours(), 1.0, max_relative = 1e-12);
    assert_relative_eq!(a.arcminutes(), 900.0, max_relative = 1e-12);
    assert_relative_eq!(a.arcseconds(), 54_000.0, max_relative = 1e-12);
}

#[test]
fn test_new_with_unit() {
    assert_eq!(Angle::new(45.0, AngleUnit::Degrees), Angle::from_degrees(45.0));
    assert_eq!(Angle::new(3.0, AngleUnit::Hours), Angle::from_degrees(45.0));
    assert_eq!(Angle::new(2700.0, AngleUnit::Arcminutes), Angle::from_degrees(45.0));
    assert!("arcsec".parse::<AngleUnit>().is_ok());
    assert!("furlongs".parse::<AngleUnit>().is_err());
}

#[test]
fn test_trig_identity() {
    let mut d = -720.0;
    while d <= 720.0 {
        let a = Angle::from_degrees(d);
        let s = a.sin() * a.sin() + a.cos() * a.cos();
        assert!((s - 1.0).abs() < 1e-10, "sin²+cos² = {s} at {d}°");
        d += 7.3;
    }
}

#[test]
fn test_normalize_default_range() {
    for &d in &[-720.0, -360.0, -180.0, -0.001, 0.0, 359.999, 360.0, 725.3, 1e6] {
        let n = Angle::from_degrees(d).normalized().degrees();
        assert!((0.0..360.0).contains(&n), "normalize({d}) = {n}");
    }
}

#[test]
fn test_normalize_centered_on_zero() {
    let n = Angle::from_degrees(350.0).normalize(0.0);
    assert_relative_eq!(n.degrees(), -10.0, max_relative = 1e-10);

    let n = Angle::from_degrees(-190.0).normalize(0.0);
    assert_relative_eq!(n.degrees(), 170.0, max_relative = 1e-10);
}

#[test]
fn test_parse_decimal_degrees() {
    assert_relative_eq!(Angle::parse("45.5").unwrap().degrees(), 45.5, max_relative = 1e-10);
    assert_relative_eq!(Angle::parse("45.5d").unwrap().degrees(), 45.5, max_relative = 1e-10);
    assert_relative_eq!(Angle::parse("-12.25").unwrap().degrees(), -12.25, max_relative = 1e-10);
}

#[test]
fn test_parse_dms_variants() {
    let expected = 45.5;
    for input in ["45d30m00s", "45°30′00″", "45:30:00", "45 30 00", "+45 30 00"] {
        let a = Angle::parse(input).unwrap();
        assert_relative_eq!(a.degrees(), expected, max_relative = 1e-10);
    }
}

#[test]
fn test_parse_hms() {
    let a = Angle::parse("12h30m00s").unwrap();
    assert_relative_eq!(a.degrees(), 187.5, max_relative = 1e-10);
    assert_relative_eq!(a.hours(), 12.5, max_relative = 1e-10);

    let b = Angle::parse("6h45m08.9s").unwrap();
    assert_relative_eq!(b.hours(), 6.0 + 45.0 / 60.0 + 8.9 / 3600.0, max_relative = 1e-10);
}

#[test]
fn test_parse_negative_sexagesimal() {
    let a = Angle::parse("-16:42:58").unwrap();
    assert_relative_eq!(a.degrees(), -(16.0 + 42.0 / 60.0 + 58.0 / 3600.0), max_relative = 1e-10);

    // Sign survives a zero leading field
    let b = Angle::parse("-0:30:00").unwrap();
    assert_relative_eq!(b.degrees(), -0.5, max_relative = 1e-10);
}

#[test]
fn test_parse_rejects_garbage() {
    for input in ["", "12x34", "north by northwest", "1:2:3:4"] {
        assert!(Angle::parse(input).is_err(), "parse({input:?}) should fail");
    }
}

#[test]
fn test_to_dms() {
    let (d, m, s) = Angle::from_degrees(-45.5).to_dms();
    assert_eq!(d, -45);
    assert_eq!(m, 30);
    assert!(s.abs() < 1e-6);

    let (d, m, s) = Angle::from_dms(12.0, 34.0, 56.7).to_dms();
    assert_eq!(d, 12);
    assert_eq!(m, 34);
    assert!((s - 56.7).abs() < 1e-6);
}

#[test]
fn test_to_hms() {
    let (h, m, s) = Angle::from_degrees(187.5).to_hms();
    assert_eq!(h, 12);
    assert_eq!(m, 30);
    assert!(s.abs() < 1e-6);
}

#[test]
fn test_negative_zero_degrees_carries_sign() {
    let a = Angle::from_dms(-0.0, 30.0, 0.0);
    assert_relative_eq!(a.degrees(), -0.5, max_relative = 1e-10);
    assert!(a.is_negative());

    let (d, m, _s) = a.to_dms();
    assert_eq!(d, 0);
    assert_eq!(m, 30);
    // The formatter must still show the sign
    assert!(a.format_dms(0, false).starts_with('-'));
}

#[test]
fn test_format_dms() {
    let a = Angle::from_dms(45.0, 30.0, 15.25);
    assert_eq!(a.format_dms(2, false), "45d 30m 15.25s");
    assert_eq!(a.format_dms(2, true), "45° 30′ 15.25″");
    assert_eq!((-a).format_dms(0, false), "-45d 30m 15s");
}

#[test]
fn test_format_hms() {
    let a = Angle::from_hms(6.0, 45.0, 8.9);
    assert_eq!(a.format_hms(1, false), "6h 45m 08.9s");
}

#[test]
fn test_arithmetic() {
    let a = Angle::from_degrees(30.0);
    let b = Angle::from_degrees(12.5);

    assert_eq!(a + b, Angle::from_degrees(42.5));
    assert_eq!(a - b, Angle::from_degrees(17.5));
    assert_eq!(-a, Angle::from_degrees(-30.0));
    assert_eq!((-a).abs(), a);
    assert_eq!(a * 2.0, Angle::from_degrees(60.0));
    assert_eq!(2.0 * a, Angle::from_degrees(60.0));
    assert_eq!(a / 3.0, Angle::from_degrees(10.0));
}

#[test]
fn test_equality_tolerance_and_ordering() {
    let a = Angle::from_degrees(45.0);
    assert_eq!(a, Angle::from_radians(a.radians() * (1.0 + 1e-13)));
    assert_ne!(a, Angle::from_degrees(45.000001));

    assert!(Angle::from_degrees(10.0) < Angle::from_degrees(20.0));
    assert!(Angle::from_degrees(-10.0) < Angle::from_degrees(0.0));
}
