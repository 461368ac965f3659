use crate::constants::JD_J2000;
use crate::time::JulianDate;
use approx::assert_relative_eq;
use chrono::{TimeZone, Timelike, Utc};

#[test]
fn test_known_julian_dates() {
    // Meeus Ch. 7 worked examples
    let cases = [
        ((2000, 1, 1, 12, 0, 0.0), 2_451_545.0),
        ((1987, 4, 10, 0, 0, 0.0), 2_446_895.5),
        ((1957, 10, 4, 19, 26, 24.0), 2_436_116.31),
        ((1600, 1, 1, 0, 0, 0.0), 2_305_447.5),
    ];
    for ((y, mo, d, h, mi, s), expected) in cases {
        let jd = JulianDate::from_calendar(y, mo, d, h, mi, s).unwrap();
        assert_relative_eq!(jd.value(), expected, max_relative = 1e-9);
    }
}

#[test]
fn test_from_calendar_rejects_nonsense() {
    assert!(JulianDate::from_calendar(2024, 13, 1, 0, 0, 0.0).is_err());
    assert!(JulianDate::from_calendar(2024, 2, 30, 0, 0, 0.0).is_err());
    assert!(JulianDate::from_calendar(2024, 6, 1, 24, 0, 0.0).is_err());
    assert!(JulianDate::from_calendar(2024, 6, 1, 0, 0, 60.0).is_err());
}

#[test]
fn test_mjd_views() {
    let jd = JulianDate::from_calendar(2000, 1, 1, 0, 0, 0.0).unwrap();
    assert_relative_eq!(jd.mjd(), 51_544.5, max_relative = 1e-10);
    assert_relative_eq!(JulianDate::from_mjd(51_544.5).value(), 2_451_544.5, max_relative = 1e-10);

    let origin = JulianDate::new(2_400_000.5);
    assert!(origin.mjd().abs() < 1e-10);
}

#[test]
fn test_t_j2000() {
    assert!(JulianDate::j2000().t_j2000().abs() < 1e-12);
    let one_century = JulianDate::new(JD_J2000 + 36_525.0);
    assert_relative_eq!(one_century.t_j2000(), 1.0, max_relative = 1e-10);
    let back_a_century = JulianDate::new(JD_J2000 - 36_525.0);
    assert_relative_eq!(back_a_century.t_j2000(), -1.0, max_relative = 1e-10);
    assert_relative_eq!(one_century.days_since_j2000(), 36_525.0, max_relative = 1e-10);
}

#[test]
fn test_roundtrip_at_j2000() {
    let original = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
    let jd = JulianDate::from_datetime(original);
    let result = jd.to_datetime().unwrap();
    let delta_s = (result - original).num_microseconds().unwrap().abs() as f64 / 1e6;
    assert!(delta_s < 1e-6, "J2000 round-trip error {delta_s} s");
}

#[test]
fn test_roundtrip_preserves_microseconds() {
    let original = Utc
        .with_ymd_and_hms(2024, 6, 15, 14, 30, 45)
        .unwrap()
        .with_nanosecond(123_456_000)
        .unwrap();
    let jd = JulianDate::from_datetime(original);
    let result = jd.to_datetime().unwrap();
    let delta_s = (result - original).num_microseconds().unwrap().abs() as f64 / 1e6;
    assert!(delta_s < 1e-5, "microsecond round-trip error {delta_s} s");
}

#[test]
fn test_roundtrip_jd_datetime_jd_sweep() {
    // JD → datetime → JD across the MJD era
    let mut jd_val = 2_400_000.0;
    while jd_val < 2_500_000.0 {
        let dt = JulianDate::new(jd_val).to_datetime().unwrap();
        let back = JulianDate::from_datetime(dt);
        assert_relative_eq!(back.value(), jd_val, max_relative = 1e-9);
        jd_val += 8_271.129_873;
    }
}

#[test]
fn test_gmst_at_j2000() {
    let gmst = JulianDate::j2000().gmst();
    assert!(gmst > 18.6 && gmst < 18.8, "GMST(J2000) = {gmst}");
}

#[test]
fn test_gmst_meeus_example() {
    // Meeus example 12.b: 1987 Apr 10, 19:21:00 UT
    let jd = JulianDate::from_calendar(1987, 4, 10, 19, 21, 0.0).unwrap();
    let gmst = jd.gmst();
    assert!((gmst - 8.582_5).abs() < 1e-3, "GMST = {gmst}, expected 8.5825");
}

#[test]
fn test_gmst_always_in_range() {
    let mut jd_val = 2_299_161.0;
    while jd_val < 2_600_000.0 {
        let gmst = JulianDate::new(jd_val).gmst();
        assert!((0.0..24.0).contains(&gmst), "GMST({jd_val}) = {gmst}");
        jd_val += 12_345.678_9;
    }
}

#[test]
fn test_lst_longitude_offsets() {
    let jd = JulianDate::new(2_460_325.5);
    let gmst = jd.gmst();

    // Greenwich LST is GMST exactly
    assert_relative_eq!(jd.lst(0.0), gmst, max_relative = 1e-12);

    // 15° east is one sidereal hour ahead, modulo a day
    let east = jd.lst(15.0);
    let expected = (gmst + 1.0) % 24.0;
    assert!((east - expected).abs() < 1e-10);

    // Any longitude stays in [0, 24)
    for lon in [-285.0, -180.0, -0.1, 0.1, 90.0, 180.0, 359.0] {
        let lst = jd.lst(lon);
        assert!((0.0..24.0).contains(&lst), "LST({lon}) = {lst}");
    }
}

#[test]
fn test_arithmetic() {
    let jd = JulianDate::new(2_460_000.0);
    let later = jd + 1.5;
    assert_relative_eq!(later.value(), 2_460_001.5, max_relative = 1e-12);
    assert_relative_eq!(later - jd, 1.5, max_relative = 1e-12);
    assert_relative_eq!((later - 1.5).value(), jd.value(), max_relative = 1e-12);

    assert!(jd < later);
    assert_eq!(jd, JulianDate::new(2_460_000.0));
}

#[test]
fn test_display() {
    assert_eq!(JulianDate::j2000().to_string(), "JD 2451545.000000");
}
