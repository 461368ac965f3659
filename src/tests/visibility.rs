use crate::angle::Angle;
use crate::coords::IcrsCoord;
use crate::observer::Observer;
use crate::time::JulianDate;
use crate::visibility::{
    airmass, compute_visibility, is_night, moon_target_separation, target_altitude,
    target_azimuth, target_rise_set, transit_altitude, transit_time,
};

fn greenwich() -> Observer {
    Observer::from_degrees("Greenwich", 51.4772, -0.0005).unwrap()
}

#[test]
fn test_airmass_anchor_points() {
    assert!((airmass(Angle::from_degrees(90.0)) - 1.0).abs() < 0.01);
    assert!((airmass(Angle::from_degrees(45.0)) - 1.41).abs() < 0.02);
    assert!((airmass(Angle::from_degrees(30.0)) - 2.0).abs() < 0.02);
}

#[test]
fn test_airmass_grows_toward_horizon() {
    let x10 = airmass(Angle::from_degrees(10.0));
    let x5 = airmass(Angle::from_degrees(5.0));
    let x1 = airmass(Angle::from_degrees(1.0));

    assert!(x5 > x10);
    assert!(x1 > x5);
    assert!(x5 > 10.0, "X(5°) = {x5}");
    assert!(x1 > 25.0, "X(1°) = {x1}");
}

#[test]
fn test_airmass_undefined_below_horizon() {
    for deg in [-89.0, -45.0, -5.0, -1.0, 0.0, 0.05] {
        assert!(airmass(Angle::from_degrees(deg)).is_infinite(), "X({deg}) should be undefined");
    }
}

#[test]
fn test_airmass_monotone_threshold() {
    // X < 1.5 needs altitude above ~42°
    assert!(airmass(Angle::from_degrees(42.0)) < 1.5);
    assert!(airmass(Angle::from_degrees(41.0)) > airmass(Angle::from_degrees(43.0)));
}

#[test]
fn test_target_altitude_azimuth_ranges() {
    let target = IcrsCoord::from_degrees(0.0, 45.0).unwrap();
    for hour in (0..24).step_by(3) {
        let jd = JulianDate::new(2_460_000.5) + hour as f64 / 24.0;
        let alt = target_altitude(&target, &greenwich(), jd);
        let az = target_azimuth(&target, &greenwich(), jd);
        assert!((-90.0..=90.0).contains(&alt.degrees()));
        assert!((0.0..360.0).contains(&az.degrees()));
    }
}

#[test]
fn test_transit_lst_equals_ra() {
    let target = IcrsCoord::from_degrees(180.0, 30.0).unwrap();
    let jd = JulianDate::new(2_460_000.5);
    let transit = transit_time(&target, &greenwich(), jd);

    // Within a half-day of the reference, and LST matches the RA there
    assert!((transit.value() - jd.value()).abs() <= 0.5 + 1e-6);
    let lst = transit.lst(greenwich().longitude.degrees());
    let mut diff = (lst - target.ra.hours()).abs();
    if diff > 12.0 {
        diff = 24.0 - diff;
    }
    assert!(diff < 0.02, "LST at transit differs from RA by {diff} h");
}

#[test]
fn test_altitude_maximal_at_transit() {
    let target = IcrsCoord::from_degrees(180.0, 30.0).unwrap();
    let jd = JulianDate::new(2_460_000.5);
    let transit = transit_time(&target, &greenwich(), jd);

    let at_transit = target_altitude(&target, &greenwich(), transit);
    for offset_h in [-1.0, -0.5, 0.5, 1.0] {
        let alt = target_altitude(&target, &greenwich(), transit + offset_h / 24.0);
        assert!(
            at_transit.degrees() >= alt.degrees(),
            "transit alt {} < alt {} at {offset_h} h",
            at_transit.degrees(),
            alt.degrees()
        );
    }
}

#[test]
fn test_transit_altitude_formula() {
    let obs = greenwich();

    // Polaris from 51.5°N transits near 90 − (89.26 − 51.48) ≈ 52.2°
    let polaris = IcrsCoord::parse("02h31m49s +89d15m51s").unwrap();
    let alt = transit_altitude(&polaris, &obs);
    assert!(alt.degrees() > 50.0 && alt.degrees() < 55.0, "Polaris transit alt = {}", alt.degrees());

    // A target at the observer's declination transits through the zenith
    let overhead = IcrsCoord::from_degrees(0.0, 51.4772).unwrap();
    assert!((transit_altitude(&overhead, &obs).degrees() - 90.0).abs() < 1e-9);

    // Far-southern targets never rise from 51°N
    let southern = IcrsCoord::from_degrees(83.0, -70.0).unwrap();
    assert!(transit_altitude(&southern, &obs).degrees() < 0.0);

    // Equatorial targets transit overhead at the equator
    let equator_site = Observer::from_degrees("Equator", 0.0, 0.0).unwrap();
    let equatorial = IcrsCoord::from_degrees(0.0, 0.0).unwrap();
    assert!(transit_altitude(&equatorial, &equator_site).degrees() > 89.999);
}

#[test]
fn test_rise_set_for_equatorial_target() {
    let target = IcrsCoord::from_degrees(0.0, 0.0).unwrap();
    let jd = JulianDate::new(2_460_000.5);
    let (rise, set) = target_rise_set(&target, &greenwich(), jd, 0.0);

    let rise = rise.expect("equatorial target rises");
    let set = set.expect("equatorial target sets");
    assert!(rise.value() < set.value());

    // An equatorial target is up for about half the sidereal day
    let up_hours = (set - rise) * 24.0;
    assert!((up_hours - 12.0).abs() < 0.5, "up for {up_hours} h");
}

#[test]
fn test_rise_set_absent_cases() {
    let jd = JulianDate::new(2_460_000.5);
    let obs = greenwich();

    // Circumpolar: never sets, transit altitude above the horizon
    let polaris = IcrsCoord::from_degrees(37.95, 89.26).unwrap();
    let (rise, set) = target_rise_set(&polaris, &obs, jd, 0.0);
    assert!(rise.is_none() && set.is_none());
    assert!(transit_altitude(&polaris, &obs).degrees() > 0.0);

    // Never rises: same absent result, transit altitude below the horizon
    let southern = IcrsCoord::from_degrees(83.0, -70.0).unwrap();
    let (rise, set) = target_rise_set(&southern, &obs, jd, 0.0);
    assert!(rise.is_none() && set.is_none());
    assert!(transit_altitude(&southern, &obs).degrees() < 0.0);
}

#[test]
fn test_rise_set_respects_horizon_argument() {
    let target = IcrsCoord::from_degrees(0.0, 20.0).unwrap();
    let jd = JulianDate::new(2_460_000.5);
    let obs = greenwich();

    let (rise0, set0) = target_rise_set(&target, &obs, jd, 0.0);
    let (rise10, set10) = target_rise_set(&target, &obs, jd, 10.0);

    // A higher horizon shortens the arc above it
    let arc0 = set0.unwrap() - rise0.unwrap();
    let arc10 = set10.unwrap() - rise10.unwrap();
    assert!(arc10 < arc0, "arc above 10° ({arc10} d) should be shorter than above 0° ({arc0} d)");
}

#[test]
fn test_moon_separation_range() {
    let jd = JulianDate::new(2_460_325.5);
    for (ra, dec) in [(0.0, 0.0), (90.0, 45.0), (180.0, -45.0), (270.0, 80.0)] {
        let target = IcrsCoord::from_degrees(ra, dec).unwrap();
        let sep = moon_target_separation(&target, jd);
        assert!((0.0..=180.0).contains(&sep.degrees()));
    }
}

#[test]
fn test_is_night_winter_greenwich() {
    // Midnight UTC in January is night; noon is not
    assert!(is_night(&greenwich(), JulianDate::new(2_460_325.5)));
    assert!(!is_night(&greenwich(), JulianDate::new(2_460_326.0)));
}

#[test]
fn test_celestial_poles_from_north_pole() {
    let pole = Observer::from_degrees("North Pole", 90.0, 0.0).unwrap();
    let jd = JulianDate::new(2_460_325.5);

    let ncp = IcrsCoord::from_degrees(0.0, 90.0).unwrap();
    assert!(target_altitude(&ncp, &pole, jd).degrees() > 85.0);

    let scp = IcrsCoord::from_degrees(0.0, -90.0).unwrap();
    assert!(target_altitude(&scp, &pole, jd).degrees() < -85.0);
}

#[test]
fn test_compute_visibility_aggregate() {
    let target = IcrsCoord::from_degrees(180.0, 20.0).unwrap();
    let jd = JulianDate::new(2_460_325.5);
    let vis = compute_visibility(&target, &greenwich(), jd);

    assert!((-90.0..=90.0).contains(&vis.altitude.degrees()));
    assert!((0.0..360.0).contains(&vis.azimuth.degrees()));
    assert!(vis.airmass >= 1.0);
    assert_eq!(vis.altitude, target_altitude(&target, &greenwich(), jd));
    assert!((0.0..=180.0).contains(&vis.moon_separation.degrees()));

    // Dec 20° from 51.5°N is up for part of the day and transits at ~58°
    assert!(vis.rise.is_some());
    assert!(vis.set.is_some());
    assert!(vis.transit_altitude.degrees() > 50.0 && vis.transit_altitude.degrees() < 65.0);

    // Circumpolar from Greenwich: no rise/set, transit stays high
    let circumpolar = IcrsCoord::from_degrees(37.95, 89.26).unwrap();
    let vis_cp = compute_visibility(&circumpolar, &greenwich(), jd);
    assert!(vis_cp.rise.is_none() && vis_cp.set.is_none());
    assert!(vis_cp.transit_altitude.degrees() > 0.0);
}
