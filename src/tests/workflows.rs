//! End-to-end scenarios chaining several modules, the way the CLI does.

use crate::coords::{transform, Frame, GalacticCoord, IcrsCoord, TransformParams};
use crate::moon::{moon_phase, next_phase, MoonPhase};
use crate::observer::Observer;
use crate::planets::{planet_position, Planet};
use crate::separation::angular_separation;
use crate::sun::{sunrise, sunset};
use crate::time::JulianDate;
use crate::visibility::{airmass, compute_visibility, is_night, target_altitude};

#[test]
fn test_plan_an_evening_target() {
    // M31 from Greenwich on a January evening: parse the target, check the
    // sky is dark, then pull the full observability picture.
    let site = Observer::parse("Greenwich", "51.4772 N", "0.0005 W").unwrap();
    let m31 = IcrsCoord::parse("00h42m44s +41d16m09s").unwrap();
    let evening = JulianDate::from_calendar(2024, 1, 16, 19, 0, 0.0).unwrap();

    assert!(is_night(&site, evening));

    let vis = compute_visibility(&m31, &site, evening);
    // Dec +41° from 51.5°N transits at ~80° and is well up at 19:00 UTC
    assert!(vis.transit_altitude.degrees() > 75.0);
    assert!(vis.altitude.degrees() > 30.0, "altitude = {}", vis.altitude.degrees());
    assert!(vis.airmass < 2.0);
}

#[test]
fn test_galactic_catalog_position_to_horizon() {
    // A target given in galactic coordinates, chained through the
    // dispatcher all the way to Alt/Az.
    let site = Observer::from_degrees("Kitt Peak", 31.9583, -111.6).unwrap();
    let jd = JulianDate::from_calendar(2024, 8, 4, 6, 0, 0.0).unwrap();

    let cygnus_x1 = Frame::Galactic(GalacticCoord::from_degrees(71.3, 3.1).unwrap());
    let params = TransformParams {
        jd: Some(jd),
        lat: Some(site.latitude),
        lon: Some(site.longitude),
    };

    let horizontal = transform(&cygnus_x1, "altaz", &params).unwrap();
    let icrs = transform(&cygnus_x1, "icrs", &TransformParams::default()).unwrap();

    match (horizontal, icrs) {
        (Frame::Horizontal(h), Frame::Icrs(c)) => {
            // Same place the long way around
            let direct = c.to_horizontal(jd, site.latitude, site.longitude);
            assert!((h.alt.degrees() - direct.alt.degrees()).abs() < 1e-9);
            assert!((0.0..360.0).contains(&h.az.degrees()));
            if h.alt.degrees() > 0.1 {
                assert!(airmass(h.alt).is_finite());
            }
        }
        other => panic!("unexpected frames: {other:?}"),
    }
}

#[test]
fn test_dark_window_between_sunset_and_moonrise() {
    // The classic planning question: how the Sun's night and the Moon's
    // phase line up for a given date.
    let site = Observer::from_degrees("Greenwich", 51.4772, -0.0005).unwrap();
    let jd = JulianDate::new(2_460_325.5);

    let set = sunset(&site, jd).expect("sunset exists in January");
    let rise = sunrise(&site, jd).expect("sunrise exists in January");
    assert!(is_night(&site, set + 0.05));
    assert!(!is_night(&site, rise + 0.05));

    let phase_tonight = moon_phase(set);
    let full = next_phase(set, MoonPhase::FullMoon);
    assert!(full.value() > set.value());
    // Illumination peaks at the solved full-moon instant
    assert!(moon_phase(full).illumination > phase_tonight.illumination);
}

#[test]
fn test_planet_versus_moon_for_tonight() {
    // Compare a planet's sky position against the Moon at one instant.
    let jd = JulianDate::new(2_460_325.5);
    let site = Observer::from_degrees("Greenwich", 51.4772, -0.0005).unwrap();

    let jupiter = planet_position(Planet::Jupiter, jd).unwrap();
    let sep = angular_separation(&jupiter.to_icrs(), &crate::moon::moon_position(jd).to_icrs());
    assert!((0.0..=180.0).contains(&sep.degrees()));

    let alt = target_altitude(&jupiter.to_icrs(), &site, jd);
    assert!((-90.0..=90.0).contains(&alt.degrees()));
}
