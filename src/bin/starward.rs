//! Command-line surface over the starward library.
//!
//! Every command prints either a human-oriented plain layout or a JSON
//! object with stable keys (`--output json`). Parse and usage failures exit
//! non-zero with a one-line message; absent events (no sunrise at polar
//! latitudes, a target that never rises) render as a dash in plain text and
//! `null` in JSON.

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};

use starward::angle::{Angle, AngleUnit};
use starward::coords::{transform, Frame, GalacticCoord, IcrsCoord, TransformParams};
use starward::moon::{self, MoonPhase};
use starward::observer::Observer;
use starward::planets::{self, Planet};
use starward::precision::{get_precision, parse_precision, set_precision};
use starward::recorder::Recorder;
use starward::separation::{angular_separation_recorded, position_angle_recorded};
use starward::sun;
use starward::time::JulianDate;
use starward::visibility;
use starward::{constants, Result};

#[derive(Parser)]
#[command(name = "starward", version, about = "Astronomy calculations from the command line")]
struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = Output::Plain)]
    output: Output,

    /// Display precision: compact|display|standard|high|full or a digit count
    #[arg(long, global = true)]
    precision: Option<String>,

    /// Show calculation steps where available
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Julian Date and sidereal time
    Time {
        #[command(subcommand)]
        cmd: TimeCmd,
    },
    /// Angular arithmetic and conversions
    Angles {
        #[command(subcommand)]
        cmd: AnglesCmd,
    },
    /// Coordinate frame transformations
    Coords {
        #[command(subcommand)]
        cmd: CoordsCmd,
    },
    /// Astronomical constants
    Constants {
        #[command(subcommand)]
        cmd: ConstantsCmd,
    },
    /// Solar position and events
    Sun {
        #[command(subcommand)]
        cmd: SunCmd,
    },
    /// Lunar position, phase, and events
    Moon {
        #[command(subcommand)]
        cmd: MoonCmd,
    },
    /// Planetary positions
    Planets {
        #[command(subcommand)]
        cmd: PlanetsCmd,
    },
    /// Observability of a target
    Vis {
        #[command(subcommand)]
        cmd: VisCmd,
    },
}

#[derive(Subcommand)]
enum TimeCmd {
    /// Current Julian Date
    Now,
    /// Convert a JD or MJD value
    Convert {
        value: f64,
        #[arg(long, default_value = "jd")]
        from: String,
    },
    /// Julian Date of a calendar instant (UTC)
    Jd {
        year: i32,
        month: u32,
        day: u32,
        hour: Option<u32>,
        minute: Option<u32>,
        second: Option<f64>,
    },
    /// Local sidereal time at a longitude (degrees east)
    Lst {
        lon: f64,
        #[arg(long)]
        jd: Option<f64>,
    },
}

#[derive(Subcommand)]
enum AnglesCmd {
    /// Angular separation between two coordinates
    Sep { coord1: String, coord2: String },
    /// Position angle from one coordinate to another
    Pa { coord1: String, coord2: String },
    /// Convert an angle between units
    Convert {
        value: String,
        #[arg(long, default_value = "deg")]
        unit: String,
    },
}

#[derive(Subcommand)]
enum CoordsCmd {
    /// Transform a coordinate to another frame
    Transform {
        coord: String,
        #[arg(long, default_value = "icrs")]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        lat: Option<f64>,
        #[arg(long)]
        lon: Option<f64>,
        #[arg(long)]
        jd: Option<f64>,
    },
    /// Parse a coordinate string and echo it back
    Parse { coord: String },
}

#[derive(Subcommand)]
enum ConstantsCmd {
    List,
    Search { query: String },
    Show { name: String },
}

#[derive(clap::Args)]
struct SiteArgs {
    /// Observer latitude, degrees north
    #[arg(long)]
    lat: Option<f64>,
    /// Observer longitude, degrees east
    #[arg(long)]
    lon: Option<f64>,
    /// Julian Date (defaults to now)
    #[arg(long)]
    jd: Option<f64>,
}

#[derive(Subcommand)]
enum SunCmd {
    Position {
        #[command(flatten)]
        site: SiteArgs,
    },
    Rise {
        #[command(flatten)]
        site: SiteArgs,
    },
    Set {
        #[command(flatten)]
        site: SiteArgs,
    },
    Noon {
        #[command(flatten)]
        site: SiteArgs,
    },
    Twilight {
        #[command(flatten)]
        site: SiteArgs,
    },
    Altitude {
        #[command(flatten)]
        site: SiteArgs,
    },
}

#[derive(Subcommand)]
enum MoonCmd {
    Position {
        #[command(flatten)]
        site: SiteArgs,
    },
    Phase {
        #[command(flatten)]
        site: SiteArgs,
    },
    Rise {
        #[command(flatten)]
        site: SiteArgs,
    },
    Set {
        #[command(flatten)]
        site: SiteArgs,
    },
    Altitude {
        #[command(flatten)]
        site: SiteArgs,
    },
    /// Next principal phase: new | first | full | last
    Next {
        phase: String,
        #[arg(long)]
        jd: Option<f64>,
    },
}

#[derive(Subcommand)]
enum PlanetsCmd {
    /// Apparent position and visual circumstances of one planet
    Position {
        planet: String,
        #[arg(long)]
        jd: Option<f64>,
    },
    /// One-line summary of all seven planets
    List {
        #[arg(long)]
        jd: Option<f64>,
    },
}

#[derive(Subcommand)]
enum VisCmd {
    Altitude {
        coord: String,
        #[command(flatten)]
        site: SiteArgs,
    },
    Transit {
        coord: String,
        #[command(flatten)]
        site: SiteArgs,
    },
    Riseset {
        coord: String,
        #[arg(long, default_value_t = 0.0)]
        horizon: f64,
        #[command(flatten)]
        site: SiteArgs,
    },
    Moonsep {
        coord: String,
        #[arg(long)]
        jd: Option<f64>,
    },
    Airmass { alt_deg: f64 },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Some(level) = &cli.precision {
        match parse_precision(level) {
            Ok(cfg) => set_precision(cfg),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// A command's result: one plain rendering, one JSON rendering.
struct Report {
    plain: String,
    json: Value,
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut recorder = cli.verbose.then(Recorder::new);

    let report = match &cli.command {
        Command::Time { cmd } => run_time(cmd)?,
        Command::Angles { cmd } => run_angles(cmd, recorder.as_mut())?,
        Command::Coords { cmd } => run_coords(cmd)?,
        Command::Constants { cmd } => run_constants(cmd)?,
        Command::Sun { cmd } => run_sun(cmd)?,
        Command::Moon { cmd } => run_moon(cmd)?,
        Command::Planets { cmd } => run_planets(cmd)?,
        Command::Vis { cmd } => run_vis(cmd)?,
    };

    match cli.output {
        Output::Plain => {
            if let Some(rec) = &recorder {
                if !rec.is_empty() {
                    println!("{}", rec.format_steps());
                }
            }
            println!("{}", report.plain);
        }
        Output::Json => {
            let mut value = report.json;
            if let Some(rec) = &recorder {
                if !rec.is_empty() {
                    value["steps"] = rec.to_json();
                }
            }
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}

fn jd_or_now(jd: Option<f64>) -> JulianDate {
    jd.map(JulianDate::new).unwrap_or_else(JulianDate::now)
}

fn site_observer(site: &SiteArgs) -> Result<Observer> {
    match (site.lat, site.lon) {
        (Some(lat), Some(lon)) => Observer::from_degrees("site", lat, lon),
        _ => Err(starward::AstroError::MissingParameter {
            operation: "this command",
            parameter: "--lat and --lon",
        }),
    }
}

/// "HH:MM:SS UTC (JD …)" for plain output; a dash when absent.
fn fmt_event(event: Option<JulianDate>) -> String {
    match event {
        Some(jd) => match jd.to_datetime() {
            Ok(dt) => format!("{} (JD {:.5})", dt.format("%Y-%m-%d %H:%M:%S UTC"), jd.value()),
            Err(_) => format!("JD {:.5}", jd.value()),
        },
        None => "—".to_string(),
    }
}

fn json_event(event: Option<JulianDate>) -> Value {
    match event {
        Some(jd) => json!(jd.value()),
        None => Value::Null,
    }
}

fn run_time(cmd: &TimeCmd) -> anyhow::Result<Report> {
    let report = match cmd {
        TimeCmd::Now => describe_jd(JulianDate::now())?,
        TimeCmd::Convert { value, from } => {
            let jd = match from.to_ascii_lowercase().as_str() {
                "jd" => JulianDate::new(*value),
                "mjd" => JulianDate::from_mjd(*value),
                other => anyhow::bail!("unknown time scale {other:?} (expected jd or mjd)"),
            };
            describe_jd(jd)?
        }
        TimeCmd::Jd { year, month, day, hour, minute, second } => {
            let jd = JulianDate::from_calendar(
                *year,
                *month,
                *day,
                hour.unwrap_or(0),
                minute.unwrap_or(0),
                second.unwrap_or(0.0),
            )?;
            describe_jd(jd)?
        }
        TimeCmd::Lst { lon, jd } => {
            let jd = jd_or_now(*jd);
            let lst = jd.lst(*lon);
            let gmst = jd.gmst();
            Report {
                plain: format!(
                    "LST at {lon:.4}°E: {} ({lst:.6} h)\nGMST: {gmst:.6} h",
                    Angle::from_hours(lst).format_hms(2, true)
                ),
                json: json!({
                    "julian_date": jd.value(),
                    "longitude_degrees": lon,
                    "lst_hours": lst,
                    "gmst_hours": gmst,
                }),
            }
        }
    };
    Ok(report)
}

fn describe_jd(jd: JulianDate) -> anyhow::Result<Report> {
    let cfg = get_precision();
    let calendar = jd
        .to_datetime()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S%.6f UTC").to_string())
        .unwrap_or_else(|_| "out of calendar range".to_string());
    Ok(Report {
        plain: format!(
            "JD   {}\nMJD  {}\nT(J2000)  {:.10} centuries\n{}",
            cfg.format_float(jd.value()),
            cfg.format_float(jd.mjd()),
            jd.t_j2000(),
            calendar
        ),
        json: json!({
            "julian_date": jd.value(),
            "modified_jd": jd.mjd(),
            "t_j2000": jd.t_j2000(),
            "days_since_j2000": jd.days_since_j2000(),
            "calendar_utc": calendar,
        }),
    })
}

fn run_angles(cmd: &AnglesCmd, mut recorder: Option<&mut Recorder>) -> anyhow::Result<Report> {
    let report = match cmd {
        AnglesCmd::Sep { coord1, coord2 } => {
            let c1 = IcrsCoord::parse(coord1)?;
            let c2 = IcrsCoord::parse(coord2)?;
            log::debug!("separation between {c1} and {c2}");
            let sep = angular_separation_recorded(&c1, &c2, recorder.as_deref_mut());
            Report {
                plain: format!("Separation: {} ({:.6}°)", sep.format_dms(2, true), sep.degrees()),
                json: json!({
                    "separation_degrees": sep.degrees(),
                    "separation_arcsec": sep.arcseconds(),
                }),
            }
        }
        AnglesCmd::Pa { coord1, coord2 } => {
            let c1 = IcrsCoord::parse(coord1)?;
            let c2 = IcrsCoord::parse(coord2)?;
            let pa = position_angle_recorded(&c1, &c2, recorder.as_deref_mut());
            Report {
                plain: format!("Position angle: {:.4}° (N through E)", pa.degrees()),
                json: json!({ "position_angle_degrees": pa.degrees() }),
            }
        }
        AnglesCmd::Convert { value, unit } => {
            let angle = match Angle::parse(value) {
                Ok(a) => a,
                Err(_) => {
                    let raw: f64 = value.parse().map_err(|_| starward::AstroError::ParseError {
                        what: "angle",
                        input: value.clone(),
                        expected: "a number or an angle string",
                    })?;
                    Angle::new(raw, unit.parse::<AngleUnit>()?)
                }
            };
            let cfg = get_precision();
            Report {
                plain: format!(
                    "Degrees:    {}\nRadians:    {}\nHours:      {}\nArcminutes: {}\nArcseconds: {}\nDMS: {}\nHMS: {}",
                    cfg.format_degrees(angle.degrees()),
                    cfg.format_radians(angle.radians()),
                    cfg.format_float(angle.hours()),
                    cfg.format_float(angle.arcminutes()),
                    cfg.format_float(angle.arcseconds()),
                    angle.format_dms(cfg.angle_arcsec, true),
                    angle.format_hms(cfg.time_seconds, true),
                ),
                json: json!({
                    "degrees": angle.degrees(),
                    "radians": angle.radians(),
                    "hours": angle.hours(),
                    "arcminutes": angle.arcminutes(),
                    "arcseconds": angle.arcseconds(),
                }),
            }
        }
    };
    Ok(report)
}

fn run_coords(cmd: &CoordsCmd) -> anyhow::Result<Report> {
    let report = match cmd {
        CoordsCmd::Transform { coord, from, to, lat, lon, jd } => {
            let input = match from.to_ascii_lowercase().as_str() {
                "galactic" | "gal" => {
                    let parts: Vec<&str> = coord.split_whitespace().collect();
                    if parts.len() != 2 {
                        anyhow::bail!("galactic input must be \"<l_deg> <b_deg>\"");
                    }
                    Frame::Galactic(GalacticCoord::from_degrees(
                        parts[0].parse()?,
                        parts[1].parse()?,
                    )?)
                }
                _ => Frame::Icrs(IcrsCoord::parse(coord)?),
            };
            let params = TransformParams {
                jd: jd.map(JulianDate::new),
                lat: lat.map(Angle::from_degrees),
                lon: lon.map(Angle::from_degrees),
            };
            let out = transform(&input, to, &params)?;
            let json = match &out {
                Frame::Icrs(c) => json!({
                    "frame": "icrs",
                    "ra_degrees": c.ra.degrees(),
                    "dec_degrees": c.dec.degrees(),
                }),
                Frame::Galactic(g) => json!({
                    "frame": "galactic",
                    "l_degrees": g.l.degrees(),
                    "b_degrees": g.b.degrees(),
                }),
                Frame::Horizontal(h) => json!({
                    "frame": "horizontal",
                    "altitude_degrees": h.alt.degrees(),
                    "azimuth_degrees": h.az.degrees(),
                }),
            };
            Report { plain: format!("{} → {}: {out}", input.name(), out.name()), json }
        }
        CoordsCmd::Parse { coord } => {
            let c = IcrsCoord::parse(coord)?;
            Report {
                plain: format!("{c}  (RA {:.6}°, Dec {:.6}°)", c.ra.degrees(), c.dec.degrees()),
                json: json!({
                    "ra_degrees": c.ra.degrees(),
                    "dec_degrees": c.dec.degrees(),
                    "ra_hms": c.ra.format_hms(2, false),
                    "dec_dms": c.dec.format_dms(2, false),
                }),
            }
        }
    };
    Ok(report)
}

fn run_constants(cmd: &ConstantsCmd) -> anyhow::Result<Report> {
    let describe = |c: &constants::Constant| {
        json!({
            "symbol": c.symbol,
            "name": c.name,
            "value": c.value,
            "unit": c.unit,
            "uncertainty": c.uncertainty,
            "reference": c.reference,
        })
    };
    let list = |items: Vec<&constants::Constant>| Report {
        plain: items
            .iter()
            .map(|c| format!("{:<16} {c}", c.symbol))
            .collect::<Vec<_>>()
            .join("\n"),
        json: json!(items.iter().map(|c| describe(c)).collect::<Vec<_>>()),
    };

    let report = match cmd {
        ConstantsCmd::List => list(constants::all().iter().collect()),
        ConstantsCmd::Search { query } => list(constants::search(query)),
        ConstantsCmd::Show { name } => {
            let c = constants::get(name)?;
            Report {
                plain: format!("{c}\n  reference: {}", c.reference),
                json: describe(c),
            }
        }
    };
    Ok(report)
}

fn run_sun(cmd: &SunCmd) -> anyhow::Result<Report> {
    let report = match cmd {
        SunCmd::Position { site } => {
            let jd = jd_or_now(site.jd);
            let pos = sun::sun_position(jd);
            Report {
                plain: format!(
                    "Sun at JD {:.5}\n  λ = {:.4}°  β = {:.4}°\n  RA {}  Dec {}\n  distance {:.6} AU\n  equation of time {:+.2} min",
                    jd.value(),
                    pos.longitude.degrees(),
                    pos.latitude.degrees(),
                    pos.ra.format_hms(2, true),
                    pos.dec.format_dms(2, true),
                    pos.distance_au,
                    pos.equation_of_time_min,
                ),
                json: json!({
                    "julian_date": jd.value(),
                    "ecliptic_longitude_degrees": pos.longitude.degrees(),
                    "ecliptic_latitude_degrees": pos.latitude.degrees(),
                    "ra_degrees": pos.ra.degrees(),
                    "dec_degrees": pos.dec.degrees(),
                    "distance_au": pos.distance_au,
                    "equation_of_time_minutes": pos.equation_of_time_min,
                }),
            }
        }
        SunCmd::Rise { site } => {
            let obs = site_observer(site)?;
            let rise = sun::sunrise(&obs, jd_or_now(site.jd));
            event_report("sunrise", rise)
        }
        SunCmd::Set { site } => {
            let obs = site_observer(site)?;
            let set = sun::sunset(&obs, jd_or_now(site.jd));
            event_report("sunset", set)
        }
        SunCmd::Noon { site } => {
            let obs = site_observer(site)?;
            let noon = sun::solar_noon(&obs, jd_or_now(site.jd));
            event_report("solar_noon", Some(noon))
        }
        SunCmd::Twilight { site } => {
            let obs = site_observer(site)?;
            let jd = jd_or_now(site.jd);
            let civil = sun::civil_twilight(&obs, jd);
            let nautical = sun::nautical_twilight(&obs, jd);
            let astro = sun::astronomical_twilight(&obs, jd);
            Report {
                plain: format!(
                    "Civil:        {}  /  {}\nNautical:     {}  /  {}\nAstronomical: {}  /  {}",
                    fmt_event(civil.0),
                    fmt_event(civil.1),
                    fmt_event(nautical.0),
                    fmt_event(nautical.1),
                    fmt_event(astro.0),
                    fmt_event(astro.1),
                ),
                json: json!({
                    "civil_morning_jd": json_event(civil.0),
                    "civil_evening_jd": json_event(civil.1),
                    "nautical_morning_jd": json_event(nautical.0),
                    "nautical_evening_jd": json_event(nautical.1),
                    "astronomical_morning_jd": json_event(astro.0),
                    "astronomical_evening_jd": json_event(astro.1),
                }),
            }
        }
        SunCmd::Altitude { site } => {
            let obs = site_observer(site)?;
            let jd = jd_or_now(site.jd);
            let alt = sun::solar_altitude(&obs, jd);
            Report {
                plain: format!("Solar altitude: {:.4}°", alt.degrees()),
                json: json!({ "altitude_degrees": alt.degrees(), "julian_date": jd.value() }),
            }
        }
    };
    Ok(report)
}

fn event_report(name: &str, event: Option<JulianDate>) -> Report {
    let mut map = serde_json::Map::new();
    map.insert(format!("{name}_jd"), json_event(event));
    Report {
        plain: format!("{name}: {}", fmt_event(event)),
        json: Value::Object(map),
    }
}

fn run_moon(cmd: &MoonCmd) -> anyhow::Result<Report> {
    let report = match cmd {
        MoonCmd::Position { site } => {
            let jd = jd_or_now(site.jd);
            let pos = moon::moon_position(jd);
            Report {
                plain: format!(
                    "Moon at JD {:.5}\n  λ = {:.4}°  β = {:.4}°\n  RA {}  Dec {}\n  distance {:.0} km\n  angular diameter {:.1}′  parallax {:.4}°",
                    jd.value(),
                    pos.longitude.degrees(),
                    pos.latitude.degrees(),
                    pos.ra.format_hms(2, true),
                    pos.dec.format_dms(2, true),
                    pos.distance_km,
                    pos.angular_diameter.arcminutes(),
                    pos.parallax.degrees(),
                ),
                json: json!({
                    "julian_date": jd.value(),
                    "ecliptic_longitude_degrees": pos.longitude.degrees(),
                    "ecliptic_latitude_degrees": pos.latitude.degrees(),
                    "ra_degrees": pos.ra.degrees(),
                    "dec_degrees": pos.dec.degrees(),
                    "distance_km": pos.distance_km,
                    "angular_diameter_arcmin": pos.angular_diameter.arcminutes(),
                    "parallax_degrees": pos.parallax.degrees(),
                }),
            }
        }
        MoonCmd::Phase { site } => {
            let jd = jd_or_now(site.jd);
            let phase = moon::moon_phase(jd);
            Report {
                plain: format!(
                    "{}  ({:.1}% illuminated, {:.1} days old, elongation {:.1}°)",
                    phase.name(),
                    phase.percent_illuminated,
                    phase.age_days,
                    phase.phase_angle,
                ),
                json: json!({
                    "julian_date": jd.value(),
                    "phase": phase.name(),
                    "phase_angle_degrees": phase.phase_angle,
                    "illumination": phase.illumination,
                    "percent_illuminated": phase.percent_illuminated,
                    "age_days": phase.age_days,
                }),
            }
        }
        MoonCmd::Rise { site } => {
            let obs = site_observer(site)?;
            event_report("moonrise", moon::moonrise(&obs, jd_or_now(site.jd)))
        }
        MoonCmd::Set { site } => {
            let obs = site_observer(site)?;
            event_report("moonset", moon::moonset(&obs, jd_or_now(site.jd)))
        }
        MoonCmd::Altitude { site } => {
            let obs = site_observer(site)?;
            let jd = jd_or_now(site.jd);
            let alt = moon::moon_altitude(&obs, jd);
            Report {
                plain: format!("Lunar altitude: {:.4}°", alt.degrees()),
                json: json!({ "altitude_degrees": alt.degrees(), "julian_date": jd.value() }),
            }
        }
        MoonCmd::Next { phase, jd } => {
            let target = match phase.to_ascii_lowercase().as_str() {
                "new" => MoonPhase::NewMoon,
                "first" => MoonPhase::FirstQuarter,
                "full" => MoonPhase::FullMoon,
                "last" => MoonPhase::LastQuarter,
                other => anyhow::bail!("unknown phase {other:?} (expected new|first|full|last)"),
            };
            let when = moon::next_phase(jd_or_now(*jd), target);
            Report {
                plain: format!("Next {}: {}", target.name(), fmt_event(Some(when))),
                json: json!({ "phase": target.name(), "jd": when.value() }),
            }
        }
    };
    Ok(report)
}

fn run_planets(cmd: &PlanetsCmd) -> anyhow::Result<Report> {
    let report = match cmd {
        PlanetsCmd::Position { planet, jd } => {
            let planet: Planet = planet.parse()?;
            let jd = jd_or_now(*jd);
            let pos = planets::planet_position(planet, jd)?;
            Report {
                plain: format!(
                    "{} {} at JD {:.5}\n  RA {}  Dec {}\n  distance {:.4} AU (heliocentric {:.4} AU)\n  magnitude {:+.2}  elongation {:.1}°  phase angle {:.1}°\n  illuminated {:.1}%  diameter {:.2}″",
                    pos.symbol(),
                    planet,
                    jd.value(),
                    pos.ra.format_hms(2, true),
                    pos.dec.format_dms(2, true),
                    pos.distance_au,
                    pos.helio_distance,
                    pos.magnitude,
                    pos.elongation.degrees(),
                    pos.phase_angle.degrees(),
                    pos.illumination() * 100.0,
                    pos.angular_diameter.arcseconds(),
                ),
                json: json!({
                    "planet": planet.name(),
                    "julian_date": jd.value(),
                    "ra_degrees": pos.ra.degrees(),
                    "dec_degrees": pos.dec.degrees(),
                    "distance_au": pos.distance_au,
                    "helio_distance_au": pos.helio_distance,
                    "helio_longitude_degrees": pos.helio_longitude.degrees(),
                    "helio_latitude_degrees": pos.helio_latitude.degrees(),
                    "magnitude": pos.magnitude,
                    "elongation_degrees": pos.elongation.degrees(),
                    "phase_angle_degrees": pos.phase_angle.degrees(),
                    "illumination": pos.illumination(),
                    "angular_diameter_arcsec": pos.angular_diameter.arcseconds(),
                }),
            }
        }
        PlanetsCmd::List { jd } => {
            let jd = jd_or_now(*jd);
            let positions = planets::all_planet_positions(jd)?;
            let mut lines = vec![format!("Planets at JD {:.5}", jd.value())];
            for pos in &positions {
                lines.push(format!(
                    "  {} {:<8} {:>13} {:>13}  {:6.3} AU  {:+5.1} mag  {:5.1}°",
                    pos.symbol(),
                    pos.planet.name(),
                    pos.ra.format_hms(0, false),
                    pos.dec.format_dms(0, false),
                    pos.distance_au,
                    pos.magnitude,
                    pos.elongation.degrees(),
                ));
            }
            Report {
                plain: lines.join("\n"),
                json: json!(positions
                    .iter()
                    .map(|pos| json!({
                        "planet": pos.planet.name(),
                        "ra_degrees": pos.ra.degrees(),
                        "dec_degrees": pos.dec.degrees(),
                        "distance_au": pos.distance_au,
                        "magnitude": pos.magnitude,
                        "elongation_degrees": pos.elongation.degrees(),
                    }))
                    .collect::<Vec<_>>()),
            }
        }
    };
    Ok(report)
}

fn run_vis(cmd: &VisCmd) -> anyhow::Result<Report> {
    let report = match cmd {
        VisCmd::Altitude { coord, site } => {
            let target = IcrsCoord::parse(coord)?;
            let obs = site_observer(site)?;
            let jd = jd_or_now(site.jd);
            let vis = visibility::compute_visibility(&target, &obs, jd);
            Report {
                plain: format!(
                    "Altitude {:.4}°  Azimuth {:.4}°  Airmass {}",
                    vis.altitude.degrees(),
                    vis.azimuth.degrees(),
                    if vis.airmass.is_finite() { format!("{:.3}", vis.airmass) } else { "—".into() },
                ),
                json: json!({
                    "altitude_degrees": vis.altitude.degrees(),
                    "azimuth_degrees": vis.azimuth.degrees(),
                    "airmass": if vis.airmass.is_finite() { json!(vis.airmass) } else { Value::Null },
                    "is_night": vis.is_night,
                }),
            }
        }
        VisCmd::Transit { coord, site } => {
            let target = IcrsCoord::parse(coord)?;
            let obs = site_observer(site)?;
            let jd = jd_or_now(site.jd);
            let transit = visibility::transit_time(&target, &obs, jd);
            let alt = visibility::transit_altitude(&target, &obs);
            Report {
                plain: format!(
                    "Transit: {}\nTransit altitude: {:.4}°{}",
                    fmt_event(Some(transit)),
                    alt.degrees(),
                    if alt.degrees() < 0.0 { "  (never rises)" } else { "" },
                ),
                json: json!({
                    "transit_jd": transit.value(),
                    "transit_altitude_degrees": alt.degrees(),
                }),
            }
        }
        VisCmd::Riseset { coord, horizon, site } => {
            let target = IcrsCoord::parse(coord)?;
            let obs = site_observer(site)?;
            let jd = jd_or_now(site.jd);
            let (rise, set) = visibility::target_rise_set(&target, &obs, jd, *horizon);
            let transit_alt = visibility::transit_altitude(&target, &obs);
            let status = if rise.is_some() {
                "rises and sets"
            } else if transit_alt.degrees() > *horizon {
                "circumpolar"
            } else {
                "never rises"
            };
            Report {
                plain: format!(
                    "Rise: {}\nSet:  {}\nStatus: {status}",
                    fmt_event(rise),
                    fmt_event(set),
                ),
                json: json!({
                    "rise_jd": json_event(rise),
                    "set_jd": json_event(set),
                    "status": status,
                    "horizon_degrees": horizon,
                }),
            }
        }
        VisCmd::Moonsep { coord, jd } => {
            let target = IcrsCoord::parse(coord)?;
            let jd = jd_or_now(*jd);
            let sep = visibility::moon_target_separation(&target, jd);
            Report {
                plain: format!("Moon separation: {:.3}°", sep.degrees()),
                json: json!({ "moon_separation_degrees": sep.degrees(), "julian_date": jd.value() }),
            }
        }
        VisCmd::Airmass { alt_deg } => {
            let x = visibility::airmass(Angle::from_degrees(*alt_deg));
            Report {
                plain: if x.is_finite() {
                    format!("Airmass at {alt_deg:.2}°: {x:.3}")
                } else {
                    format!("Airmass at {alt_deg:.2}°: — (below horizon)")
                },
                json: json!({
                    "altitude_degrees": alt_deg,
                    "airmass": if x.is_finite() { json!(x) } else { Value::Null },
                }),
            }
        }
    };
    Ok(report)
}
