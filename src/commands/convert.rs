use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

use inav_mission::form::{FormDefaults, MissionFormState};
use inav_mission::mission::Mission;
use inav_mission::units::UnitSystem;
use inav_mission::utils;

/// Convert an EdgeTX telemetry log into an iNAV mission
#[derive(clap::Parser)]
pub struct Opts {
    /// EdgeTX telemetry log (CSV)
    input: PathBuf,
    #[clap(short = 'o', long, default_value = ".", env = "INAV_MISSION_OUT_DIR")]
    out_dir: PathBuf,
    /// Mission name, defaults to `mission_<timestamp>`
    #[clap(long)]
    name: Option<String>,
    /// Fixed altitude for all waypoints instead of the logged altitude
    #[clap(long)]
    alt: Option<String>,
    /// Cruise speed (km/h, or mph with --imperial)
    #[clap(long)]
    speed: Option<String>,
    /// Minimum distance between waypoints (m, or ft with --imperial)
    #[clap(long)]
    spacing: Option<String>,
    /// Maximum number of waypoints
    #[clap(long)]
    max_wps: Option<String>,
    /// Interpret altitude, speed and spacing in imperial units
    #[clap(long)]
    imperial: bool,
    /// JSON file overriding the form defaults
    #[clap(long, env = "INAV_MISSION_DEFAULTS")]
    defaults: Option<PathBuf>,
}

pub fn execute(opts: Opts) -> Result<(), inav_mission::Error> {
    let start = Instant::now();
    let now = utils::now();

    let defaults = FormDefaults::load(opts.defaults.as_deref(), now)?;
    let mut form = MissionFormState::new(&defaults);
    if opts.imperial {
        // same as flipping the toggle before typing, converts the defaults
        form.set_unit_system(UnitSystem::Imperial);
    }

    if let Some(name) = opts.name {
        form.mission_name = name;
    }
    if let Some(alt) = opts.alt {
        form.custom_alt = alt;
    }
    if let Some(speed) = opts.speed {
        form.cruise_speed = speed;
    }
    if let Some(spacing) = opts.spacing {
        form.spacing = spacing;
    }
    if let Some(max_wps) = opts.max_wps {
        form.max_waypoints = max_wps;
    }

    let params = form.mission_params(&defaults.mission_name)?;
    tracing::debug!(?params, "mission parameters");

    let file = File::open(&opts.input)?;
    let mission = Mission::from_log(BufReader::new(file), &params, now)?;

    let path = opts.out_dir.join(&params.filename);
    std::fs::write(&path, mission.to_xml()?)?;
    tracing::info!(path = %path.display(), waypoints = mission.items.len(), "wrote mission");

    println!("Took: {:.4}s", start.elapsed().as_secs_f64());

    Ok(())
}
