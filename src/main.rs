use std::{error::Error, path::PathBuf, time::Duration};

use clap::Parser;
use graphical_interface::AppOptions;
use location_sim::{Route, WALKING_SPEED_MPS};
use logger::{Color, Logger};
use places::{load_places, sample_places, Coordinate, DEFAULT_RADIUS_KM};
use tracker::{RecomputePolicy, ScreenSettings};

const TICK_INTERVAL_MS: u64 = 1000;

/// Map of the places around you, filtered by a search radius.
#[derive(Debug, clap::Parser)]
#[clap(author, version, about)]
struct Args {
    /// Initial search radius, in kilometers
    #[clap(long, default_value_t = DEFAULT_RADIUS_KM)]
    radius: f64,

    /// Upper end of the radius slider, in kilometers
    #[clap(long, default_value_t = tracker::settings::SLIDER_MAX_KM)]
    max_radius: f64,

    /// CSV catalog with `name,latitude,longitude` columns
    #[clap(long)]
    places: Option<PathBuf>,

    /// Refresh the markers on every position fix, not only the first one
    #[clap(long)]
    every_fix: bool,

    /// Behave as if location access had already been granted
    #[clap(long)]
    grant_location: bool,

    /// Directory for the session log
    #[clap(long)]
    log_dir: Option<PathBuf>,

    /// Walking speed of the simulated device, in meters per second
    #[clap(long, default_value_t = WALKING_SPEED_MPS)]
    speed: f64,

    /// Simulated seconds per real second
    #[clap(long, default_value_t = 1)]
    time_rate: i64,

    /// Maximum GPS noise per fix, in meters
    #[clap(long, default_value_t = 0.0)]
    jitter: f64,
}

/// A loop through the sample places, starting and ending at the park.
fn default_route() -> Vec<Coordinate> {
    vec![
        Coordinate::from_lat_lon(-26.1952, 28.0436),
        Coordinate::from_lat_lon(-26.1984, 28.0478),
        Coordinate::from_lat_lon(-26.2051, 28.0495),
        Coordinate::from_lat_lon(-26.2023, 28.0399),
        Coordinate::from_lat_lon(-26.1905, 28.0410),
        Coordinate::from_lat_lon(-26.1952, 28.0436),
    ]
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let logger = match &args.log_dir {
        Some(dir) => Logger::new(dir, "desktop")?,
        None => Logger::silent(),
    };

    let places = match &args.places {
        Some(path) => load_places(path)?,
        None => sample_places(),
    };
    let _ = logger.info(
        &format!("Loaded {} places", places.len()),
        Color::Green,
        true,
    );

    let settings = ScreenSettings {
        default_radius_km: args.radius,
        slider_max_km: args.max_radius,
        policy: if args.every_fix {
            RecomputePolicy::EveryFix
        } else {
            RecomputePolicy::FirstFixOnly
        },
        ..Default::default()
    };
    settings.validate()?;

    let route = Route::new(default_route(), args.speed)?;

    graphical_interface::run(AppOptions {
        places,
        settings,
        grant_location: args.grant_location,
        route,
        time_rate: args.time_rate,
        tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
        jitter_m: args.jitter,
        logger,
    })?;

    Ok(())
}
