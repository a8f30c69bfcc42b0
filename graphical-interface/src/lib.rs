mod errors;
mod map;
mod plugins;
mod state;
mod widgets;
mod windows;

use std::time::Duration;

use location_sim::Route;
use logger::Logger;
use places::Place;
use tracker::ScreenSettings;

pub use errors::AppError;
use map::NearbyApp;

/// Everything the desktop app needs to start.
pub struct AppOptions {
    pub places: Vec<Place>,
    pub settings: ScreenSettings,
    /// Skip the permission dialog, as if location access was granted earlier.
    pub grant_location: bool,
    /// Path walked by the simulated device.
    pub route: Route,
    /// Simulated seconds per tick.
    pub time_rate: i64,
    pub tick_interval: Duration,
    /// Maximum noise added to each fix, in meters.
    pub jitter_m: f64,
    pub logger: Logger,
}

pub fn run(options: AppOptions) -> Result<(), eframe::Error> {
    eframe::run_native(
        "Nearby Places",
        Default::default(),
        Box::new(|cc| Ok(Box::new(NearbyApp::new(cc.egui_ctx.clone(), options)?))),
    )
}
