use egui::{Align2, Color32, RichText};
use location_sim::Fix;
use tracker::TrackingState;

/// Camera and location readout, with a switch to hold the simulated walk.
pub struct WidgetStatus<'a> {
    pub tracking: TrackingState,
    pub last_fix: Option<&'a Fix>,
    pub camera_bearing: f64,
    pub walk_paused: bool,
}

impl WidgetStatus<'_> {
    /// Returns `true` when the user asked to pause or resume the walk.
    pub fn show(&self, ctx: &egui::Context) -> bool {
        let mut toggle_walk = false;

        egui::Window::new("Status")
            .resizable(false)
            .collapsible(true)
            .anchor(Align2::RIGHT_BOTTOM, [-10., -10.])
            .show(ctx, |ui| {
                let (text, color) = describe(self.tracking);
                ui.label(RichText::new(text).color(color).strong());

                match self.last_fix {
                    Some(fix) => {
                        ui.label(format!(
                            "Last fix: {:.5}, {:.5} at {}",
                            fix.coordinate.latitude,
                            fix.coordinate.longitude,
                            fix.recorded_at.format("%H:%M:%S")
                        ));
                        ui.label(format!("Heading: {:.0}°", fix.bearing));
                    }
                    None => {
                        ui.label("No fix yet");
                    }
                }

                ui.label(format!("Camera bearing: {:.0}°", self.camera_bearing));

                ui.add_space(6.0);
                if ui.button(walk_button_text(self.walk_paused)).clicked() {
                    toggle_walk = true;
                }
            });

        toggle_walk
    }
}

fn walk_button_text(walk_paused: bool) -> &'static str {
    if walk_paused {
        "Resume walk"
    } else {
        "Pause walk"
    }
}

fn describe(tracking: TrackingState) -> (&'static str, Color32) {
    match tracking {
        TrackingState::Idle => ("Loading map", Color32::GRAY),
        TrackingState::AwaitingPermission => ("Waiting for permission", Color32::YELLOW),
        TrackingState::Tracking => ("Following location", Color32::LIGHT_GREEN),
        TrackingState::Dismissed => ("Tracking dismissed", Color32::LIGHT_GRAY),
        TrackingState::Denied => ("Location unavailable", Color32::LIGHT_RED),
        TrackingState::TornDown => ("Closed", Color32::GRAY),
    }
}
