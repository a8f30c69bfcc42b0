use std::time::Instant;

use egui::{Align2, Color32, RichText};

use crate::state::SharedNotices;

/// Draws the toasts that have not expired yet, stacked at the bottom.
pub fn show_notices(ctx: &egui::Context, notices: &SharedNotices) {
    let active = notices.0.borrow_mut().active(Instant::now());
    if active.is_empty() {
        return;
    }

    egui::Area::new("notices".into())
        .anchor(Align2::CENTER_BOTTOM, [0., -40.])
        .interactable(false)
        .show(ctx, |ui| {
            for text in active {
                egui::Frame::none()
                    .fill(Color32::from_black_alpha(200))
                    .rounding(12.0)
                    .inner_margin(egui::Margin::symmetric(14.0, 8.0))
                    .show(ui, |ui| {
                        ui.label(RichText::new(text).color(Color32::WHITE).size(15.0));
                    });
                ui.add_space(6.0);
            }
        });
}
