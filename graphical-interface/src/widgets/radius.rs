use std::{ops::RangeInclusive, rc::Rc};

use egui::{Align2, RichText, Slider};
use tracker::RadiusSlider;

/// The search radius slider with its readout.
pub struct WidgetRadius {
    slider: Rc<RadiusSlider>,
    range: RangeInclusive<f64>,
}

impl WidgetRadius {
    pub fn new(slider: Rc<RadiusSlider>, min_km: f64, max_km: f64) -> Self {
        Self {
            slider,
            range: min_km..=max_km,
        }
    }

    /// Hidden until the screen has set up the slider.
    pub fn show(&self, ctx: &egui::Context) {
        let label = self.slider.label();
        if label.is_empty() {
            return;
        }

        egui::Window::new("Search radius")
            .resizable(false)
            .collapsible(false)
            .title_bar(false)
            .anchor(Align2::RIGHT_TOP, [-10., 10.])
            .show(ctx, |ui| {
                ui.label(RichText::new(label).size(16.0).strong());

                let mut value = self.slider.value();
                let response = ui.add(
                    Slider::new(&mut value, self.range.clone())
                        .show_value(false)
                        .step_by(0.5),
                );

                if response.changed() {
                    self.slider.slide(value);
                }
            });
    }
}
