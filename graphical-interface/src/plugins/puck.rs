use egui::{include_image, Color32, Image, Rect, Response, Stroke, Vec2};
use walkers::{Plugin, Projector, Position};

const PUCK_SIZE: f32 = 28.0;

/// The device location, drawn as an arrow pointing along its heading.
pub struct LocationPuck {
    position: Option<Position>,
    heading: f64,
    focal_point: Option<Position>,
}

impl LocationPuck {
    pub fn new(position: Option<Position>, heading: f64, focal_point: Option<Position>) -> Self {
        Self {
            position,
            heading,
            focal_point,
        }
    }
}

impl Plugin for LocationPuck {
    fn run(self: Box<Self>, ui: &mut egui::Ui, _response: &Response, projector: &Projector) {
        if let Some(focal_point) = self.focal_point {
            ui.painter().circle_stroke(
                projector.project(focal_point).to_pos2(),
                PUCK_SIZE / 2.0 + 6.0,
                Stroke::new(1.5, Color32::from_gray(90)),
            );
        }

        let Some(position) = self.position else {
            return;
        };

        let symbol_size = Vec2::splat(PUCK_SIZE);
        let rect = Rect::from_center_size(projector.project(position).to_pos2(), symbol_size);

        let image = Image::new(include_image!(r"../../assets/location-puck.svg"))
            .fit_to_exact_size(symbol_size)
            .rotate(self.heading.to_radians() as f32, Vec2::splat(0.5));

        ui.put(rect, image);
    }
}
