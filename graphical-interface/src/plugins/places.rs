use std::{cell::RefCell, rc::Rc};

use egui::{include_image, Align2, Color32, FontId, Image, ImageSource, Rect, Response, Vec2};
use tracker::{settings::PIN_ICON, Marker};
use walkers::{Plugin, Projector};

use crate::state::{to_position, SelectionState};

const SYMBOL_SIZE: f32 = 24.0;

/// Draws the markers of the places inside the search radius.
pub struct Places<'a> {
    markers: &'a [Marker],
    selection_state: Rc<RefCell<SelectionState>>,
}

impl<'a> Places<'a> {
    pub fn new(markers: &'a [Marker], selection_state: Rc<RefCell<SelectionState>>) -> Self {
        Self {
            markers,
            selection_state,
        }
    }
}

impl Plugin for Places<'_> {
    fn run(self: Box<Self>, ui: &mut egui::Ui, _response: &Response, projector: &Projector) {
        for marker in self.markers {
            draw_marker(
                marker,
                ui,
                projector,
                &mut self.selection_state.borrow_mut(),
            );
        }
    }
}

fn draw_marker(
    marker: &Marker,
    ui: &mut egui::Ui,
    projector: &Projector,
    selection_state: &mut SelectionState,
) {
    let anchor = projector.project(to_position(marker.coordinate)).to_pos2();

    let symbol_size = Vec2::splat(SYMBOL_SIZE);

    // The tip of the pin sits on the place.
    let rect = Rect::from_min_size(
        anchor - Vec2::new(symbol_size.x / 2.0, symbol_size.y),
        symbol_size,
    );

    let response = ui.allocate_rect(rect, egui::Sense::click());

    let highlighted = response.hovered() || selection_state.is_selected(&marker.label);

    match icon_source(&marker.icon, highlighted) {
        Some(source) => {
            ui.put(rect, Image::new(source).fit_to_exact_size(symbol_size));
        }
        // Unknown icons fall back to a plain dot on the place.
        None => {
            let fill = if highlighted {
                Color32::from_rgb(31, 111, 209)
            } else {
                Color32::from_rgb(217, 54, 62)
            };
            ui.painter().circle_filled(anchor, SYMBOL_SIZE / 4.0, fill);
        }
    }

    // Offsets are given in ems of the label font.
    let offset = Vec2::new(marker.text_offset[0], marker.text_offset[1]) * marker.text_size;
    let text_color = Color32::from_hex(&marker.text_color).unwrap_or(Color32::BLACK);

    ui.painter().text(
        anchor + offset,
        Align2::CENTER_BOTTOM,
        &marker.label,
        FontId::proportional(marker.text_size),
        text_color,
    );

    if response.clicked() {
        selection_state.toggle_place_selection(&marker.label);
    }
}

/// Artwork for a marker icon name.
fn icon_source(icon: &str, highlighted: bool) -> Option<ImageSource<'static>> {
    match (icon, highlighted) {
        (PIN_ICON, false) => Some(include_image!(r"../../assets/place-pin.svg")),
        (PIN_ICON, true) => Some(include_image!(r"../../assets/place-pin-hovered.svg")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_icon_has_artwork() {
        assert!(icon_source(PIN_ICON, false).is_some());
        assert!(icon_source(PIN_ICON, true).is_some());
    }

    #[test]
    fn test_unknown_icon_has_no_artwork() {
        assert!(icon_source("rocket", false).is_none());
        assert!(icon_source("", true).is_none());
    }
}
