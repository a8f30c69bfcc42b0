use egui::Widget;
use egui_extras::{Column, TableBuilder};
use places::{Coordinate, Place};

use crate::state::SelectionState;

/// Lists the places currently shown on the map, nearest first.
pub struct WidgetPlaces<'a, 'b> {
    pub places: &'a [Place],
    pub observer: Option<Coordinate>,
    pub selection_state: &'b mut SelectionState,
}

impl<'a, 'b> WidgetPlaces<'a, 'b> {
    pub fn new(
        places: &'a [Place],
        observer: Option<Coordinate>,
        selection_state: &'b mut SelectionState,
    ) -> Self {
        Self {
            places,
            observer,
            selection_state,
        }
    }
}

impl Widget for WidgetPlaces<'_, '_> {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let response = ui.allocate_response(egui::vec2(0., 0.), egui::Sense::hover());

        let mut rows: Vec<(&Place, Option<f64>)> = self
            .places
            .iter()
            .map(|place| {
                let distance = self.observer.map(|observer| place.distance_from(&observer));
                (place, distance)
            })
            .collect();
        rows.sort_by(|a, b| a.1.unwrap_or(0.0).total_cmp(&b.1.unwrap_or(0.0)));

        egui::Window::new("Nearby places")
            .resizable(false)
            .movable(false)
            .collapsible(true)
            .fixed_pos([20., 20.])
            .show(ui.ctx(), |ui| {
                if self.observer.is_none() {
                    ui.label("Waiting for the device location...");
                    return;
                }

                if rows.is_empty() {
                    ui.label("Nothing inside the search radius.");
                    return;
                }

                egui::ScrollArea::vertical().show(ui, |ui| {
                    TableBuilder::new(ui)
                        .column(Column::remainder())
                        .column(Column::auto())
                        .sense(egui::Sense::click())
                        .header(20.0, |mut header| {
                            header.col(|ui| {
                                ui.strong("Name");
                            });
                            header.col(|ui| {
                                ui.strong("Distance");
                            });
                        })
                        .body(|mut body| {
                            for (place, distance) in &rows {
                                body.row(18.0, |mut row| {
                                    row.set_selected(self.selection_state.is_selected(&place.name));

                                    row.col(|ui| {
                                        ui.label(&place.name);
                                    });

                                    row.col(|ui| {
                                        ui.label(format_distance(distance.unwrap_or(0.0)));
                                    });

                                    if row.response().clicked() {
                                        self.selection_state.toggle_place_selection(&place.name);
                                    }
                                });
                            }
                        });
                });
            });

        response
    }
}

fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{:.0} m", meters)
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}
