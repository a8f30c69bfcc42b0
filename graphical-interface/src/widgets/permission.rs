use std::{cell::RefCell, rc::Rc};

use egui::{Align2, RichText};
use tracker::{Permission, PermissionCallback, PermissionGate, PermissionResponse};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Choice {
    Precise,
    Approximate,
    Deny,
}

#[derive(Default)]
struct PermissionDialog {
    granted: bool,
    pending: Option<(Vec<Permission>, PermissionCallback)>,
}

/// Runtime permission prompt. Requests stay pending until the user answers
/// the dialog.
#[derive(Clone, Default)]
pub struct DialogGate(Rc<RefCell<PermissionDialog>>);

impl DialogGate {
    /// `granted` marks location access as already given in an earlier run.
    pub fn new(granted: bool) -> Self {
        Self(Rc::new(RefCell::new(PermissionDialog {
            granted,
            pending: None,
        })))
    }

    pub fn is_pending(&self) -> bool {
        self.0.borrow().pending.is_some()
    }

    /// Draws the prompt while a request is pending.
    ///
    /// Once the user picks an answer the pending callback is handed back
    /// together with the response, so the caller can run it without holding
    /// the dialog.
    pub fn show(&self, ctx: &egui::Context) -> Option<(PermissionCallback, PermissionResponse)> {
        if !self.is_pending() {
            return None;
        }

        let mut choice = None;

        egui::Window::new("Location access")
            .resizable(false)
            .movable(false)
            .collapsible(false)
            .anchor(Align2::CENTER_CENTER, [0., 0.])
            .show(ctx, |ui| {
                ui.label(
                    RichText::new("Allow Nearby Places to access this device's location?")
                        .size(16.0),
                );
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button("Precise").clicked() {
                        choice = Some(Choice::Precise);
                    }
                    if ui.button("Approximate").clicked() {
                        choice = Some(Choice::Approximate);
                    }
                    if ui.button("Don't allow").clicked() {
                        choice = Some(Choice::Deny);
                    }
                });
            });

        self.answer(choice?)
    }

    fn answer(&self, choice: Choice) -> Option<(PermissionCallback, PermissionResponse)> {
        let mut dialog = self.0.borrow_mut();
        let (permissions, callback) = dialog.pending.take()?;
        let response = response_for(choice, &permissions);
        dialog.granted = response.location_granted();
        Some((callback, response))
    }
}

impl PermissionGate for DialogGate {
    fn has_location_permission(&self) -> bool {
        self.0.borrow().granted
    }

    fn request(&mut self, permissions: &[Permission], on_result: PermissionCallback) {
        self.0.borrow_mut().pending = Some((permissions.to_vec(), on_result));
    }
}

fn response_for(choice: Choice, permissions: &[Permission]) -> PermissionResponse {
    let results: Vec<(Permission, bool)> = permissions
        .iter()
        .map(|permission| {
            let granted = match choice {
                Choice::Precise => true,
                Choice::Approximate => *permission == Permission::CoarseLocation,
                Choice::Deny => false,
            };
            (*permission, granted)
        })
        .collect();

    PermissionResponse::new(&results)
}
