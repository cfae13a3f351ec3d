// Mutuals - ui/panels/status.rs
//
// Status bar: loading indicator and the transient error banner.

use crate::app::session::SessionController;

const ERROR_COLOUR: egui::Color32 = egui::Color32::from_rgb(220, 60, 60);

pub fn render(ui: &mut egui::Ui, session: &SessionController) {
    ui.horizontal(|ui| {
        if session.loading() {
            ui.spinner();
            ui.label("Loading...");
        }
        if let Some(message) = session.error() {
            ui.colored_label(ERROR_COLOUR, format!("{message}!"));
        }
    });
}
