// Mutuals - gui.rs
//
// Top-level eframe::App implementation.
// Each frame: apply finished fetches, expire the error banner, render the
// panels, then apply the actions the panels collected.

use crate::app::session::SessionController;
use crate::ui::{self, UiAction, UiState};
use crate::util::constants;
use std::time::Duration;

/// The Mutuals application.
pub struct MutualsApp {
    pub session: SessionController,
    pub ui_state: UiState,
}

impl MutualsApp {
    /// Create a new application instance around an already-seeded session.
    pub fn new(session: SessionController) -> Self {
        Self {
            session,
            ui_state: UiState::default(),
        }
    }

    fn apply(&mut self, action: UiAction) {
        let result = match action {
            UiAction::Add(name) => self.session.add_user(&name),
            UiAction::Remove(name) => {
                self.session.remove_user(&name);
                Ok(())
            }
            UiAction::Rename { old, new } => self.session.edit_user(&old, &new),
        };
        // Rejections are already shown in the banner by the controller.
        if let Err(e) = result {
            tracing::debug!(error = %e, "UI action rejected");
        }
    }
}

impl eframe::App for MutualsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let applied = self.session.poll();
        self.session.tick();

        let mut actions: Vec<UiAction> = Vec::new();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui::panels::status::render(ui, &self.session);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label("Followers must follow all of the users");
            ui.add_space(8.0);
            ui.columns(2, |cols| {
                ui::panels::users::render(
                    &mut cols[0],
                    &self.session,
                    &mut self.ui_state,
                    &mut actions,
                );
                ui::panels::followers::render(&mut cols[1], &self.session);
            });
        });

        let had_actions = !actions.is_empty();
        for action in actions {
            self.apply(action);
        }

        if applied > 0 || had_actions {
            ctx.request_repaint();
        }
        // Outcomes arrive on a channel egui knows nothing about; keep
        // polling while anything is in flight.
        if self.session.loading() {
            ctx.request_repaint_after(Duration::from_millis(
                constants::LOADING_REPAINT_INTERVAL_MS,
            ));
        }
        if let Some(remaining) = self.session.error_remaining() {
            ctx.request_repaint_after(remaining);
        }
    }
}
