// Mutuals - ui/panels/users.rs
//
// Tracked-user list: one row per user with a profile link, follower
// count, rename and (when enough users are tracked) remove controls,
// followed by the "Add user" affordance.

use crate::app::session::SessionController;
use crate::core::model::TrackedUser;
use crate::ui::{UiAction, UiState};

/// Render the tracked-user column.
pub fn render(
    ui: &mut egui::Ui,
    session: &SessionController,
    ui_state: &mut UiState,
    actions: &mut Vec<UiAction>,
) {
    ui.heading(format!("Users: {}", session.registry().len()));
    ui.separator();

    let removable = session.is_removable();

    for user in session.users() {
        ui.horizontal(|ui| {
            if ui_state.is_renaming(&user.login) {
                render_rename(ui, ui_state, actions);
                return;
            }

            render_user(ui, user);

            if ui
                .small_button("\u{270f}")
                .on_hover_text("Rename")
                .clicked()
            {
                ui_state.open_rename(&user.login);
            }
            if removable
                && ui
                    .small_button("x")
                    .on_hover_text("Stop tracking")
                    .clicked()
            {
                actions.push(UiAction::Remove(user.login.clone()));
            }
        });
    }

    ui.add_space(6.0);
    render_add(ui, ui_state, actions);
}

/// Link to the profile with a detail tooltip, or a spinner while pending.
fn render_user(ui: &mut egui::Ui, user: &TrackedUser) {
    let Some(profile) = user.profile() else {
        ui.spinner();
        ui.label(user.login.as_str());
        return;
    };

    let info = profile.info_lines();
    let hover = if info.is_empty() {
        profile.login.clone()
    } else {
        info.join("\n")
    };
    ui.hyperlink_to(profile.login.as_str(), profile.html_url.as_str())
        .on_hover_text(hover);

    if profile.followers > 0 {
        ui.label(egui::RichText::new(format!("{} fans", profile.followers)).weak());
    }
}

fn render_rename(ui: &mut egui::Ui, ui_state: &mut UiState, actions: &mut Vec<UiAction>) {
    let Some((old, buffer)) = ui_state.renaming.as_mut() else {
        return;
    };

    let response = ui.add(egui::TextEdit::singleline(buffer).desired_width(160.0));
    if std::mem::take(&mut ui_state.request_focus) {
        response.request_focus();
    }

    // Enter submits; any other focus loss (Escape, click elsewhere) cancels.
    if response.lost_focus() {
        if ui.input(|i| i.key_pressed(egui::Key::Enter)) && buffer.as_str() != old.as_str() {
            actions.push(UiAction::Rename {
                old: old.clone(),
                new: buffer.clone(),
            });
        }
        ui_state.renaming = None;
    }
}

fn render_add(ui: &mut egui::Ui, ui_state: &mut UiState, actions: &mut Vec<UiAction>) {
    if !ui_state.adding {
        if ui.button("Add user").clicked() {
            ui_state.open_add();
        }
        return;
    }

    let response = ui.add(
        egui::TextEdit::singleline(&mut ui_state.add_input)
            .hint_text("Enter Username")
            .desired_width(200.0),
    );
    if std::mem::take(&mut ui_state.request_focus) {
        response.request_focus();
    }

    if response.lost_focus() {
        if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            actions.push(UiAction::Add(std::mem::take(&mut ui_state.add_input)));
        }
        ui_state.close_add();
    }
}
