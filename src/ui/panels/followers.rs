// Mutuals - ui/panels/followers.rs
//
// Common-follower list.

use crate::app::session::SessionController;
use crate::core::model::{FollowerIdentity, PendingPolicy};

/// Render the common-follower column.
pub fn render(ui: &mut egui::Ui, session: &SessionController) {
    let common = session.common_followers();

    ui.heading(format!("Common followers: {}", common.len()));
    ui.separator();

    if session.pending_policy() == PendingPolicy::RequireAllResolved && session.loading() {
        ui.label(egui::RichText::new("Waiting for every user to load...").weak());
    }

    egui::ScrollArea::vertical()
        .id_salt("common_followers")
        .auto_shrink([false, true])
        .show(ui, |ui| {
            for follower in &common {
                ui.hyperlink_to(follower.login.as_str(), profile_url(follower));
            }
        });
}

/// Browser URL for a follower; the followers endpoint normally supplies it.
fn profile_url(follower: &FollowerIdentity) -> String {
    if follower.html_url.is_empty() {
        format!("https://github.com/{}", follower.login)
    } else {
        follower.html_url.clone()
    }
}
