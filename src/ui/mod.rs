// Mutuals - ui/mod.rs
//
// UI layer: presentation only.
// Dependencies: app (read-only session access), core (read-only models), egui.
// Must NOT depend on: platform, direct I/O.
//
// Panels never mutate the session. They record what the user asked for as
// `UiAction`s, which `gui.rs` applies through the controller after the frame.

pub mod panels;

/// A user request captured during rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Track a new username (raw input; the controller trims and validates).
    Add(String),
    /// Stop tracking a username.
    Remove(String),
    /// Replace `old` with `new`.
    Rename { old: String, new: String },
}

/// Editing state that only exists in the UI (input buffers, open editors).
#[derive(Debug, Default)]
pub struct UiState {
    /// The "Add user" input is open.
    pub adding: bool,
    pub add_input: String,

    /// Login being renamed and the current edit buffer.
    pub renaming: Option<(String, String)>,

    /// Focus the freshly opened input on the next frame.
    pub request_focus: bool,
}

impl UiState {
    pub fn open_add(&mut self) {
        self.renaming = None;
        self.adding = true;
        self.add_input.clear();
        self.request_focus = true;
    }

    pub fn close_add(&mut self) {
        self.adding = false;
        self.add_input.clear();
    }

    pub fn open_rename(&mut self, login: &str) {
        self.adding = false;
        self.renaming = Some((login.to_string(), login.to_string()));
        self.request_focus = true;
    }

    pub fn is_renaming(&self, login: &str) -> bool {
        self.renaming.as_ref().is_some_and(|(old, _)| old == login)
    }
}
