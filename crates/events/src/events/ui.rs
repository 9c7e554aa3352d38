use retrofit_types::Selection;
use serde::{Deserialize, Serialize};

/// Events the UI layer reacts to directly
///
/// These replace direct view mutation from completion handlers: the UI
/// thread drains the channel and applies the changes itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiEvent {
    /// A newer build than the running one is available; show the update
    /// badge. Emitted once per manifest installation.
    UpdateBadgeVisible { visible: bool },

    /// The chosen app (or `iTunes` flavor) changed
    SelectionChanged {
        selection: Selection,
        display_name: String,
    },
}
