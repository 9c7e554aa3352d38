use serde::{Deserialize, Serialize};

// Declare all domain modules
pub mod config;
pub mod general;
pub mod ui;

// Re-export all domain events
pub use config::ConfigEvent;
pub use general::GeneralEvent;
pub use ui::UiEvent;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// General utility events (warnings, debug logs)
    General(GeneralEvent),

    /// Configuration lifecycle events (manifest refresh, catalog resolution)
    Config(ConfigEvent),

    /// Events the UI layer reacts to directly
    Ui(UiEvent),
}
