use serde::{Deserialize, Serialize};

/// Configuration lifecycle events emitted by the support-configuration service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConfigEvent {
    /// Remote manifest refresh started
    RefreshStarted { url: String },

    /// Remote manifest refresh completed and the manifest was installed
    RefreshCompleted { url: String, ticket: u64 },

    /// Remote manifest refresh failed; the previous manifest is retained
    RefreshFailed { url: String, error: String },

    /// A refresh completed after a newer one had already been installed;
    /// its manifest was dropped
    RefreshSuperseded { url: String, ticket: u64 },

    /// Catalog scan found the `iTunes` installer package
    PackageResolved { url: String },
}
