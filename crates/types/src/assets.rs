//! Image-asset references
//!
//! The service never touches image data; it hands the UI a reference to a
//! bundled asset by name and the UI resolves it to a real image.

/// Reference to an image asset bundled with the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageAsset {
    name: &'static str,
}

impl ImageAsset {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// Asset name as it appears in the application bundle
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl std::fmt::Display for ImageAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}
