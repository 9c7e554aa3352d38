//! Selection state and the derived lookup table
//!
//! Everything in here is a pure function of `(app, itunes_flavor)`.
//! The `iTunes` flavor is only meaningful while `iTunes` is the chosen app;
//! `effective_flavor` applies that rule once and every accessor goes
//! through it.

use crate::assets::ImageAsset;
use serde::{Deserialize, Serialize};

/// The legacy application the user intends to patch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppKind {
    Aperture,
    Iphoto,
    Itunes,
}

impl std::fmt::Display for AppKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Aperture => write!(f, "Aperture"),
            Self::Iphoto => write!(f, "iPhoto"),
            Self::Itunes => write!(f, "iTunes"),
        }
    }
}

/// Which `iTunes` build the user picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItunesFlavor {
    DarkMode,
    AppStore,
    CoverFlow,
}

/// Current user selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<AppKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itunes_flavor: Option<ItunesFlavor>,
}

impl Selection {
    #[must_use]
    pub const fn new(app: Option<AppKind>, itunes_flavor: Option<ItunesFlavor>) -> Self {
        Self { app, itunes_flavor }
    }

    /// The flavor, masked out unless `iTunes` is the chosen app
    #[must_use]
    pub fn effective_flavor(&self) -> Option<ItunesFlavor> {
        match self.app {
            Some(AppKind::Itunes) => self.itunes_flavor,
            _ => None,
        }
    }

    /// Display name of the chosen app, "Untitled" when nothing is chosen
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self.app {
            Some(AppKind::Aperture) => "Aperture",
            Some(AppKind::Iphoto) => "iPhoto",
            Some(AppKind::Itunes) => "iTunes",
            None => "Untitled",
        }
    }

    /// Executable name inside the app bundle; identical to the display name
    /// for every supported app
    #[must_use]
    pub fn binary_name(&self) -> &'static str {
        self.display_name()
    }

    /// Bundle identifier the app ships with
    #[must_use]
    pub fn existing_bundle_id(&self) -> Option<&'static str> {
        match self.app {
            Some(AppKind::Aperture) => Some("com.apple.Aperture"),
            Some(AppKind::Iphoto) => Some("com.apple.iPhoto"),
            Some(AppKind::Itunes) => Some("com.apple.iTunes"),
            None => None,
        }
    }

    /// Bundle identifier written into the patched app
    ///
    /// The `iTunes` identifiers are reserved: no patching step reads them
    /// today, but they stay in the table as constants.
    #[must_use]
    pub fn patched_bundle_id(&self) -> Option<&'static str> {
        match self.app {
            Some(AppKind::Aperture) => Some("com.apple.Aperture3"),
            Some(AppKind::Iphoto) => Some("com.apple.iPhoto9"),
            Some(AppKind::Itunes) => match self.effective_flavor() {
                Some(ItunesFlavor::DarkMode) => Some("com.apple.iTunes129"),
                Some(ItunesFlavor::AppStore) => Some("com.apple.iTunes126"),
                Some(ItunesFlavor::CoverFlow) => Some("com.apple.iTunes10"),
                None => None,
            },
            None => None,
        }
    }

    /// Version string written into the patched app
    #[must_use]
    pub fn patched_version_string(&self) -> Option<&'static str> {
        match self.app {
            Some(AppKind::Aperture | AppKind::Iphoto) => Some("99.9"),
            Some(AppKind::Itunes) => match self.effective_flavor() {
                Some(ItunesFlavor::DarkMode) => Some("13.9.5"),
                Some(ItunesFlavor::AppStore) => Some("13.6.5"),
                Some(ItunesFlavor::CoverFlow) => Some("13.7"),
                None => None,
            },
            None => None,
        }
    }

    /// App versions the patch is known to work with
    #[must_use]
    pub fn compatible_versions(&self) -> &'static [&'static str] {
        match self.app {
            Some(AppKind::Aperture) => &["3.6"],
            Some(AppKind::Iphoto) => &["9.6.1", "9.6"],
            Some(AppKind::Itunes) => match self.effective_flavor() {
                Some(ItunesFlavor::DarkMode) => &["12.9.5"],
                Some(ItunesFlavor::AppStore) => &["12.6.5"],
                Some(ItunesFlavor::CoverFlow) => &["10.7"],
                None => &[],
            },
            None => &[],
        }
    }

    /// Verb for the headline progress copy
    #[must_use]
    pub fn main_action(&self) -> &'static str {
        match self.app {
            Some(AppKind::Itunes) => "installing",
            _ => "modifying",
        }
    }

    /// Verb for the detailed progress copy
    #[must_use]
    pub fn detail_action(&self) -> &'static str {
        match self.app {
            Some(AppKind::Itunes) => "downloading and installing",
            _ => "installing support files for",
        }
    }

    /// Human time estimate for the whole operation
    #[must_use]
    pub fn time_estimate(&self) -> &'static str {
        match self.app {
            Some(AppKind::Itunes) => match self.effective_flavor() {
                Some(ItunesFlavor::DarkMode) => "25 minutes",
                Some(ItunesFlavor::AppStore | ItunesFlavor::CoverFlow) => "10 minutes",
                None => "an hour",
            },
            _ => "2 minutes",
        }
    }

    #[must_use]
    pub fn cartoon_icon(&self) -> Option<ImageAsset> {
        match self.app {
            Some(AppKind::Aperture) => Some(ImageAsset::new("aperture_cartoon")),
            Some(AppKind::Iphoto) => Some(ImageAsset::new("iphoto_cartoon")),
            Some(AppKind::Itunes) => Some(ImageAsset::new("itunes_cartoon")),
            None => None,
        }
    }

    #[must_use]
    pub fn airdrop_image(&self) -> Option<ImageAsset> {
        match self.app {
            Some(AppKind::Aperture) => Some(ImageAsset::new("airdrop_guide_aperture")),
            Some(AppKind::Iphoto) => Some(ImageAsset::new("airdrop_guide_iphoto")),
            _ => None,
        }
    }

    #[must_use]
    pub fn app_store_image(&self) -> Option<ImageAsset> {
        match self.app {
            Some(AppKind::Aperture) => Some(ImageAsset::new("appstore_guide_aperture")),
            Some(AppKind::Iphoto) => Some(ImageAsset::new("appstore_guide_iphoto")),
            _ => None,
        }
    }
}
