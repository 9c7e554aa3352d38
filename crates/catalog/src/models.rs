//! Catalog data models

use retrofit_errors::{ConfigError, Error};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Apple software-distribution catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(rename = "Products", default)]
    pub products: HashMap<String, Product>,
}

/// Product entry in the catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Product {
    /// Installer packages in document order
    #[serde(rename = "Packages", default)]
    pub packages: Vec<PackageRef>,
}

/// Installer package descriptor
///
/// Real catalogs carry more keys (Digest, `IntegrityDataURL`, ...); we only
/// keep what the scan and the UI could use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageRef {
    #[serde(rename = "URL", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(rename = "Size", default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,

    #[serde(
        rename = "MetadataURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub metadata_url: Option<String>,
}

impl Catalog {
    /// Parse a catalog from plist bytes (XML or binary)
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a plist dictionary.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        plist::from_bytes(bytes).map_err(|e| {
            ConfigError::ParseError {
                message: format!("invalid software catalog: {e}"),
            }
            .into()
        })
    }

    /// Find the download URL for a product's installer package
    ///
    /// Scans `Products[product_id].Packages` in order and returns the
    /// first package whose URL contains `expected_name` as a
    /// case-sensitive substring. Packages without a URL are skipped.
    #[must_use]
    pub fn find_package_url(&self, product_id: &str, expected_name: &str) -> Option<&str> {
        self.products.get(product_id)?.packages.iter().find_map(|p| {
            p.url
                .as_deref()
                .filter(|url| url.contains(expected_name))
        })
    }
}
