#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Support-manifest handling for retrofit
//!
//! This crate defines the typed form of the support manifest: the
//! property-list document bundled with the application and re-fetched
//! from the support server. Every field is optional; a key that is
//! missing, or whose value has the wrong type, reads as `None` rather
//! than failing the whole document. Only a document that is not a
//! dictionary at all is a parse error.

use retrofit_errors::{ConfigError, Error};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Typed support manifest (`SupportPath.plist` contents)
///
/// The plist keys keep their historical spelling; the struct fields use
/// Rust naming. Unknown keys in the document are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportManifest {
    /// Where to fetch the refreshed manifest from
    #[serde(
        default,
        rename = "SupportPathURL",
        deserialize_with = "de_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub support_path_url: Option<String>,

    /// Build number of the newest published release
    #[serde(
        default,
        rename = "LatestBuildNumber",
        deserialize_with = "de_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub latest_build_number: Option<i64>,

    #[serde(
        default,
        rename = "NewVersionVisibleTitle",
        deserialize_with = "de_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub new_version_visible_title: Option<String>,

    #[serde(
        default,
        rename = "NewVersionChangelog",
        deserialize_with = "de_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub new_version_changelog: Option<String>,

    #[serde(
        default,
        rename = "LatestZIP",
        deserialize_with = "de_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub latest_zip: Option<String>,

    #[serde(
        default,
        rename = "ReleasePage",
        deserialize_with = "de_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub release_page: Option<String>,

    #[serde(
        default,
        rename = "SourcePage",
        deserialize_with = "de_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_page: Option<String>,

    #[serde(
        default,
        rename = "NewIssuePage",
        deserialize_with = "de_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub new_issue_page: Option<String>,

    #[serde(
        default,
        rename = "IssuesPage",
        deserialize_with = "de_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub issues_page: Option<String>,

    #[serde(
        default,
        rename = "WikiPage",
        deserialize_with = "de_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub wiki_page: Option<String>,

    /// "Behind the scenes" explainer URLs, one per app variant
    #[serde(
        default,
        rename = "ApertureDive",
        deserialize_with = "de_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub aperture_dive: Option<String>,

    #[serde(
        default,
        rename = "iPhotoDive",
        deserialize_with = "de_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub iphoto_dive: Option<String>,

    #[serde(
        default,
        rename = "iTunes129Dive",
        deserialize_with = "de_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub itunes129_dive: Option<String>,

    #[serde(
        default,
        rename = "iTunes126Dive",
        deserialize_with = "de_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub itunes126_dive: Option<String>,

    #[serde(
        default,
        rename = "iTunes107Dive",
        deserialize_with = "de_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub itunes107_dive: Option<String>,

    /// Apple software-catalog document listing `iTunes` installer packages
    #[serde(
        default,
        rename = "iTunes129CatalogURL",
        deserialize_with = "de_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub itunes129_catalog_url: Option<String>,

    /// Product identifier to look up inside the catalog
    #[serde(
        default,
        rename = "iTunes129DownloadIdentifier",
        deserialize_with = "de_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub itunes129_download_identifier: Option<String>,

    /// Substring the wanted package URL must contain
    #[serde(
        default,
        rename = "iTunes129ExpectedName",
        deserialize_with = "de_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub itunes129_expected_name: Option<String>,

    #[serde(
        default,
        rename = "iTunes129URL",
        deserialize_with = "de_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub itunes129_url: Option<String>,

    #[serde(
        default,
        rename = "iTunes126URL",
        deserialize_with = "de_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub itunes126_url: Option<String>,

    #[serde(
        default,
        rename = "iTunes107URL",
        deserialize_with = "de_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub itunes107_url: Option<String>,
}

impl SupportManifest {
    /// Parse a manifest from plist bytes (XML or binary)
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a plist dictionary.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        plist::from_bytes(bytes).map_err(|e| {
            ConfigError::ParseError {
                message: format!("invalid support manifest: {e}"),
            }
            .into()
        })
    }

    /// Load a manifest from a plist file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist, an I/O
    /// error if it cannot be read, or a parse error for malformed content.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| -> Error {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.display().to_string(),
                }
                .into()
            } else {
                e.into()
            }
        })?;
        Self::from_bytes(&bytes)
    }

    /// Serialize the manifest to XML plist bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be serialized.
    pub fn to_xml_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut buf = Vec::new();
        plist::to_writer_xml(&mut buf, self)?;
        Ok(buf)
    }
}

/// Deserialize a field leniently: a value of the wrong type reads as `None`
/// instead of failing the document.
fn de_lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = plist::Value::deserialize(deserializer)?;
    Ok(plist::from_value(&value).ok())
}
