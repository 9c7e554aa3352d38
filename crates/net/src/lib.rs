#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Network operations for retrofit
//!
//! This crate wraps the HTTP client used to fetch the remote support
//! manifest and the Apple software catalog. Failures are reported, never
//! retried: the configuration service keeps its last-known-good state
//! and a later refresh gets another chance.

mod client;

pub use client::{NetClient, NetConfig};

use retrofit_errors::{Error, NetworkError};
use serde::de::DeserializeOwned;

/// Fetch binary content from a URL
///
/// # Errors
///
/// Returns an error if the URL is invalid, the request fails, the server
/// returns an error status, or the response body cannot be read.
pub async fn fetch_bytes(client: &NetClient, url: &str) -> Result<Vec<u8>, Error> {
    tracing::debug!(url, "fetching bytes");

    let response = client.get(url).await?;

    if !response.status().is_success() {
        return Err(NetworkError::HttpError {
            status: response.status().as_u16(),
            message: response.status().to_string(),
        }
        .into());
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| NetworkError::BodyReadFailed(e.to_string()))?;
    Ok(bytes.to_vec())
}

/// Fetch a URL and parse the body as a plist document
///
/// # Errors
///
/// Returns a network error for fetch failures and a config parse error
/// if the body is not a plist of the expected shape.
pub async fn fetch_plist<T>(client: &NetClient, url: &str) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    let bytes = fetch_bytes(client, url).await?;
    plist::from_bytes(&bytes).map_err(|e| {
        retrofit_errors::ConfigError::ParseError {
            message: format!("invalid plist from {url}: {e}"),
        }
        .into()
    })
}
