#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for the retrofit support-configuration service
//!
//! This crate provides the user's selection state (which legacy app to
//! patch, and for `iTunes` which variant) and the pure lookup table that
//! derives display strings, bundle identifiers, version strings, and
//! image-asset references from that selection.

pub mod assets;
pub mod selection;

// Re-export commonly used types
pub use assets::ImageAsset;
pub use selection::{AppKind, ItunesFlavor, Selection};
