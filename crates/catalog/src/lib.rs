#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Apple software-catalog handling for retrofit
//!
//! The catalog is Apple's software-distribution document: a plist with a
//! `Products` dictionary keyed by product identifier, each product
//! carrying an ordered `Packages` list of installer descriptors. We only
//! read it to locate one installer URL by filename fragment; everything
//! else in the document is ignored.

mod models;

pub use models::{Catalog, PackageRef, Product};
