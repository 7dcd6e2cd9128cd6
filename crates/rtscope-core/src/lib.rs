//! Core types for rtscope.
//!
//! This crate holds the vocabulary shared by the rtscope client and CLI:
//!
//! - [`Error`] and [`Result`], the error contract every accessor surfaces
//! - [`json`], sonic-rs helpers that turn parse failures into
//!   [`Error::DecodeFailed`]
//! - [`PackageType`], the fixed whitelist of repository package types

#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod json;
pub mod package_type;

pub use error::{Error, Result};
pub use package_type::PackageType;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
