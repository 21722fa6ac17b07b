//! Relnote Core - Core library for workspace release notes
//!
//! This crate provides the error taxonomy and configuration shared by the
//! range reader, build-graph query, changelog pipeline and publisher crates.

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{ConfigError, QueryError, RangeReadError, RelnoteError, Result};
