//! Relnote Git - Commit range reading for release notes
//!
//! This crate turns a revision range into the ordered list of
//! `(id, subject)` pairs the changelog pipeline works on.

mod commits;
mod reader;
mod repository;
pub mod types;

pub use reader::RangeReader;
pub use repository::{GitRepo, Result};
pub use types::CommitRecord;
