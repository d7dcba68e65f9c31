//! prwatch GitHub - GitHub data source for prwatch
//!
//! This crate reads pull request review activity through the `gh` CLI and
//! parses the pull request references users pass on the command line.

mod client;
mod error;
mod pr;

pub use client::{GhCli, JSON_FIELDS};
pub use error::{Error, Result};
pub use pr::PrTarget;
