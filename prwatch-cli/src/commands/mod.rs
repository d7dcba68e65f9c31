//! CLI command implementations

pub mod watch;

pub use watch::WatchArgs;
