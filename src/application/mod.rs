//! Application layer - Use cases that coordinate domain services.
//!
//! This layer sits between the CLI and the domain: it performs the release
//! fetch and hands the outcome to the resolver.

mod downloads;

pub use downloads::{DownloadsAction, LoadedRelease};
