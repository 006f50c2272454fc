//! CLI command implementations.

pub mod config;
mod resolve;
mod services;

pub use resolve::{OutputFormat, ResolveOptions, resolve};
