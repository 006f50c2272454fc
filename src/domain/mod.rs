//! Domain layer - release data and the rules that turn it into download links.

pub mod model;
pub mod service;
