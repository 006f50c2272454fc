//! Platform targets offered on the download page.
//!
//! Each target is an operating system / packaging combination and owns the
//! filename suffix used to pick its asset out of a release.

mod target;

pub use target::PlatformTarget;
