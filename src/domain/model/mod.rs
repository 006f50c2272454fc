pub mod downloads;
pub mod release;

pub use downloads::*;
pub use release::*;
