mod error;
mod load;
mod merge;
mod type_spec;
mod types;

pub use error::SpecError;
pub use load::*;
pub use merge::MergeOutcome;
pub use type_spec::{Bounds, TypeSpec};
pub use types::*;
