mod domain;
mod submitter;
mod token_metadata;
mod token_standard;

pub use domain::*;
pub use submitter::*;
pub use token_metadata::*;
pub use token_standard::*;
