pub use crate::{
    chain_metadata::*, consts::*, core::*, deploy::*, registry::*, strategy::*, validation::*,
};

mod chain_metadata;
mod consts;
mod core;
mod deploy;
mod registry;
mod strategy;
pub mod traits;
mod validation;
