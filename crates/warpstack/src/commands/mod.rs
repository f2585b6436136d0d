pub mod apply;
pub mod autocomplete;
