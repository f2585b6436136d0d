mod prompt;

pub mod config;
pub mod ethereum;
pub mod files;
pub mod logger;
pub mod retry;
pub mod spinner;

pub use prompt::Prompt;
