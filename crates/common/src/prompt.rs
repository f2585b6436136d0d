use std::str::FromStr;

use cliclack::Input;

/// Interactive input prompt used to finalize CLI args that were not passed
/// on the command line.
pub struct Prompt {
    inner: Input,
}

impl Prompt {
    pub fn new(question: &str) -> Self {
        Self {
            inner: Input::new(question),
        }
    }

    pub fn default(mut self, default: &str) -> Self {
        self.inner = self.inner.default_input(default);
        self
    }

    pub fn ask<T>(mut self) -> T
    where
        T: FromStr,
        T::Err: ToString,
    {
        self.inner.interact().unwrap()
    }
}
