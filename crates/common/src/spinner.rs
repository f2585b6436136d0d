use cliclack::{spinner, ProgressBar};

use crate::config::global_config;

/// Progress indicator for a long-running step. In verbose mode the spinner is
/// replaced by plain log lines so interleaved output stays readable.
pub struct Spinner {
    msg: String,
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(msg: &str) -> Self {
        let pb = spinner();
        pb.start(msg);
        if global_config().verbose {
            pb.stop(msg);
        }
        Spinner {
            msg: msg.to_owned(),
            pb,
        }
    }

    pub fn finish(self) {
        self.pb.stop(&self.msg);
    }

    pub fn fail(self) {
        self.pb.error(format!("Failed: {}", self.msg));
    }
}
