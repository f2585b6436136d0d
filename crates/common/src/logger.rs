use cliclack::{intro as cliclack_intro, log, outro as cliclack_outro};
use console::style;

pub fn intro(msg: impl ToString) {
    cliclack_intro(style(msg.to_string()).bold()).unwrap();
}

pub fn outro(msg: impl ToString) {
    cliclack_outro(msg.to_string()).unwrap();
}

pub fn info(msg: impl ToString) {
    log::info(msg.to_string()).unwrap();
}

pub fn warn(msg: impl ToString) {
    log::warning(msg.to_string()).unwrap();
}

pub fn error(msg: impl ToString) {
    log::error(style(msg.to_string()).red()).unwrap();
}

pub fn note(msg: impl ToString, content: impl ToString) {
    cliclack::note(msg.to_string(), content.to_string()).unwrap();
}

pub fn new_empty_line() {
    println!();
}
