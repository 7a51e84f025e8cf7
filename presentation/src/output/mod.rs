//! Output formatting for game reports

pub mod console;
pub mod formatter;
