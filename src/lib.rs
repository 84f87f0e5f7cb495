pub mod app;
pub mod buffer;
pub mod cli;
pub mod command_processor;
pub mod config;
pub mod links;
pub mod naming;
pub mod time_range;

// Re-export commonly used types
pub use buffer::{Region, TextBuffer};
pub use command_processor::{CommandContext, CommandOutcome, CommandProcessor};
pub use config::Config;
pub use time_range::{Notation, TimeRangeError, TimeRanges, parse_military, parse_standard};
