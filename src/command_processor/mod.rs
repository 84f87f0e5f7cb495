//! Editor commands and the table that dispatches them by name.
//!
//! Every command is a plain function taking a [`CommandContext`]: the buffer
//! with its selections, the loaded configuration and the clock reading the
//! command should use. Commands visit selections independently; a selection
//! that fails is recorded in the [`CommandOutcome`] and the rest still run.

use crate::buffer::{Region, TextBuffer};
use crate::config::Config;
use anyhow::{Result, anyhow};
use chrono::NaiveDateTime;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fmt;

pub mod insert_handler;
pub mod links_handler;
pub mod selection_handler;
pub mod time_handler;
pub mod todo_handler;

pub type CommandFn = fn(&mut CommandContext<'_>) -> Result<CommandOutcome>;

pub struct CommandContext<'a> {
    pub buffer: &'a mut TextBuffer,
    pub config: &'a Config,
    pub now: NaiveDateTime,
}

impl<'a> CommandContext<'a> {
    pub fn new(buffer: &'a mut TextBuffer, config: &'a Config, now: NaiveDateTime) -> Self {
        Self { buffer, config, now }
    }

    /// Context stamped with the local wall clock.
    pub fn with_local_clock(buffer: &'a mut TextBuffer, config: &'a Config) -> Self {
        Self::new(buffer, config, chrono::Local::now().naive_local())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Number of buffer edits performed.
    pub edits: usize,
    /// Informational lines for the caller, e.g. resolved link targets.
    pub messages: Vec<String>,
    /// One entry per selection that could not be processed.
    pub failures: Vec<String>,
}

impl CommandOutcome {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Selections ordered from the end of the buffer backwards, so edits made
/// for one never move the offsets of the ones still to come.
pub fn selections_last_first(buffer: &TextBuffer) -> Vec<Region> {
    let mut regions = buffer.selections().to_vec();
    regions.sort_by(|x, y| y.begin().cmp(&x.begin()).then(y.end().cmp(&x.end())));
    regions
}

#[derive(Clone)]
pub struct CommandProcessor {
    handlers: HashMap<&'static str, CommandFn>,
}

impl fmt::Debug for CommandProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandProcessor").field("commands", &self.names()).finish()
    }
}

impl CommandProcessor {
    pub fn new() -> Self {
        let mut processor = Self::empty();
        processor.register("time_parsing", time_handler::time_parsing);
        processor.register("time_parsing_standard", time_handler::time_parsing_standard);
        processor.register("time_parsing_military", time_handler::time_parsing_military);
        processor.register("insert_date", insert_handler::insert_date);
        processor.register("insert_time", insert_handler::insert_time);
        processor.register("insert_uuid", insert_handler::insert_uuid);
        processor.register("create_todo", todo_handler::create_todo);
        processor.register("select_empty_lines", selection_handler::select_empty_lines);
        processor.register("open_links", links_handler::open_links);
        processor
    }

    pub fn empty() -> Self {
        Self { handlers: HashMap::new() }
    }

    /// Add or replace a command, returning the handler it displaced.
    pub fn register(&mut self, name: &'static str, handler: CommandFn) -> Option<CommandFn> {
        self.handlers.insert(name, handler)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.handlers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn execute(&self, name: &str, ctx: &mut CommandContext<'_>) -> Result<CommandOutcome> {
        debug!("Attempting to execute command: {}", name);
        debug!("Selections: {:?}", ctx.buffer.selections());

        let Some(handler) = self.handlers.get(name) else {
            warn!("Unrecognized command: {}", name);
            return Err(anyhow!("Unrecognized command '{}'. Run 'bluebill commands' for a list.", name));
        };

        info!("Executing command '{}' over {} selection(s)", name, ctx.buffer.selections().len());
        match handler(ctx) {
            Ok(outcome) => {
                debug!(
                    "Command '{}' finished: {} edit(s), {} failure(s)",
                    name,
                    outcome.edits,
                    outcome.failures.len()
                );
                Ok(outcome)
            }
            Err(e) => {
                log::error!("Failed to execute command '{}': {:?}", name, e);
                Err(e)
            }
        }
    }
}

impl Default for CommandProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{NaiveDate, NaiveDateTime};

    pub fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 20).unwrap().and_hms_opt(16, 34, 5).unwrap()
    }
}
