//! Todo command handler for bluebill
//!
//! Turns the selected text (or the cursor's line) into a TODO item:
//! `- item` becomes `- [] item`, anything else is prefixed with `- [] `.

use super::{CommandContext, CommandOutcome, selections_last_first};
use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;

static LIST_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*)-(.*)$").unwrap());

pub fn create_todo(ctx: &mut CommandContext<'_>) -> Result<CommandOutcome> {
    let marker = ctx.config.todo.marker.clone();
    let mut outcome = CommandOutcome::default();

    for selection in selections_last_first(ctx.buffer) {
        let region = if selection.is_empty() { ctx.buffer.line(selection)? } else { selection };
        let text = ctx.buffer.substr(region)?;
        let todo_line = todo_line(text, &marker);
        ctx.buffer.replace(region, &todo_line)?;
        outcome.edits += 1;
    }
    Ok(outcome)
}

/// Rewrite one piece of text as a TODO item using `marker` (e.g. `- []`).
pub fn todo_line(text: &str, marker: &str) -> String {
    match LIST_ITEM.captures(text) {
        Some(caps) => format!("{}{}{}", &caps[1], marker, &caps[2]),
        None => format!("{} {}", marker, text),
    }
}
