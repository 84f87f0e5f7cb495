//! Selection command handler for bluebill
//!
//! Handles select_empty_lines: replaces the selection set with one cursor per
//! block of empty lines, ignoring empty lines at the start and end of the
//! buffer.

use super::{CommandContext, CommandOutcome};
use crate::buffer::Region;
use anyhow::Result;
use log::info;

pub fn select_empty_lines(ctx: &mut CommandContext<'_>) -> Result<CommandOutcome> {
    let lines = ctx.buffer.split_by_newlines(Region::new(0, ctx.buffer.size()))?;
    let empty_lines = empty_line_separators(&lines);

    ctx.buffer.set_selections(empty_lines.iter().copied())?;
    info!("{} empty lines selected.", empty_lines.len());

    Ok(CommandOutcome {
        messages: vec![format!("{} empty lines selected.", empty_lines.len())],
        ..Default::default()
    })
}

/// First empty line of every run of empty lines that sits between text.
fn empty_line_separators(lines: &[Region]) -> Vec<Region> {
    let first = lines.iter().position(|line| !line.is_empty());
    let last = lines.iter().rposition(|line| !line.is_empty());
    let (Some(first), Some(last)) = (first, last) else {
        return Vec::new();
    };

    let mut previous_empty = false;
    lines[first..=last]
        .iter()
        .filter(|line| {
            let keep = line.is_empty() && !previous_empty;
            previous_empty = line.is_empty();
            keep
        })
        .copied()
        .collect()
}
