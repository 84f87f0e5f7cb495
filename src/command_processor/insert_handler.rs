//! Insert command handler for bluebill
//!
//! Handles the insert_date, insert_time and insert_uuid commands. The same
//! text goes in at the anchor of every selection.

use super::{CommandContext, CommandOutcome};
use crate::config::validate_time_format;
use anyhow::{Result, anyhow};
use chrono::NaiveDateTime;
use log::debug;
use std::fmt::Write as _;
use uuid::Uuid;

pub fn insert_date(ctx: &mut CommandContext<'_>) -> Result<CommandOutcome> {
    let text = render_now(ctx.now, &ctx.config.insert.date_format)?;
    insert_at_anchors(ctx, &text)
}

pub fn insert_time(ctx: &mut CommandContext<'_>) -> Result<CommandOutcome> {
    let text = render_now(ctx.now, &ctx.config.insert.time_format)?;
    insert_at_anchors(ctx, &text)
}

pub fn insert_uuid(ctx: &mut CommandContext<'_>) -> Result<CommandOutcome> {
    let text = Uuid::new_v4().to_string();
    insert_at_anchors(ctx, &text)
}

fn render_now(now: NaiveDateTime, format: &str) -> Result<String> {
    validate_time_format(format)?;
    let mut text = String::new();
    write!(text, "{}", now.format(format))
        .map_err(|_| anyhow!("Cannot render '{}' for a local timestamp", format))?;
    Ok(text)
}

fn insert_at_anchors(ctx: &mut CommandContext<'_>, text: &str) -> Result<CommandOutcome> {
    debug!("Inserting '{}'", text);
    let mut anchors: Vec<usize> = ctx.buffer.selections().iter().map(|region| region.a).collect();
    anchors.sort_unstable_by(|x, y| y.cmp(x));
    anchors.dedup();

    let mut outcome = CommandOutcome::default();
    for anchor in anchors {
        ctx.buffer.insert(anchor, text)?;
        outcome.edits += 1;
    }
    Ok(outcome)
}
