//! Time-range command handler for bluebill
//!
//! Parses each selected `T: ...` line and writes the rendered summary on a
//! new line right after the selection, leaving the original text in place.
//
// # Examples
//
// ```
// T: 0645 - 0730, 0815 - 1200
// 0645 - 0730, 0815 - 1200 (4h30m -> 4.50h -> 16200s)
// ```

use super::{CommandContext, CommandOutcome, selections_last_first};
use crate::time_range::Notation;
use anyhow::Result;
use log::{debug, error};

/// Use the notation from the `[time_range]` config section.
pub fn time_parsing(ctx: &mut CommandContext<'_>) -> Result<CommandOutcome> {
    let notation = ctx.config.time_range.notation;
    parse_selections(ctx, notation)
}

pub fn time_parsing_standard(ctx: &mut CommandContext<'_>) -> Result<CommandOutcome> {
    parse_selections(ctx, Notation::Standard)
}

pub fn time_parsing_military(ctx: &mut CommandContext<'_>) -> Result<CommandOutcome> {
    parse_selections(ctx, Notation::Military)
}

fn parse_selections(ctx: &mut CommandContext<'_>, notation: Notation) -> Result<CommandOutcome> {
    let mut outcome = CommandOutcome::default();

    for region in selections_last_first(ctx.buffer) {
        if region.is_empty() {
            continue;
        }

        let selected = ctx.buffer.substr(region)?.to_string();
        match notation.process(&selected) {
            Ok(rendered) => {
                debug!("Rendered {} time range: {}", notation, rendered);
                ctx.buffer.insert(region.end(), &format!("\n{}", rendered))?;
                outcome.edits += 1;
            }
            Err(e) => {
                error!("Failed to parse time range '{}': {}", selected, e);
                outcome.failures.push(e.to_string());
            }
        }
    }

    // Failures were collected last-first; report them in buffer order.
    outcome.failures.reverse();
    Ok(outcome)
}
