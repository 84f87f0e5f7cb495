//! Links command handler for bluebill
//!
//! Handles open_links: works out which path or URL each selection refers to
//! and reports it. A non-empty selection is taken as the target itself; a
//! cursor is resolved against the text of its line.

use super::{CommandContext, CommandOutcome};
use crate::links::{link_target_at, link_target_in_selection};
use anyhow::Result;
use log::{debug, warn};

pub fn open_links(ctx: &mut CommandContext<'_>) -> Result<CommandOutcome> {
    let mut outcome = CommandOutcome::default();

    for &region in ctx.buffer.selections() {
        let target = if region.is_empty() {
            let line = ctx.buffer.line(region)?;
            let cursor = region.a - line.begin();
            link_target_at(ctx.buffer.substr(line)?, cursor)
        } else {
            link_target_in_selection(ctx.buffer.substr(region)?)
        };

        match target {
            Some(target) => {
                debug!("Resolved link target at {}: {}", region, target);
                outcome.messages.push(target);
            }
            None => {
                warn!("No link target found at {}", region);
                outcome.failures.push(format!("no link target at {}", region));
            }
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{Region, TextBuffer};
    use crate::command_processor::test_support::fixed_now;
    use crate::config::Config;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_open_links_reports_targets() {
        let text = "see [plan](docs/my%20plan.md)\nopen ./notes/today.md please\n `a.txt` ";
        let mut buffer = TextBuffer::new(text);
        buffer
            .set_selections([Region::cursor(12), Region::cursor(36), Region::new(30, 34), Region::cursor(59)])
            .unwrap();
        let config = Config::default();

        let outcome =
            open_links(&mut CommandContext::new(&mut buffer, &config, fixed_now())).unwrap();

        assert_eq!(outcome.messages, vec!["docs/my plan.md", "./notes/today.md", "open", "a.txt"]);
        assert!(outcome.is_success());
        assert_eq!(buffer.text(), text);
    }

    #[test]
    fn test_blank_line_has_no_target() {
        let mut buffer = TextBuffer::new("text\n   \nmore");
        buffer.set_selections([Region::cursor(6)]).unwrap();
        let config = Config::default();

        let outcome =
            open_links(&mut CommandContext::new(&mut buffer, &config, fixed_now())).unwrap();
        assert_eq!(outcome.failures, vec!["no link target at 6:6"]);
    }
}
