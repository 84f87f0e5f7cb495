use crate::buffer::{Region, TextBuffer};
use crate::command_processor::{CommandContext, CommandOutcome, CommandProcessor};
use crate::config::Config;
use crate::time_range::Notation;
use anyhow::{Context, Result};
use rustyline::DefaultEditor;

pub struct Application {
    command_processor: CommandProcessor,
    config: Config,
    notation: Notation,
}

impl Application {
    pub fn new(config: Config) -> Self {
        let notation = config.time_range.notation;
        Self { command_processor: CommandProcessor::new(), config, notation }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.command_processor.names()
    }

    /// Interactive loop: every line entered is parsed as a time range.
    pub fn run(&mut self) -> Result<()> {
        log::info!("Starting bluebill terminal ({} notation)", self.notation);

        let mut rl = DefaultEditor::new()?;
        println!("Enter time ranges such as 'T: 0645 - 0730'. Type 'help' for commands.");

        loop {
            match rl.readline("bluebill> ") {
                Ok(line) => {
                    let _ = rl.add_history_entry(line.as_str());
                    if !self.process_input(&line) {
                        break;
                    }
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Handle one line of interactive input. Returns `false` when the user
    /// asked to leave.
    pub fn process_input(&mut self, line: &str) -> bool {
        match line.trim() {
            "" => {}
            "exit" | "quit" => return false,
            "help" => print_help(self.notation),
            ":standard" => self.set_notation(Notation::Standard),
            ":military" => self.set_notation(Notation::Military),
            _ => match self.render_time_range(line) {
                Ok(rendered) => println!("{}", rendered),
                Err(err) => {
                    log::error!("Failed to parse time range: {:?}", err);
                    println!("Error: {}", err);
                }
            },
        }
        true
    }

    pub fn notation(&self) -> Notation {
        self.notation
    }

    pub fn set_notation(&mut self, notation: Notation) {
        log::debug!("Switching notation to {}", notation);
        self.notation = notation;
        println!("Using {} notation", notation);
    }

    pub fn render_time_range(&self, line: &str) -> Result<String> {
        Ok(self.notation.process(line)?)
    }

    /// Run the editor command `name` over `text`. `lines` are 1-based line
    /// numbers selected in full, in addition to `selections`.
    pub fn run_command(
        &self,
        name: &str,
        text: String,
        selections: &[Region],
        lines: &[usize],
    ) -> Result<(TextBuffer, CommandOutcome)> {
        let mut buffer = TextBuffer::new(text);

        let mut regions = selections.to_vec();
        for &line in lines {
            let row = line.checked_sub(1).context("Line numbers start at 1")?;
            regions.push(buffer.line_region(row)?);
        }
        if !regions.is_empty() {
            buffer.set_selections(regions).context("Invalid selection")?;
        }

        let mut ctx = CommandContext::with_local_clock(&mut buffer, &self.config);
        let outcome = self.command_processor.execute(name, &mut ctx)?;
        Ok((buffer, outcome))
    }
}

fn print_help(notation: Notation) {
    println!("bluebill - time range calculator");
    println!();
    println!("Enter a line such as:");
    println!("  T: 0645 - 0730, 0815 - 1200        (military)");
    println!("  T: 645am - 730am, 815am - 12pm     (standard)");
    println!();
    println!("COMMANDS:");
    println!("  :standard  Parse 12-hour tokens with am/pm");
    println!("  :military  Parse 4-digit 24-hour tokens");
    println!("  help       Show this help message");
    println!("  exit       Leave the terminal");
    println!();
    println!("Current notation: {}", notation);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_process_input_switches_notation() {
        let mut app = Application::new(Config::default());
        assert_eq!(app.notation(), Notation::Military);
        assert!(app.process_input(":standard"));
        assert_eq!(app.notation(), Notation::Standard);
        assert_eq!(
            app.render_time_range("T: 1pm - 230pm").unwrap(),
            "01:00PM - 02:30PM (1h30m -> 1.50h -> 5400s)"
        );
        assert!(app.process_input("T: not a range"));
        assert!(!app.process_input("  quit "));
    }

    #[test]
    fn test_run_command_with_line_selection() {
        let app = Application::new(Config::default());
        let (buffer, outcome) = app
            .run_command("time_parsing", "header\nT: 0645 - 0730\n".to_string(), &[], &[2])
            .unwrap();
        assert!(outcome.is_success());
        assert_eq!(buffer.text(), "header\nT: 0645 - 0730\n0645 - 0730 (0h45m -> 0.75h -> 2700s)\n");
    }

    #[test]
    fn test_run_command_rejects_bad_input() {
        let app = Application::new(Config::default());
        assert!(app.run_command("time_parsing", "x".to_string(), &[], &[0]).is_err());
        assert!(app.run_command("time_parsing", "x".to_string(), &[], &[5]).is_err());
        assert!(app.run_command("time_parsing", "x".to_string(), &[Region::new(0, 9)], &[]).is_err());
        assert!(app.run_command("no_such_command", "x".to_string(), &[], &[]).is_err());
    }
}
