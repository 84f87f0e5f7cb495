use anyhow::{Context, Result, anyhow};
use bluebill::app::Application;
use bluebill::cli::{Cli, Commands, ConfigActions};
use bluebill::config::{self, Config, KEYS};
use bluebill::naming;
use chrono::Local;
use clap::Parser;
use env_logger::Env;
use log::{debug, info};
use std::io::{self, Read, Write};
use std::path::Path;

fn main() -> Result<()> {
    // Initialize logging with custom format
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => config::config_path()?,
    };
    let config = Config::load_from(&config_path)?;
    debug!("Loaded config from {}", config_path.display());

    match cli.command {
        None => Application::new(config).run(),
        Some(Commands::Time { line, notation }) => {
            let notation = notation.unwrap_or(config.time_range.notation);
            let rendered = notation.process(&line)?;
            println!("{}", line);
            println!("{}", rendered);
            Ok(())
        }
        Some(Commands::Run { command, selections, lines }) => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input).context("Failed to read stdin")?;

            let app = Application::new(config);
            let (buffer, outcome) = app.run_command(&command, input, &selections, &lines)?;

            print!("{}", buffer.text());
            io::stdout().flush()?;
            for message in &outcome.messages {
                eprintln!("{}", message);
            }
            for failure in &outcome.failures {
                eprintln!("Error: {}", failure);
            }
            if !outcome.is_success() {
                return Err(anyhow!("{} failed on {} selection(s)", command, outcome.failures.len()));
            }
            info!("{} made {} edit(s)", command, outcome.edits);
            Ok(())
        }
        Some(Commands::Commands) => {
            for name in Application::new(config).command_names() {
                println!("{}", name);
            }
            Ok(())
        }
        Some(Commands::SuggestName { extension }) => {
            let extension = extension.unwrap_or_else(|| config.naming.extension.clone());
            println!("{}", naming::suggest_date_based_name(Local::now().date_naive(), &extension));
            Ok(())
        }
        Some(Commands::Config { action }) => handle_config(action, config, &config_path),
    }
}

fn handle_config(action: ConfigActions, mut config: Config, path: &Path) -> Result<()> {
    match action {
        ConfigActions::Show { key: Some(key) } => println!("{}", config.get(&key)?),
        ConfigActions::Show { key: None } => {
            println!("Current configuration:");
            for key in KEYS {
                println!("  {} = {:?}", key, config.get(key)?);
            }
        }
        ConfigActions::Set { key, value } => {
            config.set(&key, &value)?;
            config.save_to(path)?;
            println!("Set {} = {:?}", key, value);
        }
        ConfigActions::Path => println!("{}", path.display()),
    }
    Ok(())
}
