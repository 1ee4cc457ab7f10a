mod cli;
mod commands;
mod diff;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use crate::cli::{CliArgs, Command};

fn main() -> Result<()> {
    ably_control_core::config::load_dotenv();

    // Logs go to stderr so stdout stays pipeable JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    match args.command {
        Command::Decode { ingress, input } => {
            let bytes = commands::read_input(&input)?;
            for record in commands::decode_input(&bytes, ingress)? {
                println!("{}", record.summary);
                println!("{}", serde_json::to_string_pretty(&record.encoded)?);
            }
        }
        Command::Check { ingress, input } => {
            let bytes = commands::read_input(&input)?;
            let records = commands::decode_input(&bytes, ingress)?;
            let mut differing = 0usize;
            for record in &records {
                let changes = record.changes();
                if changes.is_empty() {
                    println!("ok      {}", record.summary);
                    continue;
                }
                differing += 1;
                println!("differs {}", record.summary);
                for change in changes {
                    println!("  {}", change);
                }
            }
            info!(records = records.len(), differing, "check complete");
            if differing > 0 {
                warn!(differing, "re-encoded output differs from input");
                std::process::exit(1);
            }
        }
        Command::Kinds { family, find } => match find {
            Some(discriminator) => {
                let families = commands::families_of(&discriminator);
                if families.is_empty() {
                    println!("{}: not registered", discriminator);
                    std::process::exit(1);
                }
                for family in families {
                    println!("{}: {}", discriminator, family);
                }
            }
            None => {
                for line in commands::kinds(family) {
                    println!("{}", line);
                }
            }
        },
        Command::Config { profile } => {
            println!("{}", commands::show_config(&profile)?);
        }
    }

    Ok(())
}
