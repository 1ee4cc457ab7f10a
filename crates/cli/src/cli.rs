use std::path::PathBuf;

use clap::{Parser, Subcommand};

use ably_control_rules::Family;

/// Offline inspection tool for Control API rule payloads.
///
/// Reads rule or ingress rule JSON (one object or an array), runs it through
/// the codec and reports what the typed model makes of it.
#[derive(Parser, Debug)]
#[command(name = "rulectl", version, about = "Inspect Control API rule payloads")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode records and print their discriminators and re-encoded JSON
    Decode {
        /// Treat input as ingress rules
        #[arg(long)]
        ingress: bool,

        /// Input file, or `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
    },

    /// Decode and re-encode, reporting every key that does not survive.
    /// Exits with status 1 when the output differs from the input.
    Check {
        #[arg(long)]
        ingress: bool,

        #[arg(default_value = "-")]
        input: PathBuf,
    },

    /// List registered discriminators: rule, ingress or aws (default: all)
    Kinds {
        family: Option<Family>,

        /// Report which family a discriminator belongs to instead of listing.
        /// Exits with status 1 when it is not registered anywhere.
        #[arg(long, value_name = "DISCRIMINATOR", conflicts_with = "family")]
        find: Option<String>,
    },

    /// Print the resolved client configuration with secrets redacted
    Config {
        /// Profile name (overrides CONTROL_PROFILE)
        #[arg(long, env = "CONTROL_PROFILE", default_value = "")]
        profile: String,
    },
}
