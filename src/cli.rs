//! Command-line interface for viva
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Voice mock interviews in the terminal
#[derive(Parser, Debug)]
#[command(name = "viva", version, about = "Voice mock interviews in the terminal, scored")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress non-essential output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: session progress, -vv: raw protocol events)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Interview topic (e.g., "Product Designer", "Backend Engineer")
    #[arg(long, short = 't', value_name = "TOPIC")]
    pub topic: Option<String>,

    /// Interview server base URL
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// Audio input device (see `viva devices`)
    #[arg(long, value_name = "DEVICE")]
    pub device: Option<String>,

    /// Save the transcript as JSON when the interview ends
    #[arg(long, value_name = "FILE")]
    pub save: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available audio input devices
    Devices,

    /// Score a previously saved transcript without running an interview
    Analyze {
        /// Transcript JSON file written with --save
        file: PathBuf,

        /// Override the topic stored in the transcript
        #[arg(long, short = 't', value_name = "TOPIC")]
        topic: Option<String>,
    },
}
