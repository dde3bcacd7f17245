//! Command-line argument parsing for the demo binary
//!
//! Simulates the replacement flow against a plain text field: the caret sits
//! at the end of TEXT, the chosen gesture fires, and the resulting field
//! value is printed.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Replace a typed trigger with the active tab's URL
#[derive(Parser, Debug)]
#[command(name = "tabdock", version, about = "Replace a typed trigger with the active tab's URL")]
pub struct CliArgs {
    /// Field text; the caret starts at the end
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// URL of the simulated active tab
    #[arg(long, value_name = "URL")]
    pub tab_url: Option<String>,

    /// Gesture that completes the trigger
    #[arg(long, value_enum, default_value = "space")]
    pub gesture: Gesture,

    /// Path to the synced state file (defaults to the user config dir)
    #[arg(long, value_name = "PATH")]
    pub state: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Gesture {
    /// Type a space after the trigger
    Space,
    /// Press Tab right after the trigger
    Tab,
}
