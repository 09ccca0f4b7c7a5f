//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for nova-chat
#[derive(Parser, Debug)]
#[command(name = "nova-chat")]
#[command(author, version, about = "Student assistant chat for Nova Uni")]
#[command(long_about = r#"
Nova Chat lets enrolled students talk to the university assistant.

Students log in with the email registered in the enrolment sheet; every
question and answer is appended to a CSV transcript.

Required secrets (environment or config file):
  OPENAI_API_KEY   API key for the assistants API
  ASSISTANT_ID     Assistant that answers questions
  SHEET_ID         Spreadsheet holding the allow-list
  ADMIN_EMAIL      Optional email that bypasses the allow-list

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./nova.toml         Project-level config
3. ~/.config/nova-chat/config.toml   Global config

Example:
  nova-chat
  nova-chat --email mario.rossi@nova.edu -v
"#)]
pub struct Cli {
    /// Log in directly with this email
    #[arg(short, long, value_name = "EMAIL")]
    pub email: Option<String>,

    /// Do not write the CSV conversation log
    #[arg(long)]
    pub no_log: bool,

    /// Write diagnostics to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}
