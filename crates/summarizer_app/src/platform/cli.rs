use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use engine_logging::LogDestination;

#[derive(Parser, Debug)]
#[command(name = "row-summarizer")]
#[command(about = "Summarize the URL of every row in a table and write the summary back", long_about = None)]
pub struct Cli {
    /// Path to the JSON table document
    #[arg(short, long)]
    pub table: PathBuf,

    /// SMMRY API key
    #[arg(long, env = "SMMRY_API_KEY", hide_env_values = true, default_value = "")]
    pub api_key: String,

    /// Sentences per summary (1-7); empty uses the configured default
    #[arg(short, long, default_value = "")]
    pub sentences: String,

    /// RON settings file with field names, batch size and service options
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the summarization endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogTarget::Terminal)]
    pub log: LogTarget,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
        }
    }
}
