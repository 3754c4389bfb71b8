use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// randname: generate obfuscated symbol names from naming patterns.
#[derive(Debug, Parser)]
#[command(name = "randname")]
#[command(about = "Generate random symbol names from naming patterns", long_about = None)]
pub struct Cli {
    /// Pattern to generate from, e.g. '{[1000](1)[0100](6,12)}(2,3)'
    /// (defaults to the built-in policies)
    #[arg(conflicts_with_all = ["policy", "rules"])]
    pub pattern: Option<String>,

    /// Policy file with `name = pattern` lines, merged over the defaults
    #[arg(long)]
    pub policy: Option<PathBuf>,

    /// Only use these rules (repeatable)
    #[arg(long = "rule", value_name = "NAME")]
    pub rules: Vec<String>,

    /// Names to generate per rule
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Report which rules accept NAME instead of generating
    #[arg(long, value_name = "NAME")]
    pub check: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Quiet output (print only names; errors only on stderr)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbosity (-v, -vv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}
