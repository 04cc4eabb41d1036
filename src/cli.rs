//! CLI argument parsing with clap.

use clap::Parser;

/// Generate the placeholder store logo.
#[derive(Parser, Debug)]
#[command(name = "logogen", version, about)]
pub struct Cli {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Log filter implied by the flags, used when `RUST_LOG` is unset.
    #[must_use]
    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        }
    }
}
