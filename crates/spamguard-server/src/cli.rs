use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "spamguard-server")]
#[command(author, version, about = "SpamGuard spam classification service", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "spamguard.yaml", env = "SPAMGUARD_CONFIG")]
    pub config: String,

    /// Model artifact path, relative to the executable's directory unless absolute
    #[arg(short, long, env = "SPAMGUARD_ARTIFACT")]
    pub artifact: Option<PathBuf>,

    /// Listen address
    #[arg(short = 'l', long, env = "SPAMGUARD_LISTEN")]
    pub listen: Option<String>,

    /// Listen port
    #[arg(short = 'P', long, env = "SPAMGUARD_PORT")]
    pub port: Option<u16>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
