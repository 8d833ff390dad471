use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "file-warden", version, about = "Path-based access gate for tool file requests")]
pub struct Cli {
    /// Path to the rule file (defaults to restricted-patterns.json beside the executable)
    #[arg(long)]
    pub patterns: Option<PathBuf>,

    /// Path to the access log (defaults to access.log beside the executable)
    #[arg(long)]
    pub audit_log: Option<PathBuf>,

    /// Stderr diagnostic filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
