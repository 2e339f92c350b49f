// Command-line arguments
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dashgen", about = "Compile dashboard definitions into provisioning JSON")]
pub struct Cli {
    /// Settings file, without extension
    #[arg(short, long, default_value = "config/dashgen")]
    pub config: String,

    /// Validate and assemble only; write and push nothing
    #[arg(long, conflicts_with = "push")]
    pub check: bool,

    /// Also push every dashboard to the provisioning API
    #[arg(long)]
    pub push: bool,

    /// Definition files to compile instead of scanning the definitions directory
    pub definitions: Vec<PathBuf>,
}
