//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "clientdesk")]
#[command(about = "Terminal client manager for a clients REST API")]
pub struct Args {
    #[arg(long, help = "Config file path (default: <config dir>/clientdesk/config.jsonc)")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "API base URL, overrides CLIENTDESK_API_URL and the config file")]
    pub api_url: Option<String>,
}

impl Args {
    pub fn from_cli() -> Self {
        <Self as Parser>::parse()
    }
}
