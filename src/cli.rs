use std::path::PathBuf;

use clap::Parser;

/// Terminal client for the taskman task service.
/// The service location is fixed at build time; see `api::BASE_URL`.
#[derive(Parser)]
#[command(name = "taskman", version, about = "Terminal task manager over the taskman HTTP service")]
pub struct Cli {
    /// Append debug diagnostics to this file.
    #[arg(long)]
    pub log: Option<PathBuf>,
}
