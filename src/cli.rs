use app_finder_core::resolver::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "app-finder",
    version,
    about = "Locate running desktop applications by name",
    after_help = "\
COMMANDS:
  list-apps   Enumerate running applications in registry order
  find        Wait for an application to appear, up to a timeout
  version     Print version information"
)]
pub struct Cli {
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    ListApps,
    Find(FindArgs),
    Version,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListApps => "list-apps",
            Self::Find(_) => "find",
            Self::Version => "version",
        }
    }
}

#[derive(Parser, Debug)]
pub struct FindArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    pub poll_interval_ms: u64,
}
