#![forbid(unsafe_code)]

mod config;
mod constants;
mod folders;
mod gui;
mod model;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use config::AppContext;
use constants::app;
use folders::GioSchemaStore;

/// Manage GNOME Shell applications folders
#[derive(Parser, Debug)]
#[command(name = "gnome-appfolders-manager")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Show debug messages
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Show only error messages
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// `-q` and `-v` win over `LOG_LEVEL`
    fn log_level(&self, env_level: Option<&str>) -> TraceLevel {
        if self.quiet {
            return TraceLevel::ERROR;
        }
        if self.verbose {
            return TraceLevel::DEBUG;
        }
        match env_level.unwrap_or("info").to_lowercase().as_str() {
            "trace" => TraceLevel::TRACE,
            "debug" => TraceLevel::DEBUG,
            "warn" => TraceLevel::WARN,
            "error" => TraceLevel::ERROR,
            _ => TraceLevel::INFO,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = cli.log_level(std::env::var("LOG_LEVEL").ok().as_deref());

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install log subscriber")?;

    info!(version = app::VERSION, "Starting {}", app::NAME);
    debug!(config_dir = %AppContext::config_dir().display(), "Settings location");
    if let Some(data_dir) = dirs::data_dir() {
        debug!(data_dir = %data_dir.display(), "User data location");
    }

    let context = AppContext::load()?;
    let schema = GioSchemaStore::new().context("Cannot access the app folders settings")?;

    gui::run_gui(context, Box::new(schema))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_level_flags() {
        let cli = Cli::try_parse_from(["gnome-appfolders-manager", "-v"]).unwrap();
        assert_eq!(cli.log_level(Some("error")), TraceLevel::DEBUG);

        let cli = Cli::try_parse_from(["gnome-appfolders-manager", "--quiet"]).unwrap();
        assert_eq!(cli.log_level(None), TraceLevel::ERROR);

        let cli = Cli::try_parse_from(["gnome-appfolders-manager"]).unwrap();
        assert_eq!(cli.log_level(None), TraceLevel::INFO);
        assert_eq!(cli.log_level(Some("WARN")), TraceLevel::WARN);
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["gnome-appfolders-manager", "-v", "-q"]).is_err());
    }
}
