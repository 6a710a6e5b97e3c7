use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use console::style;
use summarize_client::{ClientSettings, SettingsOverrides};

mod platform;

use platform::logging::{self, LogDestination};

#[derive(Clone, Copy, Default, ValueEnum)]
enum CliLog {
    #[default]
    File,
    Terminal,
    Both,
}

impl From<CliLog> for LogDestination {
    fn from(cli: CliLog) -> Self {
        match cli {
            CliLog::File => LogDestination::File,
            CliLog::Terminal => LogDestination::Terminal,
            CliLog::Both => LogDestination::Both,
        }
    }
}

#[derive(Parser)]
#[command(name = "summarize")]
#[command(about = "Live list of submitted videos: add URLs, watch progress, copy summaries")]
struct Cli {
    /// Backend base URL, e.g. http://localhost:3669
    #[arg(long)]
    server: Option<String>,

    /// Backend host, used when no server URL is given
    #[arg(long)]
    host: Option<String>,

    /// Backend port, used when no server URL is given
    #[arg(long)]
    port: Option<u16>,

    /// Milliseconds between polls of the entry list
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Where log output goes
    #[arg(long, value_enum, default_value = "file")]
    log: CliLog,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Write copies to this file instead of the system clipboard
    #[arg(long)]
    copy_to: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            server_url: self.server.clone(),
            host: self.host.clone(),
            port: self.port,
            poll_interval_ms: self.poll_interval_ms,
        }
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{} {:#}", style("Error:").red().bold(), err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log.into(), cli.verbose);

    let env = SettingsOverrides::from_env().context("reading SUMMARIZE_* environment")?;
    let settings =
        ClientSettings::resolve(&cli.overrides().or(env)).context("resolving client settings")?;

    platform::run_app(settings, cli.copy_to)
}
