use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use yumdbus::{BusKind, ClientConfig};

/// Look up yum packages through the yum D-Bus daemon.
#[derive(Debug, Parser)]
#[command(name = "yumdbus", version, about)]
struct Cli {
    /// Talk to the daemon on the session bus instead of the system bus
    #[arg(long, conflicts_with = "address")]
    session: bool,

    /// Talk to the daemon on the bus at this D-Bus address
    #[arg(long, value_name = "ADDRESS")]
    address: Option<String>,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn config(&self) -> ClientConfig {
        let bus = match (&self.address, self.session) {
            (Some(address), _) => BusKind::Address(address.clone()),
            (None, true) => BusKind::Session,
            (None, false) => BusKind::System,
        };
        ClientConfig::with_bus(bus)
    }
}

fn main() -> Result<ExitCode> {
    // e.g., RUST_LOG=yumdbus=debug; warnings are shown when unset
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config();

    let report = yumdbus::run(&config).context("unable to reach the yum D-Bus service")?;

    let mut stdout = io::stdout().lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut stdout, &report).context("Failed to write report")?;
        writeln!(stdout)?;
    } else {
        report.write_text(&mut stdout).context("Failed to write output")?;
    }

    for warning in &report.warnings {
        tracing::warn!(step = ?warning.step, "{}", warning.message);
    }
    for failure in &report.failures {
        tracing::error!(step = ?failure.step, "{}", failure.message);
    }

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
