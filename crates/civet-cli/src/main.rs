//! civet CLI
//!
//! Parses arguments, resolves the run configuration and reports what the
//! report pipeline will be given.

mod cli;
mod error;
mod report;
mod style;

use clap::Parser;
use civet_core::{RunOutcome, Setup};
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::Cli;
use error::{CliError, Result};
use style::{Hue, Style};

fn main() {
    if let Err(e) = run() {
        let label = style::paint("error", Style::new().hue(Hue::Red).bold());
        eprintln!("{label}: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let cwd = std::env::current_dir()?;
    match Setup::default().run(cli.into_request(cwd))? {
        RunOutcome::ConfigWritten(path) => {
            println!("{} {}", style::green("Config file written to"), path.display());
        }
        RunOutcome::Resolved { config, summary } => {
            print!("{}", report::render(&config, &summary));
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) -> Result<()> {
    let builder = FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_target(verbose);
    let result = if verbose {
        tracing::subscriber::set_global_default(builder.with_max_level(Level::DEBUG).finish())
    } else {
        tracing::subscriber::set_global_default(
            builder.with_env_filter(EnvFilter::from_default_env()).finish(),
        )
    };
    result.map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {e}")))?;
    tracing::debug!("Verbose mode enabled");
    Ok(())
}
