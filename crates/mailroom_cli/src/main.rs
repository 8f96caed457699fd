//! Interactive mailroom entry point.
//!
//! Exit codes:
//! - 0: user exited (or input closed)
//! - 1: unrecoverable error, e.g. a thank-you letter could not be written

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use mailroom_core::{
    core_version, init_logging, load_demo_donors, DonorCollection, DonorRepository, DonorService,
    FsLetterWriter,
};
use std::io;
use std::process::ExitCode;

mod app;
mod config;
mod views;

use app::App;
use config::{AppConfig, Cli};
use views::Console;

fn main() -> ExitCode {
    let config = AppConfig::from_cli(Cli::parse());

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=session_abort module=cli status=error");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &AppConfig) -> Result<()> {
    info!(
        "event=cli_start module=cli status=ok version={} seed={}",
        core_version(),
        config.seed_demo_data
    );

    let mut collection = DonorCollection::with_capacity_hint(config.capacity_hint);
    if config.seed_demo_data {
        load_demo_donors(&mut collection).context("failed to load demonstration donors")?;
    }

    let console = Console::new(io::stdin().lock(), io::stdout().lock());
    let letters = FsLetterWriter::new(&config.letters_dir);
    let mut app = App::new(DonorService::new(collection), console, letters);
    app.run()?;

    info!(
        "event=cli_exit module=cli status=ok donors={}",
        app.service().repo().len()
    );
    Ok(())
}
