//! `monk` entry-point: loads settings, opens storage, runs one command.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use mockable::DefaultClock;
use tokio::runtime::Builder;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use monk::app;
use monk::config::MonkSettings;
use monk::inbound::cli::{Cli, run};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = match MonkSettings::load_ambient() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("monk: failed to load settings: {err}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(settings.log_json);

    let runtime = match Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("monk: failed to start runtime: {err}");
            return ExitCode::FAILURE;
        }
    };
    runtime.block_on(async_main(cli, settings))
}

async fn async_main(cli: Cli, settings: MonkSettings) -> ExitCode {
    let monk = match app::open(&settings, Arc::new(DefaultClock)) {
        Ok(monk) => monk,
        Err(err) => {
            error!(error = %err, "startup failed");
            eprintln!("monk: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = io::stdout().lock();
    match run(&monk, cli.command, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            drop(stdout.flush());
            eprintln!("monk: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn init_tracing(json: bool) {
    // Logs go to stderr so command output stays clean.
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}
