//! `sealctl` — command-line front end for `token-codec`.
//!
//! Startup sequence:
//! 1. Parse command-line arguments.
//! 2. Load and validate [`config::Config`] from environment variables.
//! 3. Initialise structured JSON logging on stderr.
//! 4. Build the codec and run the subcommand against stdout.

mod commands;
mod config;
mod protocol;
mod telemetry;

use std::process::ExitCode;

use clap::Parser;
use token_codec::SymmetricCodec;
use tracing::info;

use commands::Args;
use protocol::{ErrorResponse, EXIT_CONFIG, EXIT_INTERNAL};

fn main() -> ExitCode {
    // -----------------------------------------------------------------------
    // 1. Arguments
    // -----------------------------------------------------------------------
    let args = Args::parse();

    // -----------------------------------------------------------------------
    // 2. Configuration
    // -----------------------------------------------------------------------
    let cfg = match config::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            // Telemetry is not yet up; write to stderr directly.
            report(&ErrorResponse::new("invalid_configuration", format!("{e:#}")));
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    // -----------------------------------------------------------------------
    // 3. Telemetry
    // -----------------------------------------------------------------------
    if let Err(e) = telemetry::init(&cfg.log_level) {
        report(&ErrorResponse::new("internal_error", format!("{e:#}")));
        return ExitCode::from(EXIT_INTERNAL);
    }
    info!(version = env!("CARGO_PKG_VERSION"), "sealctl starting");

    // -----------------------------------------------------------------------
    // 4. Command
    // -----------------------------------------------------------------------
    let codec = SymmetricCodec::from_config(&cfg.codec);
    let mut stdout = std::io::stdout().lock();
    match commands::run(&args.command, &codec, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let (exit, body) = protocol::classify(&e);
            report(&body);
            ExitCode::from(exit)
        }
    }
}

fn report(body: &ErrorResponse) {
    match serde_json::to_string(body) {
        Ok(json) => eprintln!("{json}"),
        Err(_) => eprintln!("{}: {}", body.code, body.message),
    }
}
