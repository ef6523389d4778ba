use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use mig::cli::{usage_banner, Args};
use mig::config::ConfigFile;
use mig::db::list_supported;
use mig::error::MigError;
use mig::logging;
use mig::output::render_error;

fn main() -> ExitCode {
    if std::env::args_os().len() <= 1 {
        eprintln!("{}", usage_banner());
        return ExitCode::FAILURE;
    }

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    logging::init(args.verbose);

    if args.drivers {
        println!("{}", list_supported(true));
    }
    let Some(command) = args.command else {
        return ExitCode::SUCCESS;
    };

    let config = match ConfigFile::resolve(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    debug!(driver = ?config.connection.driver, "configuration resolved");

    match command.run(&config.connection, args.format) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        // Reported operation failures still exit 0.
        Err(MigError::Db(err)) => {
            eprintln!("{}", render_error(&err));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
