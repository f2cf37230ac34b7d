//! Lumina storefront CLI

use std::process::ExitCode;

use crate::config::Config;

mod cli;
mod config;
mod observability;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            // Help and version requests also arrive here.
            _ = err.print();

            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(err) = observability::init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln"
        )]
        {
            eprintln!("{err}");
        }

        return ExitCode::FAILURE;
    }

    if let Err(err) = cli::run(config).await {
        #[expect(
            clippy::print_stderr,
            reason = "errors are reported to the user on stderr"
        )]
        {
            eprintln!("error: {err}");
        }

        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
