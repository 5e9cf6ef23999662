use std::process::ExitCode;

use clap::Parser;
use illustra_cli::Cli;
use illustra_cli::logging;
use illustra_cli::output;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = logging::init(cli.verbose) {
        eprintln!("warning: logging disabled: {err}");
    }

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::report_error(&err);
            ExitCode::FAILURE
        }
    }
}
