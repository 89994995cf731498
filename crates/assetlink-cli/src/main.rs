use assetlink_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    let destination = logging::init();
    tracing::debug!(?destination, "logging ready");

    // Parse CLI and dispatch.
    if let Err(err) = Cli::run_from_args() {
        eprintln!("assetlink error: {:#}", err);
        std::process::exit(1);
    }
}
