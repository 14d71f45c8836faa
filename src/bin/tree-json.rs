//! tree-json CLI Binary
//!
//! Converts one directory tree into `<DEST>/<SOURCE name>.json`.

use clap::Parser;
use std::process;
use tracing::{error, info};
use tree_json::cli::{map_error, Cli, RunContext};
use tree_json::logging::init_logging;

fn main() {
    let cli = Cli::parse();

    let context = match RunContext::new(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(Some(&context.config().logging)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start async runtime: {}", e);
            process::exit(1);
        }
    };

    match runtime.block_on(context.execute()) {
        Ok(written) => {
            info!("Command completed successfully");
            println!("{}", written.display());
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}
