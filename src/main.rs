//! Kodegen Plugin Publish - publishes a plugin build to the platform.
//!
//! Reads plugin/team ids and release notes from flags or CI action inputs,
//! account secrets from the environment, and exits 0 only after the new
//! version is published.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match kodegen_plugin_publish::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
