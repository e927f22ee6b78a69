use std::sync::Arc;

use habitrack_client::config::{load_config, print_schema};
use habitrack_client::startup::run;
use habitrack_client::utils::logger::init_logging;

const DEFAULT_CONFIG_PATH: &str = "./config.yaml";

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--schema") {
        print_schema();
        return;
    }

    let config_path = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .map(String::as_str)
        .unwrap_or(DEFAULT_CONFIG_PATH);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration from {}: {}", config_path, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Error initializing logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(Arc::new(config)).await {
        tracing::error!("Client failed to start: {}", e);
        std::process::exit(1);
    }
}
