use std::sync::Arc;

use calsieve::{server, Client, Config};

#[tokio::main]
async fn main() {
    env_logger::init();

    let location = match std::env::var("CONFIG_LOCATION") {
        Ok(location) => location,
        Err(_) => {
            log::info!("CONFIG_LOCATION environment variable not provided, using default config.json");
            "config.json".to_string()
        }
    };

    let config = match Config::load(&location) {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading config from {}: {}", location, err);
            std::process::exit(1);
        }
    };

    let client = Arc::new(Client::new(&config));

    if let Err(err) = server::run(&config, client).await {
        log::error!("Web server error: {}", err);
        std::process::exit(1);
    }
}
