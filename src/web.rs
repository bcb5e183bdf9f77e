#![cfg(not(tarpaulin_include))]

use clap::Parser;
use log::info;
use user_report::app;
use user_report::config::Config;
use user_report::repository::UserStore;

/// Main entry point for the web application
///
/// Reads configuration from flags and environment, loads the users (the
/// configured file, or the demo set) and serves until the server fails.
/// Logging goes through `env_logger`, `RUST_LOG` overrides the `info` default.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();

    let store = match &config.users {
        Some(path) => UserStore::from_json_file(path)?,
        None => UserStore::demo()?,
    };
    info!("Serving {} users", store.len());

    #[cfg(unix)]
    if let Some(path) = config.users.clone() {
        tokio::spawn(app::reload_on_hangup(store.clone(), path));
    }

    app::run(&config, store).await
}
