//! Dine-n-Shine backend entry point.
//!
//! Startup sequence: pick the config environment from `--env` (default
//! `dev`), initialize logging, connect to the document store, then serve.

use std::sync::Arc;

use dine_n_shine_backend::config::AppConfig;
use dine_n_shine_backend::gateway::{self, state::AppState};
use dine_n_shine_backend::logging::init_logging;
use dine_n_shine_backend::store;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load(&get_env());
    let _guard = init_logging(&config);

    let uri = config.mongo.connection_string()?;
    let database = store::connect(&uri, &config.mongo.database).await?;
    let orders = store::OrderStore::new(database.collection(&config.mongo.orders_collection));
    let services =
        store::ServiceStore::new(database.collection(&config.mongo.services_collection));

    let state = Arc::new(AppState::new(orders, services));
    gateway::run_server(&config, state).await
}
