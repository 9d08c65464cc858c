use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub gateway: GatewayConfig,
    pub mongo: MongoConfig,
    /// Origins allowed to call the API from a browser.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MongoConfig {
    /// Cluster host, e.g. "dine-n-shine-cluster.1b1o3.mongodb.net".
    pub cluster: String,
    pub database: String,
    #[serde(default = "default_orders_collection")]
    pub orders_collection: String,
    #[serde(default = "default_services_collection")]
    pub services_collection: String,
}

fn default_orders_collection() -> String {
    "orders".to_string()
}

fn default_services_collection() -> String {
    "services".to_string()
}

impl MongoConfig {
    /// Build the srv connection string. Credentials come from the
    /// `MONGO_USER` / `MONGO_PASSWORD` environment, never from the config
    /// file.
    pub fn connection_string(&self) -> anyhow::Result<String> {
        let user = std::env::var("MONGO_USER").context("MONGO_USER is not set")?;
        let password = std::env::var("MONGO_PASSWORD").context("MONGO_PASSWORD is not set")?;
        Ok(format!(
            "mongodb+srv://{}:{}@{}/{}?retryWrites=true&w=majority",
            user, password, self.cluster, self.database
        ))
    }
}

impl AppConfig {
    pub fn load(env: &str) -> Self {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .unwrap_or_else(|_| panic!("Failed to read config file: {}", config_path));
        serde_yaml::from_str(&content).expect("Failed to parse config yaml")
    }
}
