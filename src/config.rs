use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub user_service_url: String,
    pub transaction_service_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok(); // Load .env file if present

        Ok(Config {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8082".to_string())
                .parse()?,
            database_url: env::var("DATABASE_URL")?,
            user_service_url: env::var("USER_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8081/users".to_string()),
            transaction_service_url: env::var("TRANSACTION_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8083/transactions".to_string()),
        })
    }
}
