use dotenvy::dotenv;
mod application;
mod domain;
mod infrastructure;
mod utils;
use crate::infrastructure::http::run_server;
use crate::utils::config::AppConfig;
use tracing::error;

#[tokio::main]
async fn main() {
    dotenv().ok();
    utils::setup_logging();

    let result = match AppConfig::from_env() {
        Ok(config) => run_server(config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        error!("Error running server: {:#}", e);
        std::process::exit(1);
    }
}
