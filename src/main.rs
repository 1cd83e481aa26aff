use dotenv::dotenv;
use tracing::{info, warn};

use solartn_backend::app::app::App;
use solartn_backend::util::logger::Logger;

#[tokio::main]
async fn main() {
    let _logger = Logger::new().expect("Failed to initialize logging");

    info!("🚀 Starting SolarTN Backend");

    match dotenv() {
        Ok(_) => info!("✅ Loaded .env file"),
        Err(e) => warn!("⚠️ No .env file loaded: {} (using system env vars)", e),
    }

    let app = App::new().await;
    app.start().await;
}
