pub mod admin_repo;
pub mod content_repo;
pub mod quote_repo;
pub mod repository_error;

use mongodb::{options::ClientOptions, Client, Database};
use tracing::info;

use crate::config::MongoConfig;

/// Opens a shared database handle. Each repository takes a collection off it.
pub async fn connect(config: &MongoConfig) -> Result<Database, mongodb::error::Error> {
    let mut client_options = ClientOptions::parse(&config.uri).await?;
    client_options.app_name = Some("SolarTnBackend".to_string());
    client_options.max_pool_size = Some(config.pool_size);
    client_options.connect_timeout = Some(std::time::Duration::from_secs(
        config.connection_timeout_secs,
    ));

    let client = Client::with_options(client_options)?;
    info!("Connected to MongoDB database: {}", config.database);
    Ok(client.database(&config.database))
}
