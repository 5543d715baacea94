use dotenvy::dotenv;
use quartier_prices::{
    config::{database, map},
    core::{presentation, query},
    errors::Result,
};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load map configuration (config.toml is optional)
    let config = map::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    info!(
        "Using '{}' strategy with {:?} null rendering",
        config.map.strategy, config.map.null_rendering
    );

    // 4. Connect to the listing store and make sure tables exist
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to listing store: {}", e))?;
    database::create_tables(&db).await?;

    // 5. Build the price map
    let records = query::aggregate_query(&db, config.map.strategy, &config.map.options())
        .await
        .inspect_err(|e| error!("Price map query failed: {}", e))?;
    for record in &records {
        debug!("{}", presentation::describe_record(record));
    }

    // 6. Print the document for the map front end
    let document = presentation::render_map_records(&records, config.map.null_rendering)?;
    println!("{}", serde_json::to_string_pretty(&document)?);

    Ok(())
}
