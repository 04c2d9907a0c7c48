use laundry_desk::{
    bot::{self, BotData},
    config::{admin, database, services},
    core::store::LaundryStore,
    errors::{Error, Result},
};
use dotenvy::dotenv;
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Seed catalog, used only when the database holds no services yet
    let seed_services = services::load_default_seed_services()
        .inspect_err(|e| error!("Failed to load service configuration: {}", e))?;
    info!("Loaded {} seed services.", seed_services.len());

    // 4. Database and store
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;
    let store = LaundryStore::load(db, seed_services)
        .await
        .inspect(|store| {
            info!(
                "Store ready: {} bookings, {} services.",
                store.bookings().len(),
                store.services().len()
            );
        })
        .inspect_err(|e| error!("Failed to load store: {}", e))?;

    // 5. Run the bot
    let credentials = admin::get_admin_credentials();
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, BotData::new(store, credentials)).await
}
