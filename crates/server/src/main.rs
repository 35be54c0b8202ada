use nexios_starter::api::start_webserver;
use nexios_starter::config::load_config;
use nexios_starter::database::{close_db, init_db};
use nexios_starter::logging::init_tracing;

#[tokio::main]
async fn main() -> color_eyre::eyre::Result<()> {
    color_eyre::install()?;

    // A missing .env file is fine; the environment may already be set.
    let _ = dotenvy::dotenv();

    let config = load_config()?;
    init_tracing(&config)?;
    tracing::info!(
        bind_address = %config.bind_address,
        cors_allow_origins = ?config.cors_allow_origins,
        log_file = ?config.log_file,
        "configuration loaded"
    );

    // Refuse to serve traffic without a working database.
    let db = init_db(&config).await?;

    let served = start_webserver(&config).await;
    close_db(db).await?;
    served
}
