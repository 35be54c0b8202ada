use config::Config;
use sea_orm_migration::prelude::*;
use std::env;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    // DATABASE_URL wins; otherwise use config.yaml, then the embedded SQLite file.
    if env::var("DATABASE_URL").is_err() {
        let settings = Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .build()
            .unwrap_or_default();
        let url = settings.get_string("database_url").unwrap_or_else(|_| {
            let path = settings
                .get_string("sqlite_path")
                .unwrap_or_else(|_| "db.sqlite3".to_string());
            format!("sqlite://{path}?mode=rwc")
        });
        env::set_var("DATABASE_URL", url);
    }
    cli::run_cli(migration::Migrator).await;
}
