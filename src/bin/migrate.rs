//! One-off schema migration: applies pending migrations and exits.
//!
//!   DATABASE_URL=postgres://... cargo run --bin migrate

use std::env;
use std::process::ExitCode;

use dotenvy::dotenv;
use miniapp_api::{create_pool, run_migrations};

fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let Some(database_url) = env::var("DATABASE_URL").ok().filter(|u| !u.is_empty()) else {
        log::error!("DATABASE_URL not set");
        return ExitCode::FAILURE;
    };

    let pool = match create_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to connect to the database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run_migrations(&pool) {
        Ok(applied) if applied.is_empty() => {
            log::info!("Schema is up to date");
            ExitCode::SUCCESS
        }
        Ok(applied) => {
            for version in applied {
                log::info!("Applied migration {}", version);
            }
            log::info!("Migration completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Migration failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
