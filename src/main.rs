use std::io;

use dotenvy::dotenv;
use miniapp_api::config::Settings;
use miniapp_api::{build_server, build_service, create_pool, run_migrations};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let settings = Settings::from_env().map_err(io::Error::other)?;

    let pool = create_pool(&settings.database_url).map_err(io::Error::other)?;
    for version in run_migrations(&pool).map_err(io::Error::other)? {
        log::info!("Applied migration {}", version);
    }

    let service = build_service(pool, &settings).map_err(io::Error::other)?;

    log::info!("Starting server at http://{}:{}", settings.host, settings.port);

    build_server(service, &settings.host, settings.port)?.await
}
