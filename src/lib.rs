pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use std::error::Error;
use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::storefront_service::StorefrontService;
use config::Settings;
use infrastructure::storefront_repo::DieselStorefrontRepository;
use infrastructure::telegram::TelegramNotifier;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::miniapp::get_business,
        handlers::miniapp::get_catalog,
        handlers::miniapp::get_contact,
        handlers::miniapp::create_order,
    ),
    tags((name = "miniapp", description = "Telegram Mini App storefront"))
)]
pub struct ApiDoc;

/// Run any pending Diesel migrations against the pool's database and return
/// the versions that were applied.
pub fn run_migrations(pool: &DbPool) -> Result<Vec<String>, Box<dyn Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    Ok(applied.iter().map(|v| v.to_string()).collect())
}

/// Wire the Diesel repository and the Telegram notifier into a service.
pub fn build_service(pool: DbPool, settings: &Settings) -> Result<StorefrontService, reqwest::Error> {
    Ok(StorefrontService::new(
        Arc::new(DieselStorefrontRepository::new(pool)),
        Arc::new(TelegramNotifier::new(&settings.telegram_api_url)?),
        settings.contact_defaults(),
        settings.admin_telegram_id.clone(),
    ))
}

/// Register the Mini App routes under `/api/miniapp`. The caller provides
/// the `StorefrontService` as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/miniapp")
            .route("/business/{bot_id}", web::get().to(handlers::miniapp::get_business))
            .route("/catalog/{bot_id}", web::get().to(handlers::miniapp::get_catalog))
            .route("/contact/{bot_id}", web::get().to(handlers::miniapp::get_contact))
            .route("/order", web::post().to(handlers::miniapp::create_order)),
    );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    service: StorefrontService,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let service = web::Data::new(service);
    let openapi = ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(Logger::default())
            .configure(configure)
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()))
    })
    .bind((host.to_string(), port))?
    .run())
}
