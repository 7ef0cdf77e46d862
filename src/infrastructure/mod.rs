pub mod models;
pub mod storefront_repo;
pub mod telegram;
