pub mod catalog;
pub mod errors;
pub mod notification;
pub mod order;
pub mod ports;
pub mod storefront;
