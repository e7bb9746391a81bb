//! Laptop catalog server: a JSON catalog loaded once at startup and an HTML
//! detail page produced by placeholder substitution on every request.

pub mod models;
pub mod response;
pub mod routes;
pub mod template;

pub use models::{Catalog, LaptopRecord};
