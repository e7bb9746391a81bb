//! Recipe search app: models for search, recipe detail, shopping list and
//! likes, plus the controllers that drive them from user intents.

pub mod api;
pub mod controller;
pub mod ingredient;
pub mod likes;
pub mod list;
pub mod recipe;
pub mod search;
pub mod storage;
pub mod view;

#[cfg(test)]
mod mock;

pub use controller::{Controller, Intent};
pub use view::View;
