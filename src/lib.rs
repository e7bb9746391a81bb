pub mod catalog;
pub mod config;
pub mod error;
pub mod recipes;

use std::path::PathBuf;
use std::sync::Arc;
use catalog::Catalog;

/// State shared across catalog handlers
#[derive(Clone)]
pub struct CatalogState {
    pub catalog: Arc<Catalog>,
    pub templates_dir: Arc<PathBuf>,
}
