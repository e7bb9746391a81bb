use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::storage::Storage;
use crate::error::Result;

pub const STORAGE_KEY: &str = "likes";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikedRecipe {
    pub id: String,
    pub title: String,
    pub author: String,
    pub img: String,
}

/// Liked recipes, mirrored to storage after every change.
pub struct Likes {
    pub likes: Vec<LikedRecipe>,
    storage: Arc<dyn Storage>,
}

impl Likes {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            likes: Vec::new(),
            storage,
        }
    }

    /// Adds a like and persists. Liking an id twice returns the existing entry.
    pub fn add_like(
        &mut self,
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        img: impl Into<String>,
    ) -> LikedRecipe {
        let id = id.into();
        if let Some(existing) = self.likes.iter().find(|like| like.id == id) {
            return existing.clone();
        }

        let like = LikedRecipe {
            id,
            title: title.into(),
            author: author.into(),
            img: img.into(),
        };
        self.likes.push(like.clone());
        self.persist_or_log();
        like
    }

    pub fn delete_like(&mut self, id: &str) {
        let before = self.likes.len();
        self.likes.retain(|like| like.id != id);
        if self.likes.len() != before {
            self.persist_or_log();
        }
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.likes.iter().any(|like| like.id == id)
    }

    pub fn num_likes(&self) -> usize {
        self.likes.len()
    }

    pub fn persist_storage(&self) -> Result<()> {
        let json = serde_json::to_string(&self.likes)?;
        self.storage.set(STORAGE_KEY, &json)
    }

    /// Replaces the collection with the stored one. A missing key leaves an
    /// empty collection.
    pub fn read_storage(&mut self) -> Result<()> {
        self.likes = match self.storage.get(STORAGE_KEY)? {
            Some(json) => serde_json::from_str(&json)?,
            None => Vec::new(),
        };
        info!("Restored {} liked recipes", self.likes.len());
        Ok(())
    }

    // The in-memory change stands even when the write fails.
    fn persist_or_log(&self) {
        if let Err(e) = self.persist_storage() {
            error!("Failed to persist likes: {}", e);
        }
    }
}
