use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: String,
    pub count: Option<f64>,
    pub unit: String,
    pub ingredient: String,
}

/// The shopping list. Unknown ids are ignored by every operation.
#[derive(Debug, Clone, Default)]
pub struct ShoppingList {
    pub items: Vec<ShoppingItem>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(
        &mut self,
        count: Option<f64>,
        unit: impl Into<String>,
        ingredient: impl Into<String>,
    ) -> ShoppingItem {
        let item = ShoppingItem {
            id: Uuid::new_v4().to_string(),
            count,
            unit: unit.into(),
            ingredient: ingredient.into(),
        };
        self.items.push(item.clone());
        item
    }

    pub fn delete_item(&mut self, id: &str) {
        self.items.retain(|item| item.id != id);
    }

    pub fn update_count(&mut self, id: &str, count: f64) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.count = Some(count);
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
