use tracing::info;

use super::api::RecipeClient;
use super::ingredient::{parse_ingredient, Ingredient};
use crate::error::Result;

pub const DEFAULT_SERVINGS: u32 = 4;
const MINUTES_PER_PERIOD: u32 = 15;
const INGREDIENTS_PER_PERIOD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Dec,
    Inc,
}

/// The recipe currently on screen.
#[derive(Debug, Clone, Default)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub author: String,
    pub img: String,
    pub url: String,
    pub raw_ingredients: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    pub servings: u32,
    pub time: u32,
}

impl Recipe {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub async fn get_recipe(&mut self, client: &RecipeClient) -> Result<()> {
        let data = client.recipe(&self.id).await?;
        info!("Fetched recipe {} ({})", data.id, data.title);

        self.title = data.title;
        self.author = data.author;
        self.img = data.image;
        self.url = data.source_url;
        self.raw_ingredients = data.ingredients;
        Ok(())
    }

    pub fn parse_ingredients(&mut self) {
        self.ingredients = self
            .raw_ingredients
            .iter()
            .map(|line| parse_ingredient(line))
            .collect();
    }

    /// Assumes 15 minutes for every started group of three ingredients.
    pub fn calc_time(&mut self) {
        let periods = self.ingredients.len().div_ceil(INGREDIENTS_PER_PERIOD);
        self.time = periods as u32 * MINUTES_PER_PERIOD;
    }

    pub fn calc_servings(&mut self) {
        self.servings = DEFAULT_SERVINGS;
    }

    /// Scales every ingredient amount to one serving more or less.
    /// Decreasing below one serving does nothing.
    pub fn update_servings(&mut self, direction: Direction) {
        let new_servings = match direction {
            Direction::Dec if self.servings <= 1 => return,
            Direction::Dec => self.servings - 1,
            Direction::Inc => self.servings + 1,
        };

        // Nothing sensible to scale from before servings are known.
        if self.servings > 0 {
            let ratio = f64::from(new_servings) / f64::from(self.servings);
            for ing in &mut self.ingredients {
                if let Some(count) = ing.count.as_mut() {
                    *count *= ratio;
                }
            }
        }
        self.servings = new_servings;
    }
}
