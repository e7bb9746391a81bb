use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, info, warn};

use super::api::RecipeClient;
use super::likes::Likes;
use super::list::ShoppingList;
use super::recipe::{Direction, Recipe};
use super::search::Search;
use super::storage::Storage;
use super::view::View;

pub const RECIPE_ERROR: &str = "Error processing recipe!";

/// A user event, stripped of everything UI specific.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Search(String),
    GoToPage(usize),
    ShowRecipe(String),
    Servings(Direction),
    AddToList,
    DeleteListItem(String),
    UpdateListCount(String, f64),
    ToggleLike,
    RestoreLikes,
}

/// Everything the app knows at one moment. Each in-flight search or recipe
/// load holds a generation ticket; only the newest may install its result.
pub struct AppState {
    pub search: Option<Search>,
    pub recipe: Option<Recipe>,
    pub list: Option<ShoppingList>,
    pub likes: Likes,
    search_generation: u64,
    recipe_generation: u64,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            search: None,
            recipe: None,
            list: None,
            likes: Likes::new(storage),
            search_generation: 0,
            recipe_generation: 0,
        }
    }
}

pub struct Controller<V: View> {
    state: Mutex<AppState>,
    client: RecipeClient,
    view: V,
}

impl<V: View> Controller<V> {
    pub fn new(client: RecipeClient, storage: Arc<dyn Storage>, view: V) -> Self {
        Self {
            state: Mutex::new(AppState::new(storage)),
            client,
            view,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.state())
    }

    // The guard is never held across an await.
    fn state(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn dispatch(&self, intent: Intent) {
        debug!("Dispatching {:?}", intent);
        match intent {
            Intent::Search(query) => self.control_search(&query).await,
            Intent::GoToPage(page) => self.control_page(page),
            Intent::ShowRecipe(id) => self.control_recipe(&id).await,
            Intent::Servings(direction) => self.control_servings(direction),
            Intent::AddToList => self.control_list(),
            Intent::DeleteListItem(id) => self.delete_list_item(&id),
            Intent::UpdateListCount(id, count) => self.update_list_count(&id, count),
            Intent::ToggleLike => self.control_like(),
            Intent::RestoreLikes => self.restore_likes(),
        }
    }

    pub async fn control_search(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        let ticket = {
            let mut state = self.state();
            state.search_generation += 1;
            state.search_generation
        };

        self.view.clear_input();
        self.view.clear_results();
        self.view.render_loader();

        let mut search = Search::new(query);
        let result = search.get_results(&self.client).await;

        let mut state = self.state();
        if ticket != state.search_generation {
            debug!("Discarding results of superseded search {:?}", query);
            return;
        }

        match result {
            Ok(()) => {
                self.view.clear_loader();
                self.view.render_results(&search.results, 1);
                state.search = Some(search);
            }
            Err(e) => {
                error!("Something went wrong with searching: {}", e);
                self.view.clear_loader();
                state.search = None;
            }
        }
    }

    pub fn control_page(&self, page: usize) {
        let state = self.state();
        if let Some(search) = &state.search {
            self.view.clear_results();
            self.view.render_results(&search.results, page);
        }
    }

    pub async fn control_recipe(&self, id: &str) {
        let id = id.trim().trim_start_matches('#');
        if id.is_empty() {
            return;
        }

        self.view.clear_recipe();
        self.view.render_loader();

        let ticket = {
            let mut state = self.state();
            if state.search.is_some() {
                self.view.highlight_selected(id);
            }
            state.recipe_generation += 1;
            state.recipe_generation
        };

        let mut recipe = Recipe::new(id);
        let result = recipe.get_recipe(&self.client).await;

        let mut state = self.state();
        if ticket != state.recipe_generation {
            debug!("Discarding superseded recipe {}", id);
            return;
        }

        match result {
            Ok(()) => {
                recipe.parse_ingredients();
                recipe.calc_time();
                recipe.calc_servings();

                self.view.clear_loader();
                self.view.render_recipe(&recipe, state.likes.is_liked(id));
                state.recipe = Some(recipe);
            }
            Err(e) => {
                error!("Failed to load recipe {}: {}", id, e);
                self.view.clear_loader();
                self.view.alert(RECIPE_ERROR);
                state.recipe = None;
            }
        }
    }

    pub fn control_servings(&self, direction: Direction) {
        let mut state = self.state();
        let Some(recipe) = state.recipe.as_mut() else {
            return;
        };
        if direction == Direction::Dec && recipe.servings <= 1 {
            return;
        }
        recipe.update_servings(direction);
        self.view.update_servings_ingredients(recipe);
    }

    pub fn control_list(&self) {
        let mut state = self.state();
        let state = &mut *state;
        let Some(recipe) = &state.recipe else {
            warn!("No recipe to add to the shopping list");
            return;
        };

        let list = state.list.get_or_insert_with(ShoppingList::new);
        for ing in &recipe.ingredients {
            let item = list.add_item(ing.count, ing.unit.clone(), ing.ingredient.clone());
            self.view.render_item(&item);
        }
        info!(
            "Added {} ingredients of {} to the shopping list",
            recipe.ingredients.len(),
            recipe.id
        );
    }

    pub fn delete_list_item(&self, id: &str) {
        let mut state = self.state();
        if let Some(list) = state.list.as_mut() {
            list.delete_item(id);
        }
        self.view.delete_item(id);
    }

    pub fn update_list_count(&self, id: &str, count: f64) {
        if !count.is_finite() || count < 0.0 {
            warn!("Ignoring invalid count {} for item {}", count, id);
            return;
        }
        let mut state = self.state();
        if let Some(list) = state.list.as_mut() {
            list.update_count(id, count);
        }
    }

    pub fn control_like(&self) {
        let mut state = self.state();
        let state = &mut *state;
        let Some(recipe) = &state.recipe else {
            return;
        };

        if !state.likes.is_liked(&recipe.id) {
            let like = state
                .likes
                .add_like(&recipe.id, &recipe.title, &recipe.author, &recipe.img);
            self.view.toggle_like_btn(true);
            self.view.render_like(&like);
        } else {
            state.likes.delete_like(&recipe.id);
            self.view.toggle_like_btn(false);
            self.view.delete_like(&recipe.id);
        }
        self.view.toggle_like_menu(state.likes.num_likes());
    }

    pub fn restore_likes(&self) {
        let mut state = self.state();
        if let Err(e) = state.likes.read_storage() {
            warn!("Could not restore likes: {}", e);
        }
        self.view.toggle_like_menu(state.likes.num_likes());
        for like in &state.likes.likes {
            self.view.render_like(like);
        }
    }
}
