use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;
use recipe_catalog::{
    config::RecipeConfig,
    recipes::{
        api::{RecipeClient, RecipeSummary},
        likes::LikedRecipe,
        list::ShoppingItem,
        recipe::{Direction, Recipe},
        search::{page_buttons, paginate, RES_PER_PAGE},
        storage::FileStorage,
        view::format_count,
        Controller, Intent, View,
    },
};

const HELP: &str = "\
commands:
  search <query>       find recipes
  page <n>             show another page of results
  show <id>            open a recipe
  inc | dec            one serving more or less
  add                  add the recipe's ingredients to the shopping list
  del <item-id>        remove a shopping list item
  count <item-id> <n>  change a shopping list amount
  like                 like or unlike the open recipe
  help | quit";

/// Plain-text rendering for the terminal.
struct TerminalView;

impl View for TerminalView {
    fn render_loader(&self) {
        println!("loading...");
    }

    fn clear_loader(&self) {}

    fn clear_input(&self) {}

    fn clear_results(&self) {}

    fn render_results(&self, results: &[RecipeSummary], page: usize) {
        if results.is_empty() {
            println!("no recipes found");
            return;
        }
        for recipe in paginate(results, page, RES_PER_PAGE) {
            println!("  {:>8}  {} ({})", recipe.id, recipe.title, recipe.author);
        }
        let buttons = page_buttons(page, results.len(), RES_PER_PAGE);
        if let Some(prev) = buttons.prev {
            println!("  < page {}", prev);
        }
        if let Some(next) = buttons.next {
            println!("  page {} >", next);
        }
    }

    fn highlight_selected(&self, id: &str) {
        println!("selected {}", id);
    }

    fn clear_recipe(&self) {}

    fn render_recipe(&self, recipe: &Recipe, is_liked: bool) {
        let heart = if is_liked { "♥" } else { "♡" };
        println!("\n{} {}", recipe.title, heart);
        println!("by {} | {} min | {} servings", recipe.author, recipe.time, recipe.servings);
        self.update_servings_ingredients(recipe);
        if !recipe.url.is_empty() {
            println!("directions: {}", recipe.url);
        }
    }

    fn update_servings_ingredients(&self, recipe: &Recipe) {
        println!("ingredients for {} servings:", recipe.servings);
        for ing in &recipe.ingredients {
            println!("  {} {} {}", format_count(ing.count), ing.unit, ing.ingredient);
        }
    }

    fn render_item(&self, item: &ShoppingItem) {
        println!(
            "  + {} {} {}  [{}]",
            format_count(item.count),
            item.unit,
            item.ingredient,
            item.id
        );
    }

    fn delete_item(&self, id: &str) {
        println!("  - {}", id);
    }

    fn toggle_like_btn(&self, is_liked: bool) {
        println!("{}", if is_liked { "liked" } else { "unliked" });
    }

    fn toggle_like_menu(&self, num_likes: usize) {
        println!("{} liked recipes", num_likes);
    }

    fn render_like(&self, like: &LikedRecipe) {
        println!("  ♥ {} {} ({})", like.id, like.title, like.author);
    }

    fn delete_like(&self, id: &str) {
        println!("  ♡ {}", id);
    }

    fn alert(&self, message: &str) {
        eprintln!("!! {}", message);
    }
}

enum Command {
    Run(Intent),
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    let (name, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    let intent = match name {
        "" => return None,
        "help" => return Some(Command::Help),
        "quit" | "exit" => return Some(Command::Quit),
        "search" => Intent::Search(rest.to_string()),
        "page" => Intent::GoToPage(rest.parse().ok()?),
        "show" => Intent::ShowRecipe(rest.to_string()),
        id if id.starts_with('#') => Intent::ShowRecipe(id.to_string()),
        "inc" => Intent::Servings(Direction::Inc),
        "dec" => Intent::Servings(Direction::Dec),
        "add" => Intent::AddToList,
        "del" => Intent::DeleteListItem(rest.to_string()),
        "count" => {
            let (id, value) = rest.split_once(' ')?;
            Intent::UpdateListCount(id.to_string(), value.trim().parse().ok()?)
        }
        "like" => Intent::ToggleLike,
        _ => return None,
    };
    Some(Command::Run(intent))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = RecipeConfig::load()?;
    info!("Using recipe API at {}", config.api_url);

    let storage = Arc::new(FileStorage::new(config.likes_dir.clone()));
    let controller = Controller::new(RecipeClient::from_config(&config), storage, TerminalView);
    controller.dispatch(Intent::RestoreLikes).await;

    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Some(Command::Run(intent)) => controller.dispatch(intent).await,
            Some(Command::Help) => println!("{}", HELP),
            Some(Command::Quit) => break,
            None if line.trim().is_empty() => {}
            None => println!("unknown command, try `help`"),
        }
    }

    Ok(())
}
