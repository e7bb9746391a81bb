//! The narrow rendering interface the controllers push model snapshots into.
//! Implementations own the markup; nothing here touches a UI toolkit.

use super::api::RecipeSummary;
use super::likes::LikedRecipe;
use super::list::ShoppingItem;
use super::recipe::Recipe;

pub trait View {
    fn render_loader(&self);
    fn clear_loader(&self);

    fn clear_input(&self);
    fn clear_results(&self);
    /// Renders the 1-based `page` of `results` together with its page buttons.
    fn render_results(&self, results: &[RecipeSummary], page: usize);
    fn highlight_selected(&self, id: &str);

    fn clear_recipe(&self);
    fn render_recipe(&self, recipe: &Recipe, is_liked: bool);
    fn update_servings_ingredients(&self, recipe: &Recipe);

    fn render_item(&self, item: &ShoppingItem);
    fn delete_item(&self, id: &str);

    fn toggle_like_btn(&self, is_liked: bool);
    fn toggle_like_menu(&self, num_likes: usize);
    fn render_like(&self, like: &LikedRecipe);
    fn delete_like(&self, id: &str);

    /// A blocking, user-facing error message.
    fn alert(&self, message: &str);
}

/// Formats an amount as a whole number plus a simple fraction, e.g. `2 1/2`.
/// Amounts with no close fraction fall back to two decimals; missing ones
/// render as `?`.
pub fn format_count(count: Option<f64>) -> String {
    let Some(count) = count else {
        return "?".to_string();
    };

    let whole = count.trunc();
    let frac = count - whole;
    if frac < 1e-4 {
        return format!("{}", whole as i64);
    }

    let fraction = (2..=8u32).find_map(|den| {
        let num = (frac * f64::from(den)).round();
        ((frac - num / f64::from(den)).abs() < 0.01 && num >= 1.0).then_some((num as u32, den))
    });

    match fraction {
        Some((num, den)) if num == den => format!("{}", whole as i64 + 1),
        Some((num, den)) if whole == 0.0 => format!("{}/{}", num, den),
        Some((num, den)) => format!("{} {}/{}", whole as i64, num, den),
        None => format!("{:.2}", count),
    }
}
