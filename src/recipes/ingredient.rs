use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A parsed ingredient line. `count` is absent when the line has no amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub count: Option<f64>,
    pub unit: String,
    pub ingredient: String,
}

static PARENTHESES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" *\([^)]*\) *").expect("valid parentheses pattern"));

const UNITS_LONG: [(&str, &str); 8] = [
    ("tablespoons", "tbsp"),
    ("tablespoon", "tbsp"),
    ("ounces", "oz"),
    ("ounce", "oz"),
    ("teaspoons", "tsp"),
    ("teaspoon", "tsp"),
    ("cups", "cup"),
    ("pounds", "pound"),
];

const UNITS: [&str; 7] = ["tbsp", "oz", "tsp", "cup", "pound", "kg", "g"];

fn normalize_unit(token: &str) -> &str {
    UNITS_LONG
        .iter()
        .find(|(long, _)| *long == token)
        .map_or(token, |&(_, short)| short)
}

/// Parses one free-text ingredient line. Never fails: lines that match no
/// pattern become a name with no count and no unit.
pub fn parse_ingredient(line: &str) -> Ingredient {
    let lower = line.to_lowercase();
    let stripped = PARENTHESES.replace_all(&lower, " ");
    let tokens: Vec<&str> = stripped.split_whitespace().map(normalize_unit).collect();

    if let Some(unit_index) = tokens.iter().position(|t| UNITS.contains(t)) {
        return Ingredient {
            count: sum_amounts(&tokens[..unit_index]),
            unit: tokens[unit_index].to_string(),
            ingredient: tokens[unit_index + 1..].join(" "),
        };
    }

    let leading = tokens
        .iter()
        .take_while(|t| parse_amount(t).is_some())
        .count();
    if leading > 0 {
        return Ingredient {
            count: sum_amounts(&tokens[..leading]),
            unit: String::new(),
            ingredient: tokens[leading..].join(" "),
        };
    }

    Ingredient {
        count: None,
        unit: String::new(),
        ingredient: tokens.join(" "),
    }
}

// "1 1/2" is a mixed number, so amounts in front of a unit add up.
fn sum_amounts(tokens: &[&str]) -> Option<f64> {
    tokens
        .iter()
        .filter_map(|t| parse_amount(t))
        .fold(None, |acc, n| Some(acc.unwrap_or(0.0) + n))
}

/// Parses `2`, `0.5`, `1/2`, a range `1-2` (averaged) or a dashed mixed
/// number `1-1/2`.
pub fn parse_amount(token: &str) -> Option<f64> {
    if let Some((left, right)) = token.split_once('-') {
        let (a, b) = (parse_number(left)?, parse_number(right)?);
        return if right.contains('/') && b < 1.0 && a.fract() == 0.0 {
            Some(a + b)
        } else {
            Some((a + b) / 2.0)
        };
    }
    parse_number(token)
}

fn parse_number(token: &str) -> Option<f64> {
    let value = match token.split_once('/') {
        Some((num, den)) => {
            let (num, den) = (num.parse::<f64>().ok()?, den.parse::<f64>().ok()?);
            (den != 0.0).then(|| num / den)?
        }
        None => token.parse::<f64>().ok()?,
    };
    (value.is_finite() && value >= 0.0).then_some(value)
}
