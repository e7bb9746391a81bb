//! A local stand-in for the recipe API, served on an ephemeral port.

use std::collections::HashMap;
use std::time::Duration;

use axum::{extract::Query, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const PIZZA_COUNT: usize = 23;
pub const RECIPE_ID: &str = "47746";
pub const SLOW_RECIPE_ID: &str = "slow";

fn summary(id: usize, title: &str) -> Value {
    json!({
        "recipe_id": id.to_string(),
        "title": format!("{} {}", title, id),
        "publisher": "Closet Cooking",
        "image_url": format!("http://img.example/{}.jpg", id),
        "social_rank": 99.9,
    })
}

async fn search(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    let query = params.get("q").map(String::as_str).unwrap_or_default();
    match query {
        "pizza" => {
            let recipes: Vec<Value> = (0..PIZZA_COUNT).map(|i| summary(i, "Pizza")).collect();
            Json(json!({ "count": PIZZA_COUNT, "recipes": recipes })).into_response()
        }
        "slow" => {
            tokio::time::sleep(Duration::from_millis(300)).await;
            Json(json!({ "count": 1, "recipes": [summary(0, "Slow")] })).into_response()
        }
        "fail" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        _ => Json(json!({ "count": 0, "recipes": [] })).into_response(),
    }
}

async fn recipe(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    let id = params.get("rId").cloned().unwrap_or_default();
    if id == "unknown" {
        return Json(json!({ "error": "Couldn't find recipe" }));
    }
    if id == SLOW_RECIPE_ID {
        tokio::time::sleep(Duration::from_millis(300)).await;
    }
    Json(json!({
        "recipe": {
            "recipe_id": id,
            "title": "Pizza Dip",
            "publisher": "Closet Cooking",
            "image_url": "http://img.example/dip.jpg",
            "source_url": "http://closetcooking.example/pizza-dip",
            "ingredients": [
                "1 1/2 cups flour",
                "3 eggs",
                "a pinch of salt",
                "8 ounces tomato sauce",
            ],
        }
    }))
}

/// Serves the mock API and returns its base URL.
pub async fn spawn_api() -> String {
    let app = Router::new()
        .route("/api/search", get(search))
        .route("/api/get", get(recipe));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api", addr)
}
