use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::Response,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::catalog::response;
use crate::catalog::template::{fill_laptop, LAPTOP_TEMPLATE};
use crate::error::{AppError, Result};
use crate::CatalogState;

pub fn create_router(state: CatalogState) -> Router {
    Router::new()
        .route("/", get(overview_handler))
        .route("/products", get(overview_handler))
        .route("/laptop", get(laptop_handler))
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// The overview page has no template yet.
async fn overview_handler() -> Response {
    response::html(String::new())
}

async fn laptop_handler(
    State(state): State<CatalogState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response> {
    let Some(laptop) = params.get("id").and_then(|id| state.catalog.get(id)) else {
        debug!("No laptop for id {:?}", params.get("id"));
        return Ok(response::not_found());
    };

    let path = state.templates_dir.join(LAPTOP_TEMPLATE);
    let template = tokio::fs::read_to_string(&path).await.map_err(|e| {
        error!("Failed to read {}: {}", path.display(), e);
        AppError::TemplateError(format!("cannot read {}", LAPTOP_TEMPLATE))
    })?;

    Ok(response::html(fill_laptop(&template, laptop)))
}

async fn not_found_handler() -> Response {
    response::not_found()
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::path::Path;
    use std::sync::Arc;

    use axum::http::StatusCode;
    use tokio::net::TcpListener;

    use super::*;
    use crate::catalog::response::NOT_FOUND_BODY;
    use crate::catalog::Catalog;

    const DATA: &str = r#"[
        {"productName": "Dell XPS 13", "image": "dell.jpg", "price": "1199",
         "screen": "13.3-inch", "cpu": "i7", "storage": "512 GB SSD", "ram": "16 GB",
         "description": "Small."},
        {"productName": "Apple MacBook", "image": "mac.jpg", "price": "1499",
         "screen": "13-inch", "cpu": "M1", "storage": "256 GB SSD", "ram": "8 GB",
         "description": "Light."}
    ]"#;

    const TEMPLATE: &str = "<h1>{%PRODUCTNAME%}</h1><img src=\"{%IMAGE%}\">\
        <p>{%PRICE%} {%SCREEN%} {%CPU%} {%STORAGE%} {%RAM%}</p><p>{%DESCRIPTION%}</p>\
        <title>{%PRODUCTNAME%}</title>";

    async fn serve(templates_dir: &Path) -> SocketAddr {
        let state = CatalogState {
            catalog: Arc::new(Catalog::from_json(DATA).unwrap()),
            templates_dir: Arc::new(templates_dir.to_path_buf()),
        };
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, create_router(state)).await.unwrap();
        });
        addr
    }

    fn templates() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(LAPTOP_TEMPLATE), TEMPLATE).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_laptop_page_is_filled() {
        let dir = templates();
        let addr = serve(dir.path()).await;

        let res = reqwest::get(format!("http://{}/laptop?id=0", addr)).await.unwrap();
        assert_eq!(res.status().as_u16(), StatusCode::OK.as_u16());
        assert!(res.headers()["content-type"].to_str().unwrap().starts_with("text/html"));

        let body = res.text().await.unwrap();
        assert!(!body.contains("{%"));
        assert_eq!(
            body,
            "<h1>Dell XPS 13</h1><img src=\"dell.jpg\"><p>1199 13.3-inch i7 512 GB SSD 16 GB</p>\
             <p>Small.</p><title>Dell XPS 13</title>"
        );
    }

    #[tokio::test]
    async fn test_template_is_read_per_request() {
        let dir = templates();
        let addr = serve(dir.path()).await;

        let first = reqwest::get(format!("http://{}/laptop?id=1", addr)).await.unwrap();
        assert!(first.text().await.unwrap().contains("Apple MacBook"));

        std::fs::write(dir.path().join(LAPTOP_TEMPLATE), "cpu={%CPU%}").unwrap();
        let second = reqwest::get(format!("http://{}/laptop?id=1", addr)).await.unwrap();
        assert_eq!(second.text().await.unwrap(), "cpu=M1");
    }

    #[tokio::test]
    async fn test_out_of_range_and_malformed_ids() {
        let dir = templates();
        let addr = serve(dir.path()).await;

        for query in ["?id=2", "?id=-1", "?id=abc", "?id=", ""] {
            let res = reqwest::get(format!("http://{}/laptop{}", addr, query)).await.unwrap();
            assert_eq!(res.status().as_u16(), 404, "query {:?}", query);
            assert_eq!(res.text().await.unwrap(), NOT_FOUND_BODY);
        }
    }

    #[tokio::test]
    async fn test_overview_and_unknown_routes() {
        let dir = templates();
        let addr = serve(dir.path()).await;

        for path in ["/", "/products"] {
            let res = reqwest::get(format!("http://{}{}", addr, path)).await.unwrap();
            assert_eq!(res.status().as_u16(), 200);
            assert!(res.headers()["content-type"].to_str().unwrap().starts_with("text/html"));
        }

        let res = reqwest::get(format!("http://{}/unknown", addr)).await.unwrap();
        assert_eq!(res.status().as_u16(), 404);
        assert_eq!(res.text().await.unwrap(), "Page was not found on server!");
    }

    #[tokio::test]
    async fn test_missing_template_is_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let addr = serve(dir.path()).await;

        let res = reqwest::get(format!("http://{}/laptop?id=0", addr)).await.unwrap();
        assert_eq!(res.status().as_u16(), 500);
    }
}
