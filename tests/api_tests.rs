use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use storefront_search::api::{AppState, create_router};
use storefront_search::data_models::SearchState;
use storefront_search::refinements::RefinementCatalog;

mod test_helpers {
    use super::*;

    pub fn test_router() -> Router {
        let state = Arc::new(AppState {
            catalog: RefinementCatalog::default(),
            defaults: SearchState {
                sort: Some("best-matches".to_string()),
                ..SearchState::default()
            },
        });
        create_router(state, "static")
    }

    pub fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub async fn send(request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = test_router().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    pub async fn send_json(request: Request<Body>) -> (StatusCode, Value) {
        let (status, body) = send(request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }
}

use test_helpers::*;

#[tokio::test]
async fn test_decode_endpoint() {
    let request = Request::builder()
        .uri("/api/search-params?limit=12&refine=c_size%3DM%7CL&format=grid")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send_json(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["limit"], 12);
    assert_eq!(body["offset"], 0);
    assert_eq!(body["sort"], "best-matches");
    assert_eq!(body["refine"]["c_size"], json!(["M", "L"]));
    assert_eq!(body["extra"]["format"], "grid");
}

#[tokio::test]
async fn test_decode_endpoint_without_query() {
    let request = Request::builder()
        .uri("/api/search-params")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send_json(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["limit"], 25);
    assert_eq!(body["refine"], json!({}));
}

#[tokio::test]
async fn test_encode_endpoint() {
    let request = post_json(
        "/api/search-params/encode",
        json!({
            "state": {"offset": 0, "limit": 25, "refine": {"c_size": ["M", "L"]}},
            "includePath": true,
            "path": "/category/womens",
            "toggleRefinement": {"attributeId": "c_size", "value": "M"}
        }),
    );
    let (status, body) = send_json(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], "/category/womens?limit=25&offset=0&refine=c_size%3DL");
}

#[tokio::test]
async fn test_encode_endpoint_requires_path() {
    let request = post_json(
        "/api/search-params/encode",
        json!({"state": {}, "includePath": true}),
    );
    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(String::from_utf8(body).unwrap().contains("includePath"));
}

#[tokio::test]
async fn test_toggle_endpoint() {
    let request = post_json(
        "/api/search-params/toggle",
        json!({
            "query": "refine=price%3D%2820..50%29",
            "path": "/search",
            "attributeId": "price",
            "value": "(20..50)"
        }),
    );
    let (status, body) = send_json(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["refine"], json!({}));
    assert_eq!(body["url"], "/search?limit=25&offset=0&sort=best-matches");
}

#[tokio::test]
async fn test_toggle_endpoint_rejects_empty_attribute() {
    let request = post_json(
        "/api/search-params/toggle",
        json!({"query": "", "attributeId": "  "}),
    );
    let (status, _) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_refinements_endpoint() {
    let request = post_json(
        "/api/refinements",
        json!({
            "query": "refine=c_size%3DM",
            "path": "/category/womens",
            "refinements": [
                {
                    "attributeId": "c_size",
                    "label": "Size",
                    "values": [
                        {"label": "M", "value": "M", "hitCount": 4},
                        {"label": "L", "value": "L", "hitCount": 0}
                    ]
                },
                {"attributeId": "c_brand", "label": "Brand", "values": []}
            ]
        }),
    );
    let (status, body) = send_json(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["expanded"], json!([0]));
    assert_eq!(body["groups"].as_array().unwrap().len(), 1);
    assert_eq!(body["groups"][0]["kind"]["type"], "swatch");
    assert_eq!(body["groups"][0]["entries"][0]["selected"], true);
    assert_eq!(
        body["selected"][0]["href"],
        "/category/womens?limit=25&offset=0&sort=best-matches"
    );
    assert_eq!(body["clearAllHref"], "/category/womens");
}
