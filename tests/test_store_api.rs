use std::sync::Arc;

use mockito::Matcher;
use serde_json::json;

use recipe_browser::api::HttpTransport;
use recipe_browser::persist::MemoryStore;
use recipe_browser::{AppConfig, LookupError, StateStore};

fn recipe_body(id: &str, title: &str) -> serde_json::Value {
    json!({
        "data": {
            "recipe": {
                "id": id,
                "title": title,
                "publisher": "Test Kitchen",
                "source_url": "https://example.com/pizza",
                "image_url": "https://example.com/pizza.jpg",
                "servings": 4,
                "cooking_time": 60,
                "ingredients": [
                    { "quantity": 0.5, "unit": "kg", "description": "flour" },
                    { "quantity": null, "unit": "", "description": "salt" }
                ]
            }
        }
    })
}

fn search_body(ids: &[&str]) -> serde_json::Value {
    let recipes: Vec<_> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "title": format!("Recipe {id}"),
                "publisher": "Test Kitchen",
                "image_url": format!("https://example.com/{id}.jpg")
            })
        })
        .collect();
    json!({ "data": { "recipes": recipes } })
}

fn store_for(server: &mockito::Server, results_per_page: usize) -> StateStore {
    let config = AppConfig {
        api_url: format!("{}/recipes", server.url()),
        results_per_page,
        ..AppConfig::default()
    };
    let transport = Arc::new(HttpTransport::new(config.timeout).unwrap());
    StateStore::new(config, transport, Box::<MemoryStore>::default())
}

#[tokio::test]
async fn test_load_recipe_maps_wire_shape() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipes/abc123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(recipe_body("abc123", "Pizza").to_string())
        .create_async()
        .await;

    let mut store = store_for(&server, 10);
    store.load_recipe("abc123").await.unwrap();

    let recipe = store.recipe().unwrap();
    assert_eq!(recipe.id, "abc123");
    assert_eq!(recipe.title, "Pizza");
    assert_eq!(recipe.servings, 4);
    assert_eq!(recipe.cooking_time, 60);
    assert_eq!(recipe.ingredients.len(), 2);
    assert_eq!(recipe.ingredients[0].quantity, Some(0.5));
    assert_eq!(recipe.ingredients[1].quantity, None);
    assert!(recipe.key.is_none());
    assert!(!recipe.bookmarked);
}

#[tokio::test]
async fn test_load_recipe_derives_bookmarked_flag() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipes/abc123")
        .with_status(200)
        .with_body(recipe_body("abc123", "Pizza").to_string())
        .create_async()
        .await;
    let _m2 = server
        .mock("GET", "/recipes/def456")
        .with_status(200)
        .with_body(recipe_body("def456", "Pasta").to_string())
        .create_async()
        .await;

    let mut store = store_for(&server, 10);
    store.load_recipe("abc123").await.unwrap();
    store.toggle_bookmark();

    // Loading another recipe and coming back keeps the flag in sync with
    // the bookmark collection
    store.load_recipe("def456").await.unwrap();
    assert!(!store.recipe().unwrap().bookmarked);

    store.load_recipe("abc123").await.unwrap();
    assert!(store.recipe().unwrap().bookmarked);
}

#[tokio::test]
async fn test_search_results_paginate() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipes")
        .match_query(Matcher::UrlEncoded("search".into(), "pizza".into()))
        .with_status(200)
        .with_body(search_body(&["a", "b", "c"]).to_string())
        .create_async()
        .await;

    let mut store = store_for(&server, 2);
    store.load_search_results("pizza").await.unwrap();

    assert_eq!(store.search().query, "pizza");
    assert_eq!(store.search().page, 1);
    assert_eq!(store.search().page_count(), 2);

    let page1: Vec<String> = store
        .search_results_page(Some(1))
        .iter()
        .map(|r| r.id.clone())
        .collect();
    assert_eq!(page1, ["a", "b"]);

    let page2: Vec<String> = store
        .search_results_page(Some(2))
        .iter()
        .map(|r| r.id.clone())
        .collect();
    assert_eq!(page2, ["c"]);
}

#[tokio::test]
async fn test_new_search_resets_page() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipes")
        .match_query(Matcher::UrlEncoded("search".into(), "pizza".into()))
        .with_status(200)
        .with_body(search_body(&["a", "b", "c"]).to_string())
        .create_async()
        .await;
    let _m2 = server
        .mock("GET", "/recipes")
        .match_query(Matcher::UrlEncoded("search".into(), "pasta".into()))
        .with_status(200)
        .with_body(search_body(&["x"]).to_string())
        .create_async()
        .await;

    let mut store = store_for(&server, 2);
    store.load_search_results("pizza").await.unwrap();
    store.search_results_page(Some(2));

    store.load_search_results("pasta").await.unwrap();
    assert_eq!(store.search().page, 1);
    assert_eq!(store.search().results.len(), 1);
    assert_eq!(store.search().results[0].id, "x");
}

#[tokio::test]
async fn test_remote_rejection_carries_server_message() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipes/bad-id")
        .with_status(400)
        .with_body(json!({ "status": "fail", "message": "Invalid _id: bad-id" }).to_string())
        .create_async()
        .await;

    let mut store = store_for(&server, 10);
    let err = store.load_recipe("bad-id").await.unwrap_err();

    match err {
        LookupError::RemoteRejection { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid _id: bad-id");
        }
        other => panic!("expected RemoteRejection, got {other:?}"),
    }
    assert!(store.recipe().is_none());
}

#[tokio::test]
async fn test_timeout_wins_the_race() {
    let server = mockito::Server::new_async().await;

    let config = AppConfig {
        api_url: format!("{}/recipes", server.url()),
        timeout: 0,
        ..AppConfig::default()
    };
    let transport = Arc::new(HttpTransport::new(config.timeout).unwrap());
    let mut store = StateStore::new(config, transport, Box::<MemoryStore>::default());

    let err = store.load_recipe("abc123").await.unwrap_err();
    assert!(matches!(err, LookupError::Timeout(0)));
}
