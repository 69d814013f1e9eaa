use std::sync::Arc;

use mockito::Matcher;
use serde_json::json;

use recipe_browser::api::HttpTransport;
use recipe_browser::persist::MemoryStore;
use recipe_browser::{AppConfig, LookupError, StateStore};

fn draft() -> Vec<(String, String)> {
    vec![
        ("title".to_string(), "Homemade Pizza".to_string()),
        ("source_url".to_string(), "https://example.com/mine".to_string()),
        ("image_url".to_string(), "https://example.com/mine.jpg".to_string()),
        ("publisher".to_string(), "Me".to_string()),
        ("cooking_time".to_string(), "45".to_string()),
        ("servings".to_string(), "2".to_string()),
        ("ingredient-1".to_string(), "0.5,kg,Flour".to_string()),
        ("ingredient-2".to_string(), "1,,Egg".to_string()),
        ("ingredient-3".to_string(), String::new()),
    ]
}

fn store_for(server: &mockito::Server) -> StateStore {
    let config = AppConfig {
        api_url: format!("{}/recipes", server.url()),
        key: Some("test-key".to_string()),
        ..AppConfig::default()
    };
    let transport = Arc::new(HttpTransport::new(config.timeout).unwrap());
    StateStore::new(config, transport, Box::<MemoryStore>::default())
}

#[tokio::test]
async fn test_upload_posts_and_adopts_recipe() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/recipes")
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .match_body(Matcher::PartialJson(json!({
            "title": "Homemade Pizza",
            "publisher": "Me",
            "cooking_time": 45,
            "servings": 2,
            "ingredients": [
                { "quantity": 0.5, "unit": "kg", "description": "Flour" },
                { "quantity": 1.0, "unit": "", "description": "Egg" }
            ]
        })))
        .with_status(201)
        .with_body(
            json!({
                "data": {
                    "recipe": {
                        "id": "new123",
                        "title": "Homemade Pizza",
                        "publisher": "Me",
                        "source_url": "https://example.com/mine",
                        "image_url": "https://example.com/mine.jpg",
                        "servings": 2,
                        "cooking_time": 45,
                        "ingredients": [
                            { "quantity": 0.5, "unit": "kg", "description": "Flour" },
                            { "quantity": 1, "unit": "", "description": "Egg" }
                        ],
                        "key": "test-key"
                    }
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let mut store = store_for(&server);
    store.upload_recipe(&draft()).await.unwrap();

    let recipe = store.recipe().unwrap();
    assert_eq!(recipe.id, "new123");
    assert_eq!(recipe.key.as_deref(), Some("test-key"));

    // An uploaded recipe is bookmarked unconditionally
    assert!(recipe.bookmarked);
    assert_eq!(store.bookmarks().len(), 1);
    assert_eq!(store.bookmarks()[0].id, "new123");
}

#[tokio::test]
async fn test_upload_aborts_on_malformed_ingredient() {
    let server = mockito::Server::new_async().await;

    let mut bad_draft = draft();
    bad_draft.push(("ingredient-4".to_string(), "just flour".to_string()));

    let mut store = store_for(&server);
    let err = store.upload_recipe(&bad_draft).await.unwrap_err();

    assert!(matches!(err, LookupError::MalformedIngredient(_)));

    // No partial success: nothing was sent, nothing was adopted
    assert!(store.recipe().is_none());
    assert!(store.bookmarks().is_empty());
}
