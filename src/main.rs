use std::env;
use std::sync::Arc;

use log::debug;

use recipe_browser::api::HttpTransport;
use recipe_browser::model::SearchResult;
use recipe_browser::persist::JsonFileStore;
use recipe_browser::views::{RecipeTemplate, ResultsTemplate};
use recipe_browser::{AppConfig, StateStore, Surface, ViewReconciler};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let query = args
        .get(1)
        .ok_or("Please provide a search query as an argument")?;

    let config = AppConfig::load()?;
    debug!("using API at {}", config.api_url);

    let transport = Arc::new(HttpTransport::new(config.timeout)?);
    let persistence = Box::new(JsonFileStore::new(&config.bookmarks_path));
    let mut store = StateStore::new(config, transport, persistence);

    store.load_search_results(query).await?;
    let page = store.search_results_page(None).to_vec();

    let mut results_view = ViewReconciler::new(
        ResultsTemplate::<SearchResult>::results(),
        Surface::new("results"),
    );
    results_view.render(Some(&page));
    println!("{}", results_view.surface());

    // Show the first hit in full, the way following a result link would
    if let Some(first) = page.first() {
        store.load_recipe(&first.id).await?;

        let mut recipe_view = ViewReconciler::new(RecipeTemplate, Surface::new("recipe"));
        recipe_view.render(store.recipe());
        println!("{}", recipe_view.surface());
    }

    Ok(())
}
