use serde::{Deserialize, Serialize};

/// One line of a recipe's ingredient list.
///
/// `quantity` is proportional to the recipe's servings: rescaling servings
/// rescales every quantity by the same factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub quantity: Option<f64>,
    pub unit: String,
    pub description: String,
}

/// A full recipe as loaded from the API or created by upload.
///
/// Field names match the wire shape of the recipe API, so this type
/// deserializes straight out of the `data.recipe` envelope. `bookmarked` is
/// derived from the bookmark collection, never sent by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub publisher: String,
    pub source_url: String,
    pub image_url: String,
    pub servings: u32,
    pub cooking_time: u32,
    pub ingredients: Vec<Ingredient>,
    /// Present only on user-uploaded recipes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing)]
    pub bookmarked: bool,
}

/// A summary row in the search result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub publisher: String,
    pub image_url: String,
}

/// Search query, its result list and the current page.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<SearchResult>,
    /// 1-based; within `[1, ceil(len / per_page)]` while results are
    /// non-empty, unconstrained when they are empty
    pub page: usize,
    pub results_per_page: usize,
}

impl SearchState {
    pub fn new(results_per_page: usize) -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            page: 1,
            results_per_page,
        }
    }

    /// Number of pages the current result list spans.
    pub fn page_count(&self) -> usize {
        self.results.len().div_ceil(self.results_per_page)
    }
}

/// A persisted recipe summary, uniquely keyed by recipe id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    pub publisher: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl From<&Recipe> for Bookmark {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.clone(),
            title: recipe.title.clone(),
            publisher: recipe.publisher.clone(),
            image_url: recipe.image_url.clone(),
            key: recipe.key.clone(),
        }
    }
}

/// The single source of truth for the whole session.
///
/// Owned by the [`StateStore`](crate::store::StateStore); every other
/// component reads from it or mutates it through store operations, no
/// component keeps a shadow copy.
#[derive(Debug)]
pub struct AppState {
    pub recipe: Option<Recipe>,
    pub search: SearchState,
    pub bookmarks: Vec<Bookmark>,
}
