//! The state store: single owner of the application state.
//!
//! All view-state (current recipe, search results and pagination, bookmark
//! collection) lives in one [`AppState`] owned here. Screens call store
//! operations to load and mutate it, then re-render from the accessors;
//! nothing else holds a copy.

use std::sync::Arc;

use log::{debug, error, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::JsonTransport;
use crate::config::AppConfig;
use crate::error::LookupError;
use crate::model::{AppState, Bookmark, Ingredient, Recipe, SearchResult, SearchState};
use crate::persist::BookmarkStore;

/// Draft keys carrying ingredient lines start with this prefix.
pub const INGREDIENT_PREFIX: &str = "ingredient";

#[derive(Debug, Deserialize)]
struct RecipeEnvelope {
    data: RecipeBody,
}

#[derive(Debug, Deserialize)]
struct RecipeBody {
    recipe: Recipe,
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    data: SearchBody,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    recipes: Vec<SearchResult>,
}

#[derive(Debug, Serialize)]
struct RecipeUpload<'a> {
    title: &'a str,
    source_url: &'a str,
    image_url: &'a str,
    publisher: &'a str,
    cooking_time: u32,
    servings: u32,
    ingredients: Vec<Ingredient>,
}

/// Owns the [`AppState`] and exposes every operation that mutates or
/// derives from it. Network and persistence collaborators are injected.
pub struct StateStore {
    state: AppState,
    api: Arc<dyn JsonTransport>,
    persistence: Box<dyn BookmarkStore>,
    config: AppConfig,
    /// Monotonically increasing id per search load; responses from an
    /// older generation are discarded instead of overwriting newer results.
    search_generation: u64,
}

impl StateStore {
    /// Builds the store and rehydrates bookmarks from persistence. A failed
    /// read starts the session with an empty collection.
    pub fn new(
        config: AppConfig,
        api: Arc<dyn JsonTransport>,
        persistence: Box<dyn BookmarkStore>,
    ) -> Self {
        let bookmarks = persistence.load().unwrap_or_else(|err| {
            warn!("could not rehydrate bookmarks: {err}");
            Vec::new()
        });

        Self {
            state: AppState {
                recipe: None,
                search: SearchState::new(config.results_per_page),
                bookmarks,
            },
            api,
            persistence,
            config,
            search_generation: 0,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        self.state.recipe.as_ref()
    }

    pub fn search(&self) -> &SearchState {
        &self.state.search
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.state.bookmarks
    }

    /// Fetches a recipe by id and makes it the current one, deriving its
    /// `bookmarked` flag from the bookmark collection. Fetch and decode
    /// failures propagate untouched.
    pub async fn load_recipe(&mut self, id: &str) -> Result<(), LookupError> {
        let url = format!("{}/{}", self.config.api_url, id);
        let data = self.api.get_json(&url).await?;

        let mut recipe = decode_recipe(data)?;
        recipe.bookmarked = self.state.bookmarks.iter().any(|b| b.id == recipe.id);
        self.state.recipe = Some(recipe);
        Ok(())
    }

    /// Fetches recipes matching `query`, stores their summaries and resets
    /// the page to 1. A response that resolves after a newer search started
    /// is stale and gets discarded.
    pub async fn load_search_results(&mut self, query: &str) -> Result<(), LookupError> {
        self.search_generation += 1;
        let generation = self.search_generation;
        self.state.search.query = query.to_string();

        let url = format!("{}?search={}", self.config.api_url, query);
        let data = self.api.get_json(&url).await?;

        if generation != self.search_generation {
            debug!("discarding stale search response for {query:?}");
            return Ok(());
        }

        let envelope: SearchEnvelope = serde_json::from_value(data)?;
        self.state.search.results = envelope.data.recipes;
        self.state.search.page = 1;
        Ok(())
    }

    /// Slice of the result list for `page` (or the current page when
    /// `None`), setting it as current. Purely a slicing contract: an
    /// out-of-range page yields an empty slice, a partial last page is
    /// truncated. No bounds are enforced here; callers supply valid pages.
    pub fn search_results_page(&mut self, page: Option<usize>) -> &[SearchResult] {
        if let Some(page) = page {
            self.state.search.page = page;
        }

        let per_page = self.state.search.results_per_page;
        let start = (self.state.search.page.saturating_sub(1)) * per_page;
        let end = self.state.search.page * per_page;

        let results = &self.state.search.results;
        &results[start.min(results.len())..end.min(results.len())]
    }

    /// Rescales every ingredient quantity proportionally, then adopts the
    /// new servings. Callers are expected to pass `new_servings > 0`; this
    /// operation does not validate it.
    pub fn update_servings(&mut self, new_servings: u32) {
        let Some(recipe) = self.state.recipe.as_mut() else {
            return;
        };

        // new_qty = old_qty * new_servings / old_servings
        let factor = f64::from(new_servings) / f64::from(recipe.servings);
        for ingredient in &mut recipe.ingredients {
            if let Some(quantity) = ingredient.quantity.as_mut() {
                *quantity *= factor;
            }
        }
        recipe.servings = new_servings;
    }

    /// Appends a bookmark, flags the current recipe when it is the one
    /// bookmarked, and writes the collection through to persistence.
    /// Uniqueness is the caller's contract (add xor delete, see
    /// [`toggle_bookmark`](Self::toggle_bookmark)).
    pub fn add_bookmark(&mut self, bookmark: Bookmark) {
        let id = bookmark.id.clone();
        self.state.bookmarks.push(bookmark);

        if let Some(recipe) = self.state.recipe.as_mut() {
            if recipe.id == id {
                recipe.bookmarked = true;
            }
        }
        self.persist_bookmarks();
    }

    /// Removes the bookmark with `id` and clears the current recipe's flag
    /// when it matches. Deleting an absent id is a tolerant no-op.
    pub fn delete_bookmark(&mut self, id: &str) {
        if let Some(index) = self.state.bookmarks.iter().position(|b| b.id == id) {
            self.state.bookmarks.remove(index);
        }

        if let Some(recipe) = self.state.recipe.as_mut() {
            if recipe.id == id {
                recipe.bookmarked = false;
            }
        }
        self.persist_bookmarks();
    }

    /// Add xor delete for the currently loaded recipe, preserving the
    /// at-most-one-bookmark-per-id set semantics.
    pub fn toggle_bookmark(&mut self) {
        let Some(recipe) = self.state.recipe.as_ref() else {
            return;
        };

        if recipe.bookmarked {
            let id = recipe.id.clone();
            self.delete_bookmark(&id);
        } else {
            let bookmark = Bookmark::from(recipe);
            self.add_bookmark(bookmark);
        }
    }

    /// Parses a flat draft bag into a structured recipe, posts it, adopts
    /// the returned recipe as current and bookmarks it unconditionally.
    ///
    /// Any `ingredient*` entry whose non-empty value does not split into
    /// exactly quantity, unit and description aborts the whole upload with
    /// [`LookupError::MalformedIngredient`]; nothing is sent.
    pub async fn upload_recipe(&mut self, draft: &[(String, String)]) -> Result<(), LookupError> {
        let ingredients = parse_ingredients(draft)?;

        let upload = RecipeUpload {
            title: draft_field(draft, "title"),
            source_url: draft_field(draft, "source_url"),
            image_url: draft_field(draft, "image_url"),
            publisher: draft_field(draft, "publisher"),
            cooking_time: draft_field(draft, "cooking_time").parse().unwrap_or_default(),
            servings: draft_field(draft, "servings").parse().unwrap_or_default(),
            ingredients,
        };

        let url = match &self.config.key {
            Some(key) => format!("{}?key={}", self.config.api_url, key),
            None => self.config.api_url.clone(),
        };
        let body = serde_json::to_value(&upload)?;
        let data = self.api.send_json(&url, &body).await?;

        let recipe = decode_recipe(data)?;
        let bookmark = Bookmark::from(&recipe);
        self.state.recipe = Some(recipe);
        self.add_bookmark(bookmark);
        Ok(())
    }

    /// Fire-and-forget write-through; a failed write is logged, not
    /// surfaced.
    fn persist_bookmarks(&self) {
        if let Err(err) = self.persistence.save(&self.state.bookmarks) {
            error!("could not persist bookmarks: {err}");
        }
    }
}

fn decode_recipe(data: Value) -> Result<Recipe, LookupError> {
    let envelope: RecipeEnvelope = serde_json::from_value(data)?;
    Ok(envelope.data.recipe)
}

fn draft_field<'a>(draft: &'a [(String, String)], name: &str) -> &'a str {
    draft
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
        .unwrap_or("")
}

fn parse_ingredients(draft: &[(String, String)]) -> Result<Vec<Ingredient>, LookupError> {
    draft
        .iter()
        .filter(|(key, value)| key.starts_with(INGREDIENT_PREFIX) && !value.is_empty())
        .map(|(_, value)| {
            let compact = value.replace(' ', "");
            match compact.split(',').collect::<Vec<_>>().as_slice() {
                [quantity, unit, description] => {
                    let quantity = if quantity.is_empty() {
                        None
                    } else {
                        Some(quantity.parse::<f64>().map_err(|_| {
                            LookupError::MalformedIngredient(value.clone())
                        })?)
                    };
                    Ok(Ingredient {
                        quantity,
                        unit: (*unit).to_string(),
                        description: (*description).to_string(),
                    })
                }
                _ => Err(LookupError::MalformedIngredient(value.clone())),
            }
        })
        .collect()
}
