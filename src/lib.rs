//! Recipe lookup core.
//!
//! Fetches recipe and search data from a remote API, keeps all view-state
//! (current recipe, paginated search results, bookmarks) in a single
//! [`StateStore`], and renders that state into live element trees through a
//! minimal-patch [`ViewReconciler`]. Ingredient quantities are formatted as
//! fractions by [`Fraction`].
//!
//! Network transport and bookmark persistence are injected collaborators
//! ([`api::JsonTransport`], [`persist::BookmarkStore`]), so the store can be
//! exercised against stubs in tests and against reqwest in the binary.

pub mod api;
pub mod config;
pub mod error;
pub mod fraction;
pub mod model;
pub mod persist;
pub mod reconcile;
pub mod store;
pub mod surface;
pub mod views;

pub use crate::config::AppConfig;
pub use crate::error::LookupError;
pub use crate::fraction::Fraction;
pub use crate::model::{AppState, Bookmark, Ingredient, Recipe, SearchResult, SearchState};
pub use crate::reconcile::{Template, ViewReconciler};
pub use crate::store::StateStore;
pub use crate::surface::Surface;
