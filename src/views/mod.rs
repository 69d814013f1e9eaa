//! Screen templates: one markup generator per rendering surface.
//!
//! Each template implements the [`Template`](crate::reconcile::Template)
//! capability and is composed with a
//! [`ViewReconciler`](crate::reconcile::ViewReconciler) by injection.

mod recipe;
mod results;

pub use recipe::RecipeTemplate;
pub use results::{PreviewItem, ResultsTemplate};
