//! View reconciliation: making a rendering surface match newly generated
//! markup with minimal mutation.
//!
//! A [`ViewReconciler`] composes an injected [`Template`] with a
//! [`Surface`]. Full renders replace the surface contents; incremental
//! updates walk the new and live trees in lockstep and patch only changed
//! text and attributes, so element identities (and any transient UI state
//! attached to them) survive.

use html_escape::encode_text;
use log::debug;

use crate::surface::{parse_fragment, LiveNode, Surface};

/// Markup-producing capability implemented by each screen renderer.
///
/// Screens supply a markup generator plus their standard messages; the
/// reconciler owns everything else. Composition by injection, no view base
/// class.
pub trait Template {
    type Data;

    fn generate_markup(&self, data: &Self::Data) -> String;

    /// Message shown when rendering absent or empty data.
    fn error_message(&self) -> &str {
        "Something went wrong. Please try again!"
    }

    /// Default text for [`ViewReconciler::render_message`].
    fn success_message(&self) -> &str {
        ""
    }
}

/// Data that can be tested for emptiness before rendering.
///
/// An empty sequence renders the error fragment instead of an empty list.
pub trait ViewData {
    fn has_content(&self) -> bool {
        true
    }
}

impl<T> ViewData for Vec<T> {
    fn has_content(&self) -> bool {
        !self.is_empty()
    }
}

impl ViewData for crate::model::Recipe {}

/// Pairs a rendering surface with an injected markup template.
pub struct ViewReconciler<T: Template> {
    template: T,
    surface: Surface,
}

impl<T: Template> ViewReconciler<T>
where
    T::Data: ViewData,
{
    pub fn new(template: T, surface: Surface) -> Self {
        Self { template, surface }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn template(&self) -> &T {
        &self.template
    }

    /// Full render: replaces the entire surface contents with newly
    /// generated markup. Absent or empty data renders the standard error
    /// fragment instead.
    pub fn render(&mut self, data: Option<&T::Data>) {
        let Some(data) = data.filter(|data| data.has_content()) else {
            let message = self.template.error_message().to_string();
            self.render_error(&message);
            return;
        };

        let markup = self.template.generate_markup(data);
        self.surface.set_markup(&markup);
    }

    /// Incremental update: patches changed text and attributes in place.
    ///
    /// Correct only when old and new markup produce congruent tag
    /// sequences; when the shape changed (a conditional element appeared or
    /// disappeared) the positional pairing would silently corrupt the tree,
    /// so a shape mismatch falls back to a full replace instead.
    ///
    /// Attributes present on a live node but absent from the new markup are
    /// left stale; no attribute removal is performed.
    pub fn update(&mut self, data: &T::Data) {
        let markup = self.template.generate_markup(data);
        let new_children = parse_fragment(&markup);

        if !congruent(self.surface.children(), &new_children) {
            debug!(
                "surface {:?}: shape changed, falling back to full replace",
                self.surface.name()
            );
            self.surface.replace_children(new_children);
            return;
        }

        patch(self.surface.children_mut(), &new_children);
    }

    /// Full-surface loading indicator; never goes through the diff path.
    pub fn render_spinner(&mut self) {
        let markup = r##"<div class="spinner">
            <svg>
              <use href="icons.svg#icon-loader"></use>
            </svg>
          </div>"##;
        self.surface.set_markup(markup);
    }

    /// Full-surface error fragment.
    pub fn render_error(&mut self, message: &str) {
        let markup = format!(
            r##"<div class="error">
            <div>
              <svg>
                <use href="icons.svg#icon-alert-triangle"></use>
              </svg>
            </div>
            <p>{}</p>
          </div>"##,
            encode_text(message)
        );
        self.surface.set_markup(&markup);
    }

    /// Full-surface success message; an empty `message` falls back to the
    /// template's default.
    pub fn render_message(&mut self, message: &str) {
        let message = if message.is_empty() {
            self.template.success_message().to_string()
        } else {
            message.to_string()
        };
        let markup = format!(
            r##"<div class="message">
            <div>
              <svg>
                <use href="icons.svg#icon-smile"></use>
              </svg>
            </div>
            <p>{}</p>
          </div>"##,
            encode_text(&message)
        );
        self.surface.set_markup(&markup);
    }
}

/// Shape congruence: same tag at every position, recursively.
fn congruent(current: &[LiveNode], new: &[LiveNode]) -> bool {
    current.len() == new.len()
        && current
            .iter()
            .zip(new)
            .all(|(cur, new)| cur.tag() == new.tag() && congruent(cur.children(), new.children()))
}

/// Node-by-node walk in document order over congruent trees.
///
/// Per position: a structurally changed node whose new counterpart carries
/// non-whitespace text gets its text replaced; a structurally changed node
/// gets every new attribute copied over. Unchanged nodes are not touched.
fn patch(current: &mut [LiveNode], new: &[LiveNode]) {
    for (cur, new) in current.iter_mut().zip(new) {
        if !cur.is_equal(new) {
            if new
                .first_text()
                .is_some_and(|text| !text.trim().is_empty())
            {
                cur.set_text(new.text());
            }
            cur.merge_attrs(new);
        }
        patch(cur.children_mut(), new.children());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountTemplate;

    impl Template for CountTemplate {
        type Data = Vec<String>;

        fn generate_markup(&self, data: &Self::Data) -> String {
            data.iter()
                .map(|item| format!(r#"<li class="item">{item}</li>"#))
                .collect()
        }

        fn error_message(&self) -> &str {
            "Nothing to show!"
        }
    }

    #[test]
    fn test_render_replaces_surface() {
        let mut view = ViewReconciler::new(CountTemplate, Surface::new("list"));
        view.render(Some(&vec!["one".to_string(), "two".to_string()]));
        assert_eq!(view.surface().children().len(), 2);
        assert_eq!(view.surface().text_content(), "one two");
    }

    #[test]
    fn test_render_empty_data_shows_error_fragment() {
        let mut view = ViewReconciler::new(CountTemplate, Surface::new("list"));
        view.render(Some(&vec![]));
        assert!(view.surface().find_by_class("error").is_some());
        assert_eq!(view.surface().text_content(), "Nothing to show!");
    }

    #[test]
    fn test_render_absent_data_shows_error_fragment() {
        let mut view = ViewReconciler::new(CountTemplate, Surface::new("list"));
        view.render(None);
        assert!(view.surface().find_by_class("error").is_some());
    }

    #[test]
    fn test_update_patches_text_preserving_identity() {
        let mut view = ViewReconciler::new(CountTemplate, Surface::new("list"));
        view.render(Some(&vec!["one".to_string(), "two".to_string()]));
        let ids: Vec<u64> = view.surface().children().iter().map(|n| n.id()).collect();

        view.update(&vec!["one".to_string(), "three".to_string()]);
        let after: Vec<u64> = view.surface().children().iter().map(|n| n.id()).collect();

        assert_eq!(ids, after);
        assert_eq!(view.surface().children()[0].text(), "one");
        assert_eq!(view.surface().children()[1].text(), "three");
    }

    #[test]
    fn test_update_shape_mismatch_falls_back_to_replace() {
        let mut view = ViewReconciler::new(CountTemplate, Surface::new("list"));
        view.render(Some(&vec!["one".to_string()]));
        let old_id = view.surface().children()[0].id();

        view.update(&vec!["one".to_string(), "two".to_string()]);
        assert_eq!(view.surface().children().len(), 2);
        assert_ne!(view.surface().children()[0].id(), old_id);
    }

    #[test]
    fn test_render_spinner_and_message() {
        let mut view = ViewReconciler::new(CountTemplate, Surface::new("list"));
        view.render_spinner();
        assert!(view.surface().find_by_class("spinner").is_some());

        view.render_message("Recipe was successfully uploaded :)");
        assert!(view.surface().find_by_class("message").is_some());
        assert_eq!(
            view.surface().text_content(),
            "Recipe was successfully uploaded :)"
        );
    }
}
