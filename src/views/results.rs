use std::marker::PhantomData;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::model::{Bookmark, SearchResult};
use crate::reconcile::Template;

/// Anything that can be shown as a preview row: search results and
/// bookmarks share the same summary shape.
pub trait PreviewItem {
    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn publisher(&self) -> &str;
    fn image_url(&self) -> &str;
}

impl PreviewItem for SearchResult {
    fn id(&self) -> &str {
        &self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn publisher(&self) -> &str {
        &self.publisher
    }
    fn image_url(&self) -> &str {
        &self.image_url
    }
}

impl PreviewItem for Bookmark {
    fn id(&self) -> &str {
        &self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn publisher(&self) -> &str {
        &self.publisher
    }
    fn image_url(&self) -> &str {
        &self.image_url
    }
}

/// Markup for a list of preview rows. Serves both the search result
/// surface and the bookmark surface, which differ only in their empty-state
/// message.
pub struct ResultsTemplate<T> {
    error_message: String,
    _marker: PhantomData<T>,
}

impl<T> ResultsTemplate<T> {
    pub fn new(error_message: impl Into<String>) -> Self {
        Self {
            error_message: error_message.into(),
            _marker: PhantomData,
        }
    }

    /// Template for the search result list.
    pub fn results() -> Self {
        Self::new("No recipes found for your query. Please try again!")
    }

    /// Template for the bookmark list.
    pub fn bookmarks() -> Self {
        Self::new("No bookmarks yet. Find a nice recipe and bookmark it :)")
    }
}

impl<T: PreviewItem> Template for ResultsTemplate<T> {
    type Data = Vec<T>;

    fn generate_markup(&self, items: &Self::Data) -> String {
        items.iter().map(preview_markup).collect()
    }

    fn error_message(&self) -> &str {
        &self.error_message
    }
}

fn preview_markup<T: PreviewItem>(item: &T) -> String {
    format!(
        r##"<li class="preview">
        <a class="preview__link" href="#{id}">
          <figure class="preview__fig">
            <img src="{image}" alt="{title_attr}" />
          </figure>
          <div class="preview__data">
            <h4 class="preview__name">{title}</h4>
            <p class="preview__publisher">{publisher}</p>
          </div>
        </a>
      </li>"##,
        id = encode_double_quoted_attribute(item.id()),
        image = encode_double_quoted_attribute(item.image_url()),
        title_attr = encode_double_quoted_attribute(item.title()),
        title = encode_text(item.title()),
        publisher = encode_text(item.publisher()),
    )
}
