use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::fraction::format_quantity;
use crate::model::{Ingredient, Recipe};
use crate::reconcile::Template;

/// Markup for the recipe detail surface.
///
/// The servings buttons carry `data-update-to` attributes and the bookmark
/// icon switches between outline and fill, so servings changes and bookmark
/// toggles go through the incremental update path as pure text/attribute
/// patches.
pub struct RecipeTemplate;

impl Template for RecipeTemplate {
    type Data = Recipe;

    fn generate_markup(&self, recipe: &Recipe) -> String {
        let ingredients: String = recipe.ingredients.iter().map(ingredient_markup).collect();
        let bookmark_icon = if recipe.bookmarked {
            "icon-bookmark-fill"
        } else {
            "icon-bookmark"
        };

        format!(
            r##"<figure class="recipe__fig">
          <img src="{image}" alt="{title_attr}" class="recipe__img" />
          <h1 class="recipe__title">
            <span>{title}</span>
          </h1>
        </figure>

        <div class="recipe__details">
          <div class="recipe__info">
            <svg class="recipe__info-icon">
              <use href="icons.svg#icon-clock"></use>
            </svg>
            <span class="recipe__info-data recipe__info-data--minutes">{cooking_time}</span>
            <span class="recipe__info-text">minutes</span>
          </div>
          <div class="recipe__info">
            <svg class="recipe__info-icon">
              <use href="icons.svg#icon-users"></use>
            </svg>
            <span class="recipe__info-data recipe__info-data--people">{servings}</span>
            <span class="recipe__info-text">servings</span>

            <div class="recipe__info-buttons">
              <button class="btn--tiny btn--update-servings" data-update-to="{fewer}">
                <svg>
                  <use href="icons.svg#icon-minus-circle"></use>
                </svg>
              </button>
              <button class="btn--tiny btn--update-servings" data-update-to="{more}">
                <svg>
                  <use href="icons.svg#icon-plus-circle"></use>
                </svg>
              </button>
            </div>
          </div>

          <button class="btn--round btn--bookmark">
            <svg>
              <use href="icons.svg#{bookmark_icon}"></use>
            </svg>
          </button>
        </div>

        <div class="recipe__ingredients">
          <h2 class="heading--2">Recipe ingredients</h2>
          <ul class="recipe__ingredient-list">{ingredients}</ul>
        </div>

        <div class="recipe__directions">
          <h2 class="heading--2">How to cook it</h2>
          <p class="recipe__directions-text">
            This recipe was carefully designed and tested by
            <span class="recipe__publisher">{publisher}</span>. Please check out
            directions at their website.
          </p>
          <a class="btn--small recipe__btn" href="{source_url}" target="_blank">
            <span>Directions</span>
            <svg class="search__icon">
              <use href="icons.svg#icon-arrow-right"></use>
            </svg>
          </a>
        </div>"##,
            image = encode_double_quoted_attribute(&recipe.image_url),
            title_attr = encode_double_quoted_attribute(&recipe.title),
            title = encode_text(&recipe.title),
            cooking_time = recipe.cooking_time,
            servings = recipe.servings,
            fewer = recipe.servings.saturating_sub(1),
            more = recipe.servings + 1,
            bookmark_icon = bookmark_icon,
            ingredients = ingredients,
            publisher = encode_text(&recipe.publisher),
            source_url = encode_double_quoted_attribute(&recipe.source_url),
        )
    }

    fn error_message(&self) -> &str {
        "We could not find this recipe. Please try another one!"
    }

    fn success_message(&self) -> &str {
        "Recipe was successfully uploaded :)"
    }
}

fn ingredient_markup(ingredient: &Ingredient) -> String {
    format!(
        r##"<li class="recipe__ingredient">
        <svg class="recipe__icon">
          <use href="icons.svg#icon-check"></use>
        </svg>
        <div class="recipe__quantity">{quantity}</div>
        <div class="recipe__description">
          <span class="recipe__unit">{unit}</span>
          {description}
        </div>
      </li>"##,
        quantity = format_quantity(ingredient.quantity),
        unit = encode_text(&ingredient.unit),
        description = encode_text(&ingredient.description),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Recipe {
        Recipe {
            id: "abc123".to_string(),
            title: "Spicy & Sweet Pizza".to_string(),
            publisher: "Test Kitchen".to_string(),
            source_url: "https://example.com/pizza".to_string(),
            image_url: "https://example.com/pizza.jpg".to_string(),
            servings: 4,
            cooking_time: 60,
            ingredients: vec![Ingredient {
                quantity: Some(0.5),
                unit: "kg".to_string(),
                description: "flour".to_string(),
            }],
            key: None,
            bookmarked: false,
        }
    }

    #[test]
    fn test_markup_carries_servings_buttons() {
        let markup = RecipeTemplate.generate_markup(&sample());
        assert!(markup.contains(r#"data-update-to="3""#));
        assert!(markup.contains(r#"data-update-to="5""#));
    }

    #[test]
    fn test_markup_escapes_title() {
        let markup = RecipeTemplate.generate_markup(&sample());
        assert!(markup.contains("Spicy &amp; Sweet Pizza"));
    }

    #[test]
    fn test_quantity_rendered_as_fraction() {
        let markup = RecipeTemplate.generate_markup(&sample());
        assert!(markup.contains(r#"<div class="recipe__quantity">1/2</div>"#));
    }

    #[test]
    fn test_bookmark_icon_follows_flag() {
        let mut recipe = sample();
        let outline = RecipeTemplate.generate_markup(&recipe);
        assert!(outline.contains("#icon-bookmark\""));

        recipe.bookmarked = true;
        let filled = RecipeTemplate.generate_markup(&recipe);
        assert!(filled.contains("#icon-bookmark-fill"));
    }
}
