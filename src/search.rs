use crate::catalog::Catalog;
use crate::model::Recipe;
use rand::seq::SliceRandom;
use rand::Rng;

/// Filters submitted by the search form. Absent and empty fields are both
/// "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Comma-separated ingredient tokens; every token must match
    pub ingredients: Option<String>,
    /// Substring of the category label
    pub category: Option<String>,
    /// Partial or full cocktail name
    pub name: Option<String>,
}

impl SearchQuery {
    pub fn new(ingredients: Option<&str>, category: Option<&str>, name: Option<&str>) -> Self {
        Self {
            ingredients: ingredients.map(str::to_string),
            category: category.map(str::to_string),
            name: name.map(str::to_string),
        }
    }

    /// True when no field constrains the search.
    pub fn is_empty(&self) -> bool {
        [&self.ingredients, &self.category, &self.name]
            .iter()
            .all(|field| field.as_deref().unwrap_or_default().is_empty())
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        matches_category(recipe, self.category.as_deref().unwrap_or_default())
            && matches_name(recipe, self.name.as_deref().unwrap_or_default())
            && matches_ingredients(recipe, self.ingredients.as_deref().unwrap_or_default())
    }
}

fn matches_category(recipe: &Recipe, category: &str) -> bool {
    recipe
        .category
        .to_lowercase()
        .contains(&category.to_lowercase())
}

// Either name may contain the other, so a full name passed back as a lookup key
// still matches its own record.
fn matches_name(recipe: &Recipe, name: &str) -> bool {
    let wanted = name.to_lowercase();
    let actual = recipe.name.to_lowercase();
    actual.contains(&wanted) || wanted.contains(&actual)
}

// Lines are concatenated without a separator, so a token can match across a
// line boundary.
fn matches_ingredients(recipe: &Recipe, ingredients: &str) -> bool {
    let haystack = recipe.ingredients.concat().to_lowercase();
    ingredients
        .split(',')
        .all(|token| haystack.contains(&token.to_lowercase()))
}

impl Catalog {
    /// Every recipe matching `query`, in catalog order.
    pub fn search(&self, query: &SearchQuery) -> Vec<&Recipe> {
        self.iter().filter(|recipe| query.matches(recipe)).collect()
    }

    /// A uniformly random recipe, or `None` if the catalog is empty.
    pub fn random(&self) -> Option<&Recipe> {
        self.random_with(&mut rand::thread_rng())
    }

    pub fn random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Recipe> {
        self.recipes().choose(rng)
    }

    /// The first recipe whose name equals `name`, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&Recipe> {
        let wanted = name.to_lowercase();
        self.iter().find(|recipe| recipe.name.to_lowercase() == wanted)
    }

    /// Resolve a list of result names back to their recipes, in the order
    /// given. Unknown names are skipped.
    pub fn select_by_names<S: AsRef<str>>(&self, names: &[S]) -> Vec<&Recipe> {
        names
            .iter()
            .filter_map(|name| self.find_by_name(name.as_ref()))
            .collect()
    }
}
