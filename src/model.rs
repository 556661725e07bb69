use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cocktail recipe as scraped from its detail page.
///
/// The legacy snapshot used `prep`, `img` and `link` for the last fields; those
/// names are still accepted when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<String>,
    #[serde(alias = "prep")]
    pub preparation: String,
    pub garnish: String,
    pub category: String,
    #[serde(alias = "img")]
    pub image_url: String,
    #[serde(alias = "link")]
    pub source_link: String,
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.name, self.category)?;
        writeln!(f)?;
        writeln!(f, "Ingredients:")?;
        for ingredient in &self.ingredients {
            writeln!(f, "  - {ingredient}")?;
        }
        writeln!(f)?;
        writeln!(f, "Method: {}", self.preparation)?;
        writeln!(f, "Garnish: {}", self.garnish)?;
        writeln!(f)?;
        writeln!(f, "Image: {}", self.image_url)?;
        write!(f, "Source: {}", self.source_link)
    }
}
