use crate::error::ParseError;
use scraper::Html;

mod detail;
mod listing;

pub use detail::DetailExtractor;
pub use listing::{ListingExtractor, RecipeLinks};

/// A fetched page ready for extraction.
pub struct ParsingContext {
    pub url: String,
    pub document: Html,
}

impl ParsingContext {
    pub fn new(url: impl Into<String>, html: &str) -> Self {
        Self {
            url: url.into(),
            document: Html::parse_document(html),
        }
    }
}

pub trait Extractor {
    type Output;

    fn parse(&self, context: &ParsingContext) -> Result<Self::Output, ParseError>;
}
