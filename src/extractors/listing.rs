use super::{Extractor, ParsingContext};
use crate::error::ParseError;
use crate::text::{element_text, title_case};
use indexmap::IndexMap;
use log::{debug, warn};
use reqwest::Url;
use scraper::Selector;
use std::sync::LazyLock;

/// Title-cased recipe name to detail page URL, in listing order.
pub type RecipeLinks = IndexMap<String, String>;

static CONTAINER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.blog_list_items").unwrap());
static HEADERS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h3").unwrap());
static READ_MORE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.btn-readmore").unwrap());

/// Extracts the recipe links from a category listing page.
///
/// The Nth `h3` header names the recipe behind the Nth "read more" anchor;
/// they are paired by position, not by DOM proximity.
pub struct ListingExtractor;

impl Extractor for ListingExtractor {
    type Output = RecipeLinks;

    fn parse(&self, context: &ParsingContext) -> Result<RecipeLinks, ParseError> {
        let container = context
            .document
            .select(&CONTAINER)
            .next()
            .ok_or(ParseError::MissingElement("div.blog_list_items"))?;

        let names: Vec<String> = container
            .select(&HEADERS)
            .map(|header| title_case(&element_text(header)))
            .collect();
        if names.is_empty() {
            return Err(ParseError::MissingElement("h3"));
        }

        let hrefs = container
            .select(&READ_MORE)
            .map(|anchor| {
                anchor.value().attr("href").ok_or(ParseError::MissingAttribute {
                    element: "a.btn-readmore",
                    attribute: "href",
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if hrefs.is_empty() {
            return Err(ParseError::MissingElement("a.btn-readmore"));
        }

        if names.len() != hrefs.len() {
            warn!(
                "{}: {} headers but {} links, pairing the first {}",
                context.url,
                names.len(),
                hrefs.len(),
                names.len().min(hrefs.len())
            );
        }

        let base = Url::parse(&context.url)
            .map_err(|_| ParseError::InvalidUrl(context.url.clone()))?;

        let mut links = RecipeLinks::new();
        for (name, href) in names.into_iter().zip(hrefs) {
            let link = base
                .join(href.trim())
                .map_err(|_| ParseError::InvalidUrl(href.to_string()))?;
            links.insert(name, link.to_string());
        }

        debug!("Found {} recipes on {}", links.len(), context.url);
        Ok(links)
    }
}
