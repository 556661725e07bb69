use super::{Extractor, ParsingContext};
use crate::error::ParseError;
use crate::model::Recipe;
use crate::text::{element_text, strip_labels, title_case, NOTE_MARKER};
use log::debug;
use scraper::Selector;
use std::collections::HashMap;
use std::sync::LazyLock;

static CONTENT: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.col-sm-9").unwrap());
static PARAGRAPHS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());
static HEADING: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());
static IMAGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img.alignnone").unwrap());

/// How a detail page lays out its ingredients, method and garnish.
#[derive(Debug, PartialEq, Eq)]
enum Layout {
    /// One paragraph; sections separated by blank lines.
    Merged(String),
    /// One paragraph per section, with optional NOTE asides in between.
    Split(Vec<String>),
}

impl Layout {
    fn detect(mut paragraphs: Vec<String>) -> Self {
        if paragraphs.len() == 1 {
            Layout::Merged(paragraphs.remove(0))
        } else {
            Layout::Split(paragraphs)
        }
    }

    /// Reduce the layout to its non-blank content blocks, in page order.
    fn into_blocks(self) -> Vec<String> {
        match self {
            Layout::Merged(text) => strip_labels(&text)
                .trim_start()
                .split("\n\n")
                .filter(|block| !block.trim().is_empty())
                .map(str::to_string)
                .collect(),
            Layout::Split(paragraphs) => {
                let mut blocks: Vec<String> = Vec::with_capacity(paragraphs.len());
                // NOTEs before any section are appended to the last section
                let mut leading_notes: Vec<String> = Vec::new();
                for paragraph in paragraphs {
                    let text = strip_labels(&paragraph);
                    if text.trim().is_empty() {
                        continue;
                    }
                    if !text.trim_start().starts_with(NOTE_MARKER) {
                        blocks.push(text);
                        continue;
                    }
                    match blocks.last_mut() {
                        Some(previous) => append_note(previous, &text),
                        None => leading_notes.push(text),
                    }
                }
                if let Some(last) = blocks.last_mut() {
                    for note in &leading_notes {
                        append_note(last, note);
                    }
                }
                blocks
            }
        }
    }
}

fn append_note(block: &mut String, note: &str) {
    block.push(' ');
    block.push_str(note.trim_start());
}

/// The three recipe sections of a detail page.
#[derive(Debug, PartialEq, Eq)]
struct Sections {
    ingredients: Vec<String>,
    preparation: String,
    garnish: String,
}

impl Sections {
    fn from_paragraphs(paragraphs: Vec<String>) -> Result<Self, ParseError> {
        let layout = Layout::detect(paragraphs);
        debug!(
            "Detected {} layout",
            match layout {
                Layout::Merged(_) => "merged",
                Layout::Split(_) => "split",
            }
        );

        let blocks = layout.into_blocks();
        if blocks.len() < 3 {
            return Err(ParseError::TooFewSections {
                found: blocks.len(),
            });
        }
        if blocks.len() > 3 {
            debug!("Ignoring {} trailing content blocks", blocks.len() - 3);
        }

        let mut ingredients: Vec<String> = blocks[0]
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        if let Some(index) = ingredients.iter().position(|line| line == "INGREDIENTS") {
            ingredients.remove(index);
        }
        if ingredients.is_empty() {
            return Err(ParseError::EmptySection("ingredients"));
        }

        Ok(Sections {
            ingredients,
            preparation: blocks[1].trim().to_string(),
            garnish: blocks[2].trim().to_string(),
        })
    }
}

/// Extracts a full recipe from a cocktail detail page.
pub struct DetailExtractor<'a> {
    categories: &'a HashMap<String, String>,
}

impl<'a> DetailExtractor<'a> {
    /// `categories` maps the category segment of a detail page URL to its
    /// display label.
    pub fn new(categories: &'a HashMap<String, String>) -> Self {
        Self { categories }
    }

    fn category_for(&self, url: &str) -> Result<String, ParseError> {
        let key = url
            .rsplit('/')
            .nth(2)
            .ok_or_else(|| ParseError::InvalidUrl(url.to_string()))?;

        self.categories
            .get(key)
            .cloned()
            .ok_or_else(|| ParseError::UnknownCategory(key.to_string()))
    }
}

impl Extractor for DetailExtractor<'_> {
    type Output = Recipe;

    fn parse(&self, context: &ParsingContext) -> Result<Recipe, ParseError> {
        let content = context
            .document
            .select(&CONTENT)
            .next()
            .ok_or(ParseError::MissingElement("div.col-sm-9"))?;

        let paragraphs: Vec<String> = content
            .select(&PARAGRAPHS)
            .map(|p| element_text(p).trim_start().to_string())
            .filter(|text| !text.is_empty())
            .collect();
        let sections = Sections::from_paragraphs(paragraphs)?;

        let name = content
            .select(&HEADING)
            .next()
            .map(|heading| title_case(&element_text(heading)))
            .filter(|name| !name.is_empty())
            .ok_or(ParseError::MissingElement("h1"))?;

        let category = self.category_for(&context.url)?;

        let image = content
            .select(&IMAGE)
            .next()
            .ok_or(ParseError::MissingElement("img.alignnone"))?;
        let image_url = image
            .value()
            .attr("src")
            .ok_or(ParseError::MissingAttribute {
                element: "img.alignnone",
                attribute: "src",
            })?
            .to_string();

        debug!(
            "Parsed {} ({}, {} ingredients)",
            name,
            category,
            sections.ingredients.len()
        );

        Ok(Recipe {
            name,
            ingredients: sections.ingredients,
            preparation: sections.preparation,
            garnish: sections.garnish,
            category,
            image_url,
            source_link: context.url.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraphs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_detect_layout() {
        assert_eq!(
            Layout::detect(paragraphs(&["one"])),
            Layout::Merged("one".to_string())
        );
        assert!(matches!(
            Layout::detect(paragraphs(&["one", "two"])),
            Layout::Split(_)
        ));
        assert_eq!(Layout::detect(Vec::new()), Layout::Split(Vec::new()));
    }

    #[test]
    fn test_merged_layout_sections() {
        let sections = Sections::from_paragraphs(paragraphs(&[
            "INGREDIENTSGin\nLime\n\nMETHODShake.\n\nGARNISHTwist",
        ]))
        .unwrap();

        assert_eq!(
            sections,
            Sections {
                ingredients: vec!["Gin".to_string(), "Lime".to_string()],
                preparation: "Shake.".to_string(),
                garnish: "Twist".to_string(),
            }
        );
    }

    #[test]
    fn test_split_layout_merges_note_into_previous_section() {
        let sections = Sections::from_paragraphs(paragraphs(&[
            "INGREDIENTS\nRum\nLime",
            "METHODStir.",
            "NOTE Serve cold.",
            "GARNISHMint",
        ]))
        .unwrap();

        assert_eq!(sections.ingredients, vec!["Rum", "Lime"]);
        assert_eq!(sections.preparation, "Stir. NOTE Serve cold.");
        assert_eq!(sections.garnish, "Mint");
    }

    #[test]
    fn test_split_layout_drops_label_only_paragraphs() {
        let sections = Sections::from_paragraphs(paragraphs(&[
            "INGREDIENTS",
            "50 ml Gin\n25 ml Campari",
            "METHOD",
            "Stir over ice.",
            "GARNISH",
            "Orange peel",
        ]))
        .unwrap();

        assert_eq!(sections.ingredients, vec!["50 ml Gin", "25 ml Campari"]);
        assert_eq!(sections.preparation, "Stir over ice.");
        assert_eq!(sections.garnish, "Orange peel");
    }

    #[test]
    fn test_consecutive_notes_attach_to_same_section() {
        let blocks = Layout::Split(paragraphs(&[
            "Rum",
            "Shake.",
            "NOTE one.",
            "NOTE two.",
            "Mint",
        ]))
        .into_blocks();

        assert_eq!(blocks, vec!["Rum", "Shake. NOTE one. NOTE two.", "Mint"]);
    }

    #[test]
    fn test_leading_note_attaches_to_last_section() {
        let sections = Sections::from_paragraphs(paragraphs(&[
            "NOTE Best served in a tiki mug.",
            "INGREDIENTS\nRum\nLime",
            "METHODShake.",
            "GARNISHMint",
        ]))
        .unwrap();

        assert_eq!(sections.ingredients, vec!["Rum", "Lime"]);
        assert_eq!(sections.preparation, "Shake.");
        assert_eq!(sections.garnish, "Mint NOTE Best served in a tiki mug.");
    }

    #[test]
    fn test_only_notes_is_too_few_sections() {
        let err = Sections::from_paragraphs(paragraphs(&["NOTE one.", "NOTE two."])).unwrap_err();
        assert_eq!(err, ParseError::TooFewSections { found: 0 });
    }

    #[test]
    fn test_too_few_sections() {
        let err = Sections::from_paragraphs(paragraphs(&["INGREDIENTSGin\n\nMETHODShake."]))
            .unwrap_err();
        assert_eq!(err, ParseError::TooFewSections { found: 2 });

        let err = Sections::from_paragraphs(Vec::new()).unwrap_err();
        assert_eq!(err, ParseError::TooFewSections { found: 0 });
    }

    #[test]
    fn test_extra_blocks_are_ignored() {
        let sections =
            Sections::from_paragraphs(paragraphs(&["Gin", "Stir.", "Olive", "Cheers!"])).unwrap();
        assert_eq!(sections.garnish, "Olive");
    }

    #[test]
    fn test_category_from_url() {
        let categories = HashMap::from([(
            "iba-official-cocktails".to_string(),
            "The Unforgettables".to_string(),
        )]);
        let extractor = DetailExtractor::new(&categories);

        assert_eq!(
            extractor
                .category_for("https://iba-world.com/iba-official-cocktails/daiquiri/")
                .unwrap(),
            "The Unforgettables"
        );
        assert_eq!(
            extractor
                .category_for("https://iba-world.com/tiki/zombie/")
                .unwrap_err(),
            ParseError::UnknownCategory("tiki".to_string())
        );
    }
}
