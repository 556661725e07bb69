//! Text normalization shared by the extractors.

/// Section labels the source site prefixes each recipe section with.
pub const SECTION_LABELS: [&str; 3] = ["INGREDIENTS", "METHOD", "GARNISH"];

/// Marker of an aside paragraph that belongs to the preceding section.
pub const NOTE_MARKER: &str = "NOTE";

/// Title-case `text`: each alphabetic run starts upper-case and continues
/// lower-case. Any non-alphabetic character (space, digit, apostrophe, hyphen)
/// ends the run.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.trim().chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}

/// Remove every occurrence of every section label from `text`.
pub fn strip_labels(text: &str) -> String {
    SECTION_LABELS
        .iter()
        .fold(text.to_string(), |acc, label| acc.replace(label, ""))
}

/// Collect an element's text nodes into one string, normalizing line endings.
pub fn element_text(element: scraper::ElementRef<'_>) -> String {
    element.text().collect::<String>().replace("\r\n", "\n")
}
