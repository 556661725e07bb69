use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while retrieving a page
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport failure (DNS, TLS, connection reset, timeout)
    #[error("Failed to fetch {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("Failed to fetch {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    /// Failed to build the HTTP client
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Errors raised when a page does not have the expected structure
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// A required element is absent from the page
    #[error("Missing element: {0}")]
    MissingElement(&'static str),

    /// A required attribute is absent from an element
    #[error("Missing attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    /// The page resolved to fewer content blocks than recipe sections
    #[error("Expected 3 content sections, found {found}")]
    TooFewSections { found: usize },

    /// A section resolved to no usable content
    #[error("Section '{0}' is empty")]
    EmptySection(&'static str),

    /// The category segment of the page URL is not a known category
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),

    /// The page URL has no category segment or cannot be resolved against
    #[error("Invalid page URL: {0}")]
    InvalidUrl(String),
}

/// Errors raised while building, saving or loading a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A listing or detail page could not be fetched
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A listing or detail page could not be parsed
    #[error("Failed to parse {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: ParseError,
    },

    /// No snapshot exists at the given path
    #[error("Catalog snapshot not found: {}", .0.display())]
    Missing(PathBuf),

    /// The snapshot exists but is not a valid catalog
    #[error("Malformed catalog snapshot {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The snapshot was written by an incompatible version
    #[error("Unsupported snapshot schema version {0}")]
    UnsupportedSchema(u32),

    /// Failed to serialize the catalog
    #[error("Failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Filesystem error while reading or writing a snapshot
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
