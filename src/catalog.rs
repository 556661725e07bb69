use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::extractors::{DetailExtractor, Extractor, ListingExtractor, ParsingContext, RecipeLinks};
use crate::fetchers::Fetcher;
use crate::model::Recipe;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Snapshot layout written by this version.
pub const SCHEMA_VERSION: u32 = 1;

/// The full, read-only set of recipes served by the application.
///
/// Built once by [`CatalogBuilder::build`] or [`Catalog::load`] and shared by
/// reference afterwards; nothing mutates it after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    schema_version: u32,
    recipes: &'a [Recipe],
}

#[derive(Deserialize)]
struct SnapshotHeader {
    schema_version: u32,
}

#[derive(Deserialize)]
struct Snapshot {
    recipes: Vec<Recipe>,
}

impl Catalog {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Distinct category labels, in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for recipe in self {
            if !labels.contains(&recipe.category.as_str()) {
                labels.push(&recipe.category);
            }
        }
        labels
    }

    /// Write the catalog to `path` as pretty-printed JSON.
    ///
    /// The snapshot is written to a sibling temporary file first and renamed
    /// into place, so an interrupted save leaves the previous snapshot intact.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CatalogError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&SnapshotRef {
            schema_version: SCHEMA_VERSION,
            recipes: &self.recipes,
        })?;

        let tmp = temporary_path(path);
        if let Err(e) = fs::write(&tmp, json).and_then(|()| fs::rename(&tmp, path)) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        info!("Saved {} recipes to {}", self.len(), path.display());
        Ok(())
    }

    /// Read a catalog snapshot written by [`Catalog::save`] or by the legacy
    /// scraper (a bare JSON array of recipes).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CatalogError::Missing(path.to_path_buf()),
            _ => CatalogError::Io(e),
        })?;

        let malformed = |source: serde_json::Error| CatalogError::Malformed {
            path: path.to_path_buf(),
            source,
        };

        let recipes = if json.trim_start().starts_with('[') {
            debug!("{} is a legacy snapshot without a schema version", path.display());
            serde_json::from_str::<Vec<Recipe>>(&json).map_err(malformed)?
        } else {
            let header: SnapshotHeader = serde_json::from_str(&json).map_err(malformed)?;
            if header.schema_version != SCHEMA_VERSION {
                return Err(CatalogError::UnsupportedSchema(header.schema_version));
            }
            serde_json::from_str::<Snapshot>(&json)
                .map_err(malformed)?
                .recipes
        };

        info!("Loaded {} recipes from {}", recipes.len(), path.display());
        Ok(Self { recipes })
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Recipe;
    type IntoIter = std::slice::Iter<'a, Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.recipes.iter()
    }
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Scrapes the listing pages and every recipe they link to.
///
/// # Example
/// ```no_run
/// use cocktail_catalog::{CatalogBuilder, RequestFetcher};
///
/// let fetcher = RequestFetcher::new(None)?;
/// let catalog = CatalogBuilder::new(fetcher)
///     .base_url("https://iba-world.com/")
///     .pages(["iba-cocktails"])
///     .category("iba-official-cocktails", "The Unforgettables")
///     .build()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct CatalogBuilder<F> {
    fetcher: F,
    base_url: String,
    pages: Vec<String>,
    categories: HashMap<String, String>,
}

impl<F: Fetcher> CatalogBuilder<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            base_url: String::new(),
            pages: Vec::new(),
            categories: HashMap::new(),
        }
    }

    /// Builder preloaded with the configured site, pages and categories.
    pub fn from_config(fetcher: F, config: &CatalogConfig) -> Self {
        Self {
            fetcher,
            base_url: config.base_url.clone(),
            pages: config.pages.clone(),
            categories: config.categories.clone(),
        }
    }

    /// Site root; each page identifier is appended to it as-is.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn pages<I, S>(mut self, pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pages = pages.into_iter().map(Into::into).collect();
        self
    }

    /// Register the display label for a detail URL category segment.
    pub fn category(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.categories.insert(key.into(), label.into());
        self
    }

    /// Fetch every listing page and merge their links by name. A later page
    /// overwrites the link of a name seen on an earlier one.
    pub fn collect_links(&self) -> Result<RecipeLinks, CatalogError> {
        let mut links = RecipeLinks::new();
        for page in &self.pages {
            let url = format!("{}{}", self.base_url, page);
            info!("Fetching listing {}", url);
            let html = self.fetcher.fetch(&url)?;
            let context = ParsingContext::new(url.as_str(), &html);
            let page_links = ListingExtractor
                .parse(&context)
                .map_err(|source| CatalogError::Parse { url, source })?;
            links.extend(page_links);
        }
        Ok(links)
    }

    /// Scrape the full catalog. Any fetch or parse failure aborts the build.
    pub fn build(&self) -> Result<Catalog, CatalogError> {
        let links = self.collect_links()?;
        info!("Scraping {} recipes", links.len());

        let extractor = DetailExtractor::new(&self.categories);
        let recipes = links
            .values()
            .map(|url| -> Result<Recipe, CatalogError> {
                let html = self.fetcher.fetch(url)?;
                extractor
                    .parse(&ParsingContext::new(url.as_str(), &html))
                    .map_err(|source| CatalogError::Parse {
                        url: url.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!("Scraped {} recipes", recipes.len());
        Ok(Catalog::new(recipes))
    }
}
