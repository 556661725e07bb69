pub mod catalog;
pub mod config;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod model;
pub mod search;
pub mod text;

pub use catalog::{Catalog, CatalogBuilder, SCHEMA_VERSION};
pub use config::CatalogConfig;
pub use error::{CatalogError, FetchError, ParseError};
pub use fetchers::{Fetcher, RequestFetcher};
pub use model::Recipe;
pub use search::SearchQuery;

/// Scrape the configured site into a new catalog.
pub fn build_catalog(config: &CatalogConfig) -> Result<Catalog, CatalogError> {
    let fetcher = RequestFetcher::new(Some(config.timeout()))?;
    CatalogBuilder::from_config(fetcher, config).build()
}

/// Scrape the configured site and replace the snapshot. The previous snapshot
/// is left untouched if anything fails.
pub fn refresh_snapshot(config: &CatalogConfig) -> Result<Catalog, CatalogError> {
    let catalog = build_catalog(config)?;
    catalog.save(&config.snapshot_path)?;
    Ok(catalog)
}
