use crate::error::FetchError;

mod request;

pub use request::RequestFetcher;

/// Retrieves the raw HTML of a page.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
