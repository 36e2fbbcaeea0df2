/// Catalog source abstraction
///
/// Candidates come either from a live shopping search (SerpAPI) or from the
/// static demo catalog. Both implement [`CatalogSource`] so the engine never
/// needs to know which one it is talking to.
use crate::{
    error::AppResult,
    models::{CandidateItem, Category, Gender, Locale, Mode, Palette, Style},
    services::links,
};

pub mod demo;
pub mod serpapi;

pub use demo::DemoCatalog;
pub use serpapi::SerpApiProvider;

/// Everything a source may use to look up one category
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub category: Category,
    /// Query text built for this category
    pub query: String,
    pub locale: Locale,
    pub gender: Gender,
    pub styles: Vec<Style>,
    pub palette: Palette,
}

/// Trait for candidate sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Candidates for one category
    async fn search(&self, request: &SearchRequest) -> AppResult<Vec<CandidateItem>>;

    /// Clickable link for a chosen candidate
    ///
    /// Default implementation only normalizes the candidate's own link.
    async fn resolve_link(&self, item: &CandidateItem, _locale: Locale) -> String {
        links::normalize_link(
            item.link.as_deref(),
            &item.title,
            item.source.as_deref().unwrap_or_default(),
        )
    }

    /// Whether results should be memoized per query text within a generation call
    fn caches_queries(&self) -> bool {
        false
    }

    /// Mode reported on results produced by this source
    fn mode(&self) -> Mode;

    /// Source name for logging
    fn name(&self) -> &'static str;
}
