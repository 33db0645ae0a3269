use studio_protocol::{NavigationContext, SearchResult};

use crate::site_search::SiteSearch;

/// State behind the header search field and its results dropdown.
///
/// Results are recomputed synchronously on every query change; a new query
/// simply replaces the previous list.
#[derive(Debug, Clone)]
pub struct SearchBox<'a> {
    site: SiteSearch<'a>,
    query: String,
    results: Vec<SearchResult>,
    open: bool,
}

impl<'a> SearchBox<'a> {
    #[must_use]
    pub fn new(site: SiteSearch<'a>) -> Self {
        Self {
            site,
            query: String::new(),
            results: Vec::new(),
            open: false,
        }
    }

    /// Replace the query; the dropdown opens iff it has non-blank text
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.results = self.site.search(&self.query);
        self.open = !self.query.trim().is_empty();
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Open dropdown with nothing to show ("No results found")
    #[must_use]
    pub fn shows_empty_state(&self) -> bool {
        self.open && self.results.is_empty()
    }

    /// Pick a result from the dropdown. Resets the box and returns where to
    /// navigate; an out-of-range index leaves everything untouched.
    pub fn select(&mut self, index: usize) -> Option<NavigationContext> {
        let context = self.results.get(index)?.navigation_context();
        log::debug!(
            "Search selection: query='{}' -> #{}",
            self.query.trim(),
            context.section_id
        );
        self.clear();
        Some(context)
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.results.clear();
        self.open = false;
    }

    /// Close the dropdown without forgetting the query (click outside)
    pub fn dismiss(&mut self) {
        self.open = false;
    }
}

impl Default for SearchBox<'static> {
    fn default() -> Self {
        Self::new(SiteSearch::builtin())
    }
}
