use studio_catalog::{CatalogRecord, ContentCatalog};
use studio_protocol::SearchResult;

/// Case-insensitive substring search over the content catalog.
///
/// A record matches when the trimmed, lowercased query occurs anywhere in its
/// title, detail and keywords joined by single spaces. Results come back in
/// scan order (services, portfolio items, sections) and, within each list, in
/// catalog order. There is no ranking.
pub fn search(catalog: &ContentCatalog, query: &str) -> Vec<SearchResult> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut results = Vec::new();

    results.extend(
        catalog
            .services()
            .iter()
            .filter(|service| matches(*service, &needle))
            .map(|service| SearchResult::Service {
                id: service.id().to_string(),
                title: service.title().to_string(),
                section_id: service.section_id().to_string(),
            }),
    );

    results.extend(
        catalog
            .portfolio()
            .iter()
            .filter(|item| matches(*item, &needle))
            .map(|item| SearchResult::Portfolio {
                id: item.id().to_string(),
                title: item.title().to_string(),
                category: item.category.clone(),
                section_id: item.section_id().to_string(),
            }),
    );

    results.extend(
        catalog
            .sections()
            .iter()
            .filter(|section| matches(*section, &needle))
            .map(|section| SearchResult::Section {
                id: section.id().to_string(),
                title: section.title().to_string(),
            }),
    );

    log::debug!("Site search: query='{}', {} results", needle, results.len());
    results
}

fn matches<R: CatalogRecord>(record: &R, needle: &str) -> bool {
    searchable_text(record).contains(needle)
}

fn searchable_text<R: CatalogRecord>(record: &R) -> String {
    let mut text = String::from(record.title());
    if let Some(detail) = record.detail() {
        text.push(' ');
        text.push_str(detail);
    }
    for keyword in record.keywords() {
        text.push(' ');
        text.push_str(keyword);
    }
    text.to_lowercase()
}

/// Search bound to one catalog
#[derive(Debug, Clone, Copy)]
pub struct SiteSearch<'a> {
    catalog: &'a ContentCatalog,
}

impl<'a> SiteSearch<'a> {
    #[must_use]
    pub const fn new(catalog: &'a ContentCatalog) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        search(self.catalog, query)
    }
}

impl SiteSearch<'static> {
    /// Search over the compiled-in content
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(ContentCatalog::builtin())
    }
}

impl Default for SiteSearch<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use studio_protocol::RecordType;

    fn ids(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(SearchResult::id).collect()
    }

    #[test]
    fn blank_queries_return_nothing() {
        let site = SiteSearch::builtin();
        assert!(site.search("").is_empty());
        assert!(site.search("   ").is_empty());
        assert!(site.search("\t\n").is_empty());
    }

    #[test]
    fn wedding_matches_services_and_portfolio_but_no_sections() {
        let results = SiteSearch::builtin().search("wedding");
        assert_eq!(
            ids(&results),
            vec![
                "service-wedding",
                "service-prewedding",
                "portfolio-01",
                "portfolio-06"
            ]
        );
        assert!(results
            .iter()
            .all(|result| result.record_type() != RecordType::Section));

        let wedding = &results[2];
        assert_eq!(wedding.title(), "Wedding Moments");
        assert_eq!(wedding.label(), "Portfolio: Wedding Moments");
        assert_eq!(wedding.category(), Some("Wedding"));
        assert_eq!(wedding.item_id(), Some("portfolio-01"));
        assert_eq!(wedding.section_id(), "portfolio");
    }

    #[test]
    fn unknown_query_returns_nothing() {
        assert!(SiteSearch::builtin().search("xyz-nonexistent-query").is_empty());
    }

    #[test]
    fn query_is_trimmed_and_case_insensitive() {
        let site = SiteSearch::builtin();
        assert_eq!(site.search("  WEDDING "), site.search("wedding"));
        assert_eq!(ids(&site.search("PrAyAgRaJ")), vec!["about"]);
    }

    #[test]
    fn scan_order_is_services_then_portfolio_then_sections() {
        let results = SiteSearch::builtin().search("portrait");
        let kinds: Vec<RecordType> = results.iter().map(SearchResult::record_type).collect();
        assert_eq!(
            kinds,
            vec![
                RecordType::Service,
                RecordType::Portfolio,
                RecordType::Portfolio
            ]
        );
        assert_eq!(
            ids(&results),
            vec!["service-portrait", "portfolio-02", "portfolio-05"]
        );
    }

    #[test]
    fn matches_descriptions_and_multi_word_keywords() {
        let site = SiteSearch::builtin();
        assert_eq!(ids(&site.search("drive sales")), vec!["service-product"]);
        assert_eq!(ids(&site.search("get in touch")), vec!["contact"]);

        let section = &site.search("gallery")[0];
        assert_eq!(section.label(), "Section: Portfolio");
        assert_eq!(section.section_id(), "portfolio");
        assert_eq!(section.item_id(), None);
    }

    #[test]
    fn every_result_resolves_against_the_catalog() {
        let catalog = ContentCatalog::builtin();
        for query in ["a", "e", "photo", "studio", "wedding", "-"] {
            for result in search(catalog, query) {
                assert!(catalog.resolves(&result), "{result:?}");
            }
        }
    }

    #[test]
    fn repeated_searches_are_identical() {
        let site = SiteSearch::builtin();
        assert_eq!(site.search("o"), site.search("o"));
    }

    fn all_titles() -> Vec<(String, String)> {
        let catalog = ContentCatalog::builtin();
        catalog
            .services()
            .iter()
            .map(|s| (s.id.clone(), s.title.clone()))
            .chain(catalog.portfolio().iter().map(|p| (p.id.clone(), p.title.clone())))
            .chain(catalog.sections().iter().map(|s| (s.id.clone(), s.title.clone())))
            .collect()
    }

    proptest! {
        #[test]
        fn any_title_substring_finds_its_record(
            pick in 0usize..17,
            start in 0usize..32,
            len in 1usize..32,
        ) {
            let titles = all_titles();
            let (id, title) = &titles[pick % titles.len()];
            let chars: Vec<char> = title.to_lowercase().chars().collect();
            let start = start % chars.len();
            let end = (start + len).min(chars.len());
            let needle: String = chars[start..end].iter().collect();
            prop_assume!(!needle.trim().is_empty());

            let results = SiteSearch::builtin().search(&needle);
            prop_assert!(
                results.iter().any(|r| r.id() == id),
                "query {:?} did not find {}", needle, id
            );
        }
    }
}
