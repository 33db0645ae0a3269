use studio_catalog::{ContentCatalog, PortfolioRecord};
use studio_protocol::ALL_CATEGORIES;

/// Portfolio grid state: the active category filter and the lightbox cursor.
///
/// The lightbox index points into the filtered list and never wraps.
#[derive(Debug, Clone)]
pub struct PortfolioGallery {
    items: Vec<PortfolioRecord>,
    categories: Vec<String>,
    selected: String,
    lightbox: Option<usize>,
}

impl PortfolioGallery {
    #[must_use]
    pub fn new(catalog: &ContentCatalog) -> Self {
        Self {
            items: catalog.portfolio().to_vec(),
            categories: catalog
                .portfolio_categories()
                .into_iter()
                .map(str::to_string)
                .collect(),
            selected: ALL_CATEGORIES.to_string(),
            lightbox: None,
        }
    }

    /// Filter buttons in display order, "All" first
    #[must_use]
    pub fn filter_options(&self) -> Vec<&str> {
        std::iter::once(ALL_CATEGORIES)
            .chain(self.categories.iter().map(String::as_str))
            .collect()
    }

    #[must_use]
    pub fn selected_category(&self) -> &str {
        &self.selected
    }

    /// Changing the filter closes the lightbox
    pub fn select_category(&mut self, category: &str) {
        if category != ALL_CATEGORIES && !self.categories.iter().any(|c| c == category) {
            log::debug!("Portfolio filter '{category}' matches no items");
        }
        self.selected = category.to_string();
        self.lightbox = None;
    }

    #[must_use]
    pub fn visible_items(&self) -> Vec<&PortfolioRecord> {
        self.items
            .iter()
            .filter(|item| self.selected == ALL_CATEGORIES || item.category == self.selected)
            .collect()
    }

    #[must_use]
    pub fn is_visible(&self, item_id: &str) -> bool {
        self.visible_items().iter().any(|item| item.id == item_id)
    }

    /// Open the lightbox on a grid position; out of range is ignored
    pub fn open(&mut self, index: usize) -> bool {
        if index < self.visible_items().len() {
            self.lightbox = Some(index);
            true
        } else {
            false
        }
    }

    pub fn close(&mut self) {
        self.lightbox = None;
    }

    #[must_use]
    pub const fn lightbox_index(&self) -> Option<usize> {
        self.lightbox
    }

    #[must_use]
    pub fn lightbox_item(&self) -> Option<&PortfolioRecord> {
        self.visible_items().get(self.lightbox?).copied()
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.lightbox
            .is_some_and(|index| index + 1 < self.visible_items().len())
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        matches!(self.lightbox, Some(index) if index > 0)
    }

    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.lightbox = self.lightbox.map(|index| index + 1);
        true
    }

    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.lightbox = self.lightbox.map(|index| index - 1);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn gallery() -> PortfolioGallery {
        PortfolioGallery::new(ContentCatalog::builtin())
    }

    fn visible_ids(gallery: &PortfolioGallery) -> Vec<&str> {
        gallery
            .visible_items()
            .into_iter()
            .map(|item| item.id.as_str())
            .collect()
    }

    #[test]
    fn starts_unfiltered() {
        let gallery = gallery();
        assert_eq!(gallery.selected_category(), "All");
        assert_eq!(gallery.visible_items().len(), 6);
        assert_eq!(
            gallery.filter_options(),
            vec!["All", "Event", "Portrait", "Pre-Wedding", "Product", "Wedding"]
        );
    }

    #[test]
    fn filter_narrows_grid() {
        let mut gallery = gallery();
        gallery.select_category("Portrait");
        assert_eq!(visible_ids(&gallery), vec!["portfolio-02", "portfolio-05"]);
        assert!(!gallery.is_visible("portfolio-01"));

        gallery.select_category("Unknown");
        assert!(gallery.visible_items().is_empty());

        gallery.select_category("All");
        assert!(gallery.is_visible("portfolio-01"));
    }

    #[test]
    fn lightbox_steps_within_filtered_list() {
        let mut gallery = gallery();
        gallery.select_category("Portrait");

        assert!(!gallery.open(2));
        assert!(gallery.open(0));
        assert!(!gallery.has_previous());
        assert!(!gallery.previous());

        assert!(gallery.next());
        assert_eq!(
            gallery.lightbox_item().map(|item| item.title.as_str()),
            Some("Family Memories")
        );
        assert!(!gallery.has_next());
        assert!(!gallery.next());
        assert_eq!(gallery.lightbox_index(), Some(1));

        assert!(gallery.previous());
        assert_eq!(gallery.lightbox_index(), Some(0));

        gallery.close();
        assert_eq!(gallery.lightbox_item(), None);
    }

    #[test]
    fn changing_filter_closes_lightbox() {
        let mut gallery = gallery();
        assert!(gallery.open(3));
        gallery.select_category("Event");
        assert_eq!(gallery.lightbox_index(), None);
    }
}
