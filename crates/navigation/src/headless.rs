use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use studio_catalog::{ContentCatalog, Viewer};
use tokio::time::Instant;

use crate::gallery::PortfolioGallery;
use crate::surface::{PageSurface, ScrollAlign, ScrollBehavior};

pub const DEFAULT_SECTION_HEIGHT_PX: f64 = 960.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PageEventKind {
    Scrolled {
        top: f64,
        behavior: ScrollBehavior,
    },
    CategorySelected {
        category: String,
    },
    ItemScrolledIntoView {
        item_id: String,
        align: ScrollAlign,
    },
    ItemMissing {
        item_id: String,
    },
    HighlightOn {
        item_id: String,
    },
    HighlightOff {
        item_id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageEvent {
    /// Milliseconds since the page was built
    pub elapsed_ms: u64,
    #[serde(flatten)]
    pub kind: PageEventKind,
}

#[derive(Debug)]
struct PageState {
    scroll_top: f64,
    gallery: PortfolioGallery,
    highlighted: BTreeSet<String>,
    events: Vec<PageEvent>,
}

/// In-memory page built from the catalog layout.
///
/// Sections are stacked in layout order with a uniform height; sections the
/// viewer may not see are not rendered. Service cards are always present,
/// portfolio cards only while the gallery filter shows them. Every effect is
/// appended to a timestamped event log.
#[derive(Debug)]
pub struct HeadlessPage {
    started: Instant,
    sections: Vec<(String, f64)>,
    services: Vec<String>,
    state: Mutex<PageState>,
}

impl HeadlessPage {
    #[must_use]
    pub fn new(catalog: &ContentCatalog, viewer: Viewer) -> Self {
        Self::with_section_height(catalog, viewer, DEFAULT_SECTION_HEIGHT_PX)
    }

    /// A negative height is clamped to zero; a non-finite one falls back to
    /// [`DEFAULT_SECTION_HEIGHT_PX`].
    #[must_use]
    pub fn with_section_height(catalog: &ContentCatalog, viewer: Viewer, height: f64) -> Self {
        let height = if height.is_finite() {
            height.max(0.0)
        } else {
            log::warn!("Section height {height} is not finite, using {DEFAULT_SECTION_HEIGHT_PX}px");
            DEFAULT_SECTION_HEIGHT_PX
        };
        let sections = catalog
            .page()
            .iter()
            .filter(|section| viewer.permits(section.access))
            .enumerate()
            .map(|(index, section)| (section.id.clone(), index as f64 * height))
            .collect();

        Self {
            started: Instant::now(),
            sections,
            services: catalog.services().iter().map(|s| s.id.clone()).collect(),
            state: Mutex::new(PageState {
                scroll_top: 0.0,
                gallery: PortfolioGallery::new(catalog),
                highlighted: BTreeSet::new(),
                events: Vec::new(),
            }),
        }
    }

    /// Rendered section ids in page order
    #[must_use]
    pub fn section_ids(&self) -> Vec<&str> {
        self.sections.iter().map(|(id, _)| id.as_str()).collect()
    }

    #[must_use]
    pub fn scroll_top(&self) -> f64 {
        self.state().scroll_top
    }

    #[must_use]
    pub fn selected_category(&self) -> String {
        self.state().gallery.selected_category().to_string()
    }

    #[must_use]
    pub fn gallery(&self) -> PortfolioGallery {
        self.state().gallery.clone()
    }

    #[must_use]
    pub fn is_highlighted(&self, item_id: &str) -> bool {
        self.state().highlighted.contains(item_id)
    }

    #[must_use]
    pub fn highlighted(&self) -> Vec<String> {
        self.state().highlighted.iter().cloned().collect()
    }

    #[must_use]
    pub fn events(&self) -> Vec<PageEvent> {
        self.state().events.clone()
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn has_item(&self, state: &PageState, item_id: &str) -> bool {
        self.services.iter().any(|id| id == item_id) || state.gallery.is_visible(item_id)
    }

    fn record(&self, state: &mut PageState, kind: PageEventKind) {
        let elapsed_ms = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        state.events.push(PageEvent { elapsed_ms, kind });
    }
}

impl PageSurface for HeadlessPage {
    fn section_top(&self, section_id: &str) -> Option<f64> {
        self.sections
            .iter()
            .find(|(id, _)| id == section_id)
            .map(|(_, top)| *top)
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        let mut state = self.state();
        state.scroll_top = top;
        self.record(&mut state, PageEventKind::Scrolled { top, behavior });
    }

    fn select_category(&self, category: &str) {
        let mut state = self.state();
        state.gallery.select_category(category);
        self.record(
            &mut state,
            PageEventKind::CategorySelected {
                category: category.to_string(),
            },
        );
    }

    fn scroll_item_into_view(&self, item_id: &str, align: ScrollAlign) -> bool {
        let mut state = self.state();
        let item_id = item_id.to_string();
        if !self.has_item(&state, &item_id) {
            self.record(&mut state, PageEventKind::ItemMissing { item_id });
            return false;
        }
        self.record(&mut state, PageEventKind::ItemScrolledIntoView { item_id, align });
        true
    }

    fn set_highlight(&self, item_id: &str, highlighted: bool) {
        let mut state = self.state();
        let changed = if highlighted {
            state.highlighted.insert(item_id.to_string())
        } else {
            state.highlighted.remove(item_id)
        };
        if !changed {
            return;
        }
        let item_id = item_id.to_string();
        let kind = if highlighted {
            PageEventKind::HighlightOn { item_id }
        } else {
            PageEventKind::HighlightOff { item_id }
        };
        self.record(&mut state, kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hides_sections_the_viewer_cannot_see() {
        let catalog = ContentCatalog::builtin();
        let public = HeadlessPage::new(catalog, Viewer::anonymous());
        assert!(!public.section_ids().contains(&"bookings"));
        assert_eq!(public.section_top("bookings"), None);

        let admin = HeadlessPage::new(catalog, Viewer::admin());
        assert!(admin.section_ids().contains(&"behavior-analytics"));
    }

    #[test]
    fn unusable_section_heights_are_sanitised() {
        let catalog = ContentCatalog::builtin();
        let negative = HeadlessPage::with_section_height(catalog, Viewer::anonymous(), -200.0);
        assert_eq!(negative.section_top("contact"), Some(0.0));

        let nan = HeadlessPage::with_section_height(catalog, Viewer::anonymous(), f64::NAN);
        assert_eq!(nan.section_top("services"), Some(DEFAULT_SECTION_HEIGHT_PX));
    }

    #[test]
    fn sections_are_stacked_in_layout_order() {
        let page = HeadlessPage::with_section_height(ContentCatalog::builtin(), Viewer::anonymous(), 100.0);
        assert_eq!(page.section_top("home"), Some(0.0));
        assert_eq!(page.section_top("services"), Some(100.0));
        assert_eq!(page.section_top("portfolio"), Some(200.0));
    }

    #[test]
    fn portfolio_items_follow_the_filter() {
        let page = HeadlessPage::new(ContentCatalog::builtin(), Viewer::anonymous());
        page.select_category("Event");
        assert!(!page.scroll_item_into_view("portfolio-01", ScrollAlign::Center));
        assert!(page.scroll_item_into_view("portfolio-03", ScrollAlign::Center));
        assert!(page.scroll_item_into_view("service-wedding", ScrollAlign::Center));
        assert_eq!(page.selected_category(), "Event");
    }

    #[test]
    fn highlight_changes_are_logged_once() {
        let page = HeadlessPage::new(ContentCatalog::builtin(), Viewer::anonymous());
        page.set_highlight("portfolio-01", false);
        page.set_highlight("portfolio-01", true);
        page.set_highlight("portfolio-01", true);
        assert!(page.is_highlighted("portfolio-01"));
        page.set_highlight("portfolio-01", false);

        let kinds: Vec<PageEventKind> = page.events().into_iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PageEventKind::HighlightOn {
                    item_id: "portfolio-01".to_string()
                },
                PageEventKind::HighlightOff {
                    item_id: "portfolio-01".to_string()
                },
            ]
        );
        assert!(page.highlighted().is_empty());
    }
}
