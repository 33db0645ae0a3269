use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// Where an element should land inside the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollAlign {
    Start,
    Center,
}

/// The rendered page as seen by the navigator: element lookup by id plus the
/// scroll, filter and highlight primitives.
///
/// Implementations own their UI state behind interior mutability so that the
/// deferred navigation steps can call them from a spawned task.
pub trait PageSurface: Send + Sync + 'static {
    /// Absolute top of a section in page coordinates, `None` when not rendered
    fn section_top(&self, section_id: &str) -> Option<f64>;

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior);

    /// Switch the portfolio filter
    fn select_category(&self, category: &str);

    /// Returns `false` when no element with that id is rendered
    fn scroll_item_into_view(&self, item_id: &str, align: ScrollAlign) -> bool;

    /// Must be idempotent; clearing an unhighlighted item is a no-op
    fn set_highlight(&self, item_id: &str, highlighted: bool);
}
