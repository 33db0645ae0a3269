use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const PROTOCOL_SCHEMA_VERSION: u32 = 1;

/// Page section that owns every service record.
pub const SERVICES_SECTION: &str = "services";

/// Page section that owns every portfolio record.
pub const PORTFOLIO_SECTION: &str = "portfolio";

/// Category value the portfolio filter uses to show every item.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    Service,
    Portfolio,
    Section,
}

impl RecordType {
    /// Display prefix used in result labels
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Service => "Service",
            Self::Portfolio => "Portfolio",
            Self::Section => "Section",
        }
    }
}

/// A single match produced by the site search.
///
/// Each variant carries only what its catalog source knows about itself; the
/// uniform accessors below derive the rest (label, item id, navigation target).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchResult {
    Service {
        id: String,
        title: String,
        section_id: String,
    },
    Portfolio {
        id: String,
        title: String,
        category: String,
        section_id: String,
    },
    Section {
        id: String,
        title: String,
    },
}

impl SearchResult {
    #[must_use]
    pub const fn record_type(&self) -> RecordType {
        match self {
            Self::Service { .. } => RecordType::Service,
            Self::Portfolio { .. } => RecordType::Portfolio,
            Self::Section { .. } => RecordType::Section,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Service { id, .. } | Self::Portfolio { id, .. } | Self::Section { id, .. } => id,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Service { title, .. }
            | Self::Portfolio { title, .. }
            | Self::Section { title, .. } => title,
        }
    }

    /// `"<CategoryName>: <title>"`, e.g. `"Service: Wedding Photography"`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}: {}", self.record_type().display_name(), self.title())
    }

    #[must_use]
    pub fn section_id(&self) -> &str {
        match self {
            Self::Service { section_id, .. } | Self::Portfolio { section_id, .. } => section_id,
            Self::Section { id, .. } => id,
        }
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        match self {
            Self::Portfolio { category, .. } => Some(category),
            Self::Service { .. } | Self::Section { .. } => None,
        }
    }

    /// Catalog item to focus after scrolling; sections have none.
    #[must_use]
    pub fn item_id(&self) -> Option<&str> {
        match self {
            Self::Service { id, .. } | Self::Portfolio { id, .. } => Some(id),
            Self::Section { .. } => None,
        }
    }

    #[must_use]
    pub fn navigation_context(&self) -> NavigationContext {
        NavigationContext {
            section_id: self.section_id().to_string(),
            category: self.category().map(str::to_string),
            item_id: self.item_id().map(str::to_string),
        }
    }
}

impl From<&SearchResult> for NavigationContext {
    fn from(result: &SearchResult) -> Self {
        result.navigation_context()
    }
}

/// Where a navigation should land: a section, optionally narrowed to an item.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default, JsonSchema)]
pub struct NavigationContext {
    pub section_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
}

impl NavigationContext {
    /// Plain section jump (menu items, calls to action)
    pub fn section(section_id: impl Into<String>) -> Self {
        Self {
            section_id: section_id.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_item(mut self, item_id: impl Into<String>) -> Self {
        self.item_id = Some(item_id.into());
        self
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct SearchHit {
    pub label: String,
    #[serde(flatten)]
    pub result: SearchResult,
}

impl From<SearchResult> for SearchHit {
    fn from(result: SearchResult) -> Self {
        Self {
            label: result.label(),
            result,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct SearchResponse {
    pub schema_version: u32,
    pub query: String,
    pub hits: Vec<SearchHit>,
}

impl SearchResponse {
    pub fn new(query: impl Into<String>, results: Vec<SearchResult>) -> Self {
        Self {
            schema_version: PROTOCOL_SCHEMA_VERSION,
            query: query.into(),
            hits: results.into_iter().map(SearchHit::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    pub hint: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            hint: None,
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// JSON schemas for the types the CLI prints with `--json`.
pub fn schemas() -> Result<serde_json::Value> {
    Ok(serde_json::json!({
        "schema_version": PROTOCOL_SCHEMA_VERSION,
        "search_response": serde_json::to_value(schemars::schema_for!(SearchResponse))?,
        "navigation_context": serde_json::to_value(schemars::schema_for!(NavigationContext))?,
        "error": serde_json::to_value(schemars::schema_for!(ErrorEnvelope))?,
    }))
}

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn portfolio() -> SearchResult {
        SearchResult::Portfolio {
            id: "portfolio-01".to_string(),
            title: "Wedding Moments".to_string(),
            category: "Wedding".to_string(),
            section_id: PORTFOLIO_SECTION.to_string(),
        }
    }

    #[test]
    fn labels_follow_category_prefix() {
        assert_eq!(portfolio().label(), "Portfolio: Wedding Moments");

        let section = SearchResult::Section {
            id: "about".to_string(),
            title: "About".to_string(),
        };
        assert_eq!(section.label(), "Section: About");
        assert_eq!(section.section_id(), "about");
        assert_eq!(section.item_id(), None);
    }

    #[test]
    fn portfolio_result_navigates_to_category_and_item() {
        let ctx = NavigationContext::from(&portfolio());
        assert_eq!(
            ctx,
            NavigationContext::section(PORTFOLIO_SECTION)
                .with_category("Wedding")
                .with_item("portfolio-01")
        );
    }

    #[test]
    fn service_result_has_item_but_no_category() {
        let service = SearchResult::Service {
            id: "service-event".to_string(),
            title: "Event Photography".to_string(),
            section_id: SERVICES_SECTION.to_string(),
        };
        let ctx = service.navigation_context();
        assert_eq!(ctx.category, None);
        assert_eq!(ctx.item_id.as_deref(), Some("service-event"));
    }

    #[test]
    fn hit_serializes_flat_with_type_tag() {
        let hit = SearchHit::from(portfolio());
        let value = serde_json::to_value(&hit).unwrap();
        assert_eq!(value["type"], "portfolio");
        assert_eq!(value["label"], "Portfolio: Wedding Moments");
        assert_eq!(value["category"], "Wedding");

        let back: SearchHit = serde_json::from_value(value).unwrap();
        assert_eq!(back, hit);
    }

    #[test]
    fn plain_context_omits_optional_fields() {
        let raw = serde_json::to_string(&NavigationContext::section("contact")).unwrap();
        assert_eq!(raw, r#"{"section_id":"contact"}"#);
    }

    #[test]
    fn schemas_cover_cli_outputs() {
        let value = schemas().unwrap();
        assert!(value["search_response"].is_object());
        assert!(value["navigation_context"].is_object());
    }
}
