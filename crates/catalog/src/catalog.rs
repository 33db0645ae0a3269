use std::collections::HashSet;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::Deserialize;
use studio_protocol::{SearchResult, ALL_CATEGORIES, PORTFOLIO_SECTION, SERVICES_SECTION};

use crate::error::{CatalogError, Result};
use crate::types::{
    CallToAction, CatalogRecord, MenuItem, PageSection, PortfolioRecord, SectionRecord, ServiceRecord, Viewer,
};

const BUILTIN_SITE: &str = include_str!("../content/site.json");

const SUPPORTED_SCHEMA_VERSION: u32 = 1;

static BUILTIN: Lazy<ContentCatalog> = Lazy::new(|| {
    ContentCatalog::from_bytes(BUILTIN_SITE.as_bytes()).expect("builtin site content must parse")
});

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalog {
    schema_version: Option<u32>,
    #[serde(default)]
    services: Vec<ServiceRecord>,
    #[serde(default)]
    portfolio: Vec<PortfolioRecord>,
    #[serde(default)]
    sections: Vec<SectionRecord>,
    #[serde(default)]
    page: Vec<PageSection>,
    #[serde(default)]
    calls_to_action: Vec<CallToAction>,
}

/// Immutable, validated site content.
///
/// Every constructor runs [`ContentCatalog::validate`], so a value of this type
/// always satisfies the id-uniqueness and section-reference invariants.
#[derive(Debug, Clone)]
pub struct ContentCatalog {
    services: Vec<ServiceRecord>,
    portfolio: Vec<PortfolioRecord>,
    sections: Vec<SectionRecord>,
    page: Vec<PageSection>,
    calls_to_action: Vec<CallToAction>,
}

impl ContentCatalog {
    /// The compiled-in studio content
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_bytes(&bytes)?;
        log::info!(
            "Loaded catalog from {} ({} services, {} portfolio items, {} sections)",
            path.display(),
            catalog.services.len(),
            catalog.portfolio.len(),
            catalog.sections.len()
        );
        Ok(catalog)
    }

    /// Parse JSON, falling back to TOML
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw = parse_raw(bytes)?;
        if let Some(version) = raw.schema_version {
            if version != SUPPORTED_SCHEMA_VERSION {
                return Err(CatalogError::UnsupportedSchema(version));
            }
        }

        let catalog = Self {
            services: raw.services,
            portfolio: raw.portfolio,
            sections: raw.sections,
            page: raw.page,
            calls_to_action: raw.calls_to_action,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<()> {
        check_unique("service", self.services.iter().map(|s| s.id.as_str()))?;
        check_unique("portfolio", self.portfolio.iter().map(|p| p.id.as_str()))?;
        check_unique("section", self.sections.iter().map(|s| s.id.as_str()))?;
        check_unique("page", self.page.iter().map(|p| p.id.as_str()))?;
        check_unique(
            "call_to_action",
            self.calls_to_action.iter().map(|c| c.id.as_str()),
        )?;

        for service in &self.services {
            require("service", "title", &service.id, &service.title)?;
        }
        for item in &self.portfolio {
            require("portfolio", "title", &item.id, &item.title)?;
            require("portfolio", "category", &item.id, &item.category)?;
            if item.category == ALL_CATEGORIES {
                return Err(CatalogError::ReservedCategory {
                    id: item.id.clone(),
                    category: item.category.clone(),
                });
            }
        }
        for section in &self.sections {
            require("section", "title", &section.id, &section.title)?;
        }

        for owner in [SERVICES_SECTION, PORTFOLIO_SECTION] {
            if !self.has_page_section(owner) {
                return Err(CatalogError::unknown_section(owner, "catalog records"));
            }
        }
        for section in &self.sections {
            if !self.has_page_section(&section.id) {
                return Err(CatalogError::unknown_section(
                    &section.id,
                    format!("section record '{}'", section.id),
                ));
            }
        }
        for cta in &self.calls_to_action {
            require("call_to_action", "section_id", &cta.id, &cta.section_id)?;
            if !self.has_page_section(&cta.section_id) {
                return Err(CatalogError::unknown_section(
                    &cta.section_id,
                    format!("call to action '{}'", cta.id),
                ));
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn services(&self) -> &[ServiceRecord] {
        &self.services
    }

    #[must_use]
    pub fn portfolio(&self) -> &[PortfolioRecord] {
        &self.portfolio
    }

    #[must_use]
    pub fn sections(&self) -> &[SectionRecord] {
        &self.sections
    }

    /// Page layout in render order
    #[must_use]
    pub fn page(&self) -> &[PageSection] {
        &self.page
    }

    #[must_use]
    pub fn calls_to_action(&self) -> &[CallToAction] {
        &self.calls_to_action
    }

    #[must_use]
    pub fn service(&self, id: &str) -> Option<&ServiceRecord> {
        self.services.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn portfolio_item(&self, id: &str) -> Option<&PortfolioRecord> {
        self.portfolio.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn call_to_action(&self, id: &str) -> Option<&CallToAction> {
        self.calls_to_action.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn has_page_section(&self, id: &str) -> bool {
        self.page.iter().any(|p| p.id == id)
    }

    /// Distinct portfolio categories, sorted
    #[must_use]
    pub fn portfolio_categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self
            .portfolio
            .iter()
            .map(|p| p.category.as_str())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        categories.sort_unstable();
        categories
    }

    /// Header menu for the given viewer, in page order
    #[must_use]
    pub fn menu(&self, viewer: Viewer) -> Vec<MenuItem> {
        self.page
            .iter()
            .filter(|section| viewer.permits(section.access))
            .filter_map(|section| {
                section.menu_label.as_ref().map(|label| MenuItem {
                    label: label.clone(),
                    section_id: section.id.clone(),
                })
            })
            .collect()
    }

    /// Whether a search result points at real content: its section is on the
    /// page and its item id names a record of the list it came from.
    #[must_use]
    pub fn resolves(&self, result: &SearchResult) -> bool {
        if !self.has_page_section(result.section_id()) {
            return false;
        }
        match result {
            SearchResult::Service { id, .. } => contains_id(&self.services, id),
            SearchResult::Portfolio { id, category, .. } => self
                .portfolio_item(id)
                .is_some_and(|item| &item.category == category),
            SearchResult::Section { id, .. } => contains_id(&self.sections, id),
        }
    }
}

fn contains_id<R: CatalogRecord>(records: &[R], id: &str) -> bool {
    records.iter().any(|record| record.id() == id)
}

fn parse_raw(bytes: &[u8]) -> Result<RawCatalog> {
    let value = match serde_json::from_slice::<serde_json::Value>(bytes) {
        Ok(value) => value,
        Err(json_err) => toml_content(bytes).map_err(|toml_err| {
            CatalogError::parse(format!(
                "site content is neither JSON ({json_err}) nor TOML ({toml_err})"
            ))
        })?,
    };

    serde_json::from_value(value)
        .map_err(|err| CatalogError::parse(format!("unexpected site content shape: {err}")))
}

fn toml_content(bytes: &[u8]) -> std::result::Result<serde_json::Value, String> {
    let text = std::str::from_utf8(bytes).map_err(|err| format!("not UTF-8: {err}"))?;
    let table: toml::Value = toml::from_str(text).map_err(|err| err.to_string())?;
    serde_json::to_value(table).map_err(|err| err.to_string())
}

fn check_unique<'a>(namespace: &'static str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(CatalogError::EmptyField {
                namespace,
                field: "id",
                id: id.to_string(),
            });
        }
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                namespace,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn require(namespace: &'static str, field: &'static str, id: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::EmptyField {
            namespace,
            field,
            id: id.to_string(),
        });
    }
    Ok(())
}
