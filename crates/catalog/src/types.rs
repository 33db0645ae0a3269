use serde::{Deserialize, Serialize};
use studio_protocol::{PORTFOLIO_SECTION, SERVICES_SECTION};

/// Uniform read access to any searchable record
pub trait CatalogRecord {
    fn id(&self) -> &str;

    fn title(&self) -> &str;

    /// Secondary searchable text (service description, portfolio category)
    fn detail(&self) -> Option<&str> {
        None
    }

    fn keywords(&self) -> &[String];

    /// Page section the record is displayed in
    fn section_id(&self) -> &str;
}

/// A service offered by the studio
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServiceRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl CatalogRecord for ServiceRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn detail(&self) -> Option<&str> {
        Some(&self.description)
    }

    fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn section_id(&self) -> &str {
        SERVICES_SECTION
    }
}

/// A gallery entry shown in the portfolio grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PortfolioRecord {
    pub id: String,
    pub title: String,
    pub category: String,
    /// Asset path of the full-size image
    pub image: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl CatalogRecord for PortfolioRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn detail(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn section_id(&self) -> &str {
        PORTFOLIO_SECTION
    }
}

/// A named page section reachable from search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SectionRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl CatalogRecord for SectionRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn section_id(&self) -> &str {
        &self.id
    }
}

/// Who may see a page section
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    #[default]
    Public,
    Authenticated,
    Admin,
}

/// The identity state of whoever is looking at the page
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Viewer {
    pub authenticated: bool,
    pub admin: bool,
}

impl Viewer {
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            authenticated: false,
            admin: false,
        }
    }

    #[must_use]
    pub const fn member() -> Self {
        Self {
            authenticated: true,
            admin: false,
        }
    }

    #[must_use]
    pub const fn admin() -> Self {
        Self {
            authenticated: true,
            admin: true,
        }
    }

    /// Admin sections additionally require an authenticated session
    #[must_use]
    pub const fn permits(self, access: Access) -> bool {
        match access {
            Access::Public => true,
            Access::Authenticated => self.authenticated,
            Access::Admin => self.authenticated && self.admin,
        }
    }
}

/// One block of the single-page layout, in render order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PageSection {
    pub id: String,
    /// Header menu entry; sections without one are reachable only by scrolling or links
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_label: Option<String>,
    #[serde(default)]
    pub access: Access,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub section_id: String,
}

/// A button that jumps to a fixed section (hero and header CTAs)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CallToAction {
    pub id: String,
    pub label: String,
    pub section_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewer_permissions() {
        assert!(Viewer::anonymous().permits(Access::Public));
        assert!(!Viewer::anonymous().permits(Access::Authenticated));
        assert!(Viewer::member().permits(Access::Authenticated));
        assert!(!Viewer::member().permits(Access::Admin));
        assert!(Viewer::admin().permits(Access::Admin));

        let unauthenticated_admin = Viewer {
            authenticated: false,
            admin: true,
        };
        assert!(!unauthenticated_admin.permits(Access::Admin));
    }

    #[test]
    fn records_report_owning_section() {
        let service = ServiceRecord {
            id: "service-x".to_string(),
            title: "X".to_string(),
            description: "d".to_string(),
            keywords: vec![],
        };
        assert_eq!(service.section_id(), SERVICES_SECTION);
        assert_eq!(service.detail(), Some("d"));

        let section = SectionRecord {
            id: "about".to_string(),
            title: "About".to_string(),
            keywords: vec![],
        };
        assert_eq!(section.section_id(), "about");
        assert_eq!(section.detail(), None);
    }
}
