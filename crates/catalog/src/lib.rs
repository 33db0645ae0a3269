//! # Studio Catalog
//!
//! Static, compiled-in content of the studio site: services, portfolio items,
//! named page sections, the page layout and its calls to action.
//!
//! The catalog is loaded once and never mutated. Services, portfolio items and
//! sections are separate id namespaces; every section a record or button
//! points at must be part of the page layout.
//!
//! ## Example
//!
//! ```rust
//! use studio_catalog::{ContentCatalog, Viewer};
//!
//! let catalog = ContentCatalog::builtin();
//! assert!(catalog.service("service-wedding").is_some());
//!
//! for item in catalog.menu(Viewer::anonymous()) {
//!     println!("{} -> #{}", item.label, item.section_id);
//! }
//! ```

mod catalog;
mod error;
mod types;

pub use catalog::ContentCatalog;
pub use error::{CatalogError, Result};
pub use types::{
    Access, CallToAction, CatalogRecord, MenuItem, PageSection, PortfolioRecord, SectionRecord,
    ServiceRecord, Viewer,
};
