use std::path::PathBuf;

use thiserror::Error;

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while loading or validating site content
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Content is neither valid JSON nor valid TOML
    #[error("Catalog parse error: {0}")]
    Parse(String),

    /// Declared schema version is not understood
    #[error("catalog.schema_version {0} is not supported (expected 1)")]
    UnsupportedSchema(u32),

    /// Two records of the same namespace share an id
    #[error("Duplicate {namespace} id '{id}'")]
    DuplicateId { namespace: &'static str, id: String },

    /// A required field is blank
    #[error("Empty {field} in {namespace} entry '{id}'")]
    EmptyField {
        namespace: &'static str,
        field: &'static str,
        id: String,
    },

    /// A portfolio category collides with the "All" filter entry
    #[error("Portfolio item '{id}' uses the reserved category '{category}'")]
    ReservedCategory { id: String, category: String },

    /// A reference points at a section the page does not render
    #[error("Section '{section_id}' referenced by {referrer} is not part of the page layout")]
    UnknownSection { section_id: String, referrer: String },
}

impl CatalogError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub(crate) fn unknown_section(section_id: impl Into<String>, referrer: impl Into<String>) -> Self {
        Self::UnknownSection {
            section_id: section_id.into(),
            referrer: referrer.into(),
        }
    }
}
