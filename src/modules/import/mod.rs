//! Product import pipeline
//!
//! Pasted CSV or JSON text is parsed into raw rows, mapped onto product
//! fields, coerced, optionally has its Amazon links canonicalized, and is
//! validated row by row. A batch with any validation error is rejected as a
//! whole; see [`ImportBatch::into_ready`].

pub mod amazon;
pub mod fields;
pub mod normalize;
pub mod sources;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::DomainError;
use crate::models::product::Product;

pub use amazon::{DEFAULT_AFFILIATE_TAG, extract_asin, sanitize_amazon_url};
pub use fields::{FieldMapping, ProductField, auto_map_header, auto_map_headers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportFormat {
    Csv,
    Json,
}

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub sanitize_urls: bool,
    pub affiliate_tag: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            sanitize_urls: true,
            affiliate_tag: DEFAULT_AFFILIATE_TAG.to_string(),
        }
    }
}

/// A rejected cell. `row` is 1-based and excludes the header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub row: usize,
    pub field: String,
    pub value: String,
    pub message: String,
}

/// Result of parsing and validating an import text.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportBatch {
    /// CSV header row (empty for JSON)
    pub headers: Vec<String>,
    /// Mapping applied to the CSV headers (empty for JSON)
    pub mapping: FieldMapping,
    /// Rows that passed validation
    pub products: Vec<Product>,
    pub errors: Vec<ValidationError>,
}

impl ImportBatch {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Gate the batch: only an all-valid batch yields products to insert.
    pub fn into_ready(self) -> Result<Vec<Product>, ImportError> {
        if self.errors.is_empty() {
            Ok(self.products)
        } else {
            Err(ImportError::Rejected(self.errors))
        }
    }
}

#[derive(Debug)]
pub enum ImportError {
    /// Input text could not be read as CSV/JSON
    Parse(String),
    /// Batch blocked by validation errors
    Rejected(Vec<ValidationError>),
    /// A product insert failed after `inserted` products were created
    Insert { inserted: usize, source: DomainError },
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Parse(msg) => write!(f, "Import parse error: {}", msg),
            ImportError::Rejected(errors) => {
                write!(f, "Import rejected: {} validation error(s)", errors.len())
            }
            ImportError::Insert { inserted, source } => write!(
                f,
                "Import failed after {} product(s) were created: {}",
                inserted, source
            ),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Insert { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Parse, map, coerce and validate an import text.
pub fn prepare_import(
    format: ImportFormat,
    content: &str,
    mapping: Option<&FieldMapping>,
    options: &ImportOptions,
) -> Result<ImportBatch, ImportError> {
    let mut batch = ImportBatch::default();

    let rows = match format {
        ImportFormat::Csv => {
            let table = sources::parse_csv(content, mapping)?;
            batch.headers = table.headers;
            batch.mapping = table.mapping;
            table.rows
        }
        ImportFormat::Json => sources::parse_json(content)?,
    };

    for raw in &rows {
        match normalize::normalize_row(raw, options) {
            Ok(product) => batch.products.push(product),
            Err(mut errors) => batch.errors.append(&mut errors),
        }
    }

    tracing::info!(
        "Prepared {:?} import: {} valid row(s), {} error(s)",
        format,
        batch.products.len(),
        batch.errors.len()
    );

    Ok(batch)
}
