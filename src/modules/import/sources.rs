//! Readers turning pasted CSV or JSON text into raw, field-keyed rows.

use std::collections::BTreeMap;

use serde_json::Value;

use super::ImportError;
use super::fields::{FieldMapping, ProductField, json_key_field, resolve_mapping};

/// A cell value before coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    List(Vec<String>),
}

impl RawValue {
    /// The value as the user typed it, for error reports.
    pub fn as_text(&self) -> String {
        match self {
            RawValue::Text(s) => s.clone(),
            RawValue::List(items) => items.join(", "),
        }
    }
}

/// One input row keyed by target field. `row` is 1-based, header excluded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub row: usize,
    values: BTreeMap<ProductField, RawValue>,
}

impl RawRow {
    pub fn new(row: usize) -> Self {
        Self {
            row,
            values: BTreeMap::new(),
        }
    }

    /// First non-empty value for a field wins; `ignore` and blanks are dropped.
    pub fn insert(&mut self, field: ProductField, value: RawValue) {
        if field == ProductField::Ignore {
            return;
        }
        let blank = match &value {
            RawValue::Text(s) => s.trim().is_empty(),
            RawValue::List(items) => items.iter().all(|i| i.trim().is_empty()),
        };
        if !blank {
            self.values.entry(field).or_insert(value);
        }
    }

    pub fn get(&self, field: ProductField) -> Option<&RawValue> {
        self.values.get(&field)
    }

    pub fn text(&self, field: ProductField) -> Option<String> {
        self.get(field).map(|v| v.as_text().trim().to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Parsed CSV: the header row, the mapping applied to it and the data rows.
#[derive(Debug, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub mapping: FieldMapping,
    pub rows: Vec<RawRow>,
}

pub fn parse_csv(content: &str, user_mapping: Option<&FieldMapping>) -> Result<CsvTable, ImportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| ImportError::Parse(format!("CSV header error: {}", e)))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let fields = resolve_mapping(&headers, user_mapping);
    let mapping: FieldMapping = headers.iter().cloned().zip(fields.iter().copied()).collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| ImportError::Parse(format!("CSV parse error: {}", e)))?;

        // Whitespace-only lines are not data rows; a line with delimiters is
        if record.len() <= 1 && record.iter().all(|cell| cell.is_empty()) {
            continue;
        }

        let mut row = RawRow::new(rows.len() + 1);
        for (idx, cell) in record.iter().enumerate() {
            if let Some(field) = fields.get(idx) {
                row.insert(*field, RawValue::Text(cell.to_string()));
            }
        }
        rows.push(row);
    }

    Ok(CsvTable {
        headers,
        mapping,
        rows,
    })
}

pub fn parse_json(content: &str) -> Result<Vec<RawRow>, ImportError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| ImportError::Parse(format!("JSON parse error: {}", e)))?;

    let items = match value {
        Value::Array(items) => items,
        _ => {
            return Err(ImportError::Parse(
                "JSON import must be an array of product objects".to_string(),
            ));
        }
    };

    let mut rows = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        let Value::Object(object) = item else {
            return Err(ImportError::Parse(format!(
                "JSON item {} is not an object",
                idx + 1
            )));
        };

        let mut row = RawRow::new(idx + 1);
        for (key, value) in object {
            let Some(field) = json_key_field(&key) else {
                continue;
            };
            match json_raw_value(value) {
                Some(raw) => row.insert(field, raw),
                None => tracing::debug!("Skipping unsupported value for '{}' in item {}", key, idx + 1),
            }
        }
        rows.push(row);
    }

    Ok(rows)
}

fn json_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        // f64 Display never uses exponent notation
        Value::Number(n) => n.as_f64().map(|f| f.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn json_raw_value(value: Value) -> Option<RawValue> {
    match value {
        Value::Null | Value::Object(_) => None,
        Value::Array(items) => Some(RawValue::List(
            items.iter().filter_map(json_scalar).collect(),
        )),
        scalar => json_scalar(&scalar).map(RawValue::Text),
    }
}
