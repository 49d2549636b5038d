//! Field coercion and row validation.

use super::amazon::sanitize_amazon_url;
use super::fields::ProductField;
use super::sources::{RawRow, RawValue};
use super::{ImportOptions, ValidationError};
use crate::models::product::Product;

/// Keep digits, decimal point and sign ("$1,299.99" → "1299.99").
pub fn strip_non_numeric(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect()
}

pub fn parse_number(raw: &str) -> Option<f64> {
    strip_non_numeric(raw)
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Counts are truncated toward zero ("2.5" → 2).
pub fn parse_whole_number(raw: &str) -> Option<i32> {
    let n = parse_number(raw)?.trunc();
    if n < i32::MIN as f64 || n > i32::MAX as f64 {
        return None;
    }
    Some(n as i32)
}

pub fn parse_bool(raw: &str) -> bool {
    let raw = raw.trim();
    raw.eq_ignore_ascii_case("true") || raw == "1"
}

pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_valid_url(raw: &str) -> bool {
    url::Url::parse(raw).is_ok()
}

/// Collects the errors of one row while its fields are coerced.
struct RowCoercer<'a> {
    raw: &'a RawRow,
    errors: Vec<ValidationError>,
}

impl<'a> RowCoercer<'a> {
    fn new(raw: &'a RawRow) -> Self {
        Self {
            raw,
            errors: Vec::new(),
        }
    }

    fn reject(&mut self, field: ProductField, value: &str, message: &str) {
        self.errors.push(ValidationError {
            row: self.raw.row,
            field: field.to_string(),
            value: value.to_string(),
            message: message.to_string(),
        });
    }

    fn text(&self, field: ProductField) -> Option<String> {
        self.raw.text(field)
    }

    fn number(&mut self, field: ProductField) -> Option<f64> {
        let value = self.text(field)?;
        let parsed = parse_number(&value);
        if parsed.is_none() {
            self.reject(field, &value, "must be a valid number");
        }
        parsed
    }

    fn whole_number(&mut self, field: ProductField) -> Option<i32> {
        let value = self.text(field)?;
        let parsed = parse_whole_number(&value);
        if parsed.is_none() {
            self.reject(field, &value, "must be a valid number");
        }
        parsed
    }

    fn lenient_number(&self, field: ProductField) -> Option<f64> {
        let value = self.text(field)?;
        let parsed = parse_number(&value);
        if parsed.is_none() {
            tracing::debug!("Row {}: dropping unparseable {} '{}'", self.raw.row, field, value);
        }
        parsed
    }

    fn lenient_whole_number(&self, field: ProductField) -> Option<i32> {
        let value = self.text(field)?;
        let parsed = parse_whole_number(&value);
        if parsed.is_none() {
            tracing::debug!("Row {}: dropping unparseable {} '{}'", self.raw.row, field, value);
        }
        parsed
    }

    fn list(&self, field: ProductField) -> Vec<String> {
        match self.raw.get(field) {
            Some(RawValue::Text(s)) => split_list(s),
            Some(RawValue::List(items)) => items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        }
    }

    fn flag(&self, field: ProductField) -> Option<bool> {
        self.text(field).map(|v| parse_bool(&v))
    }

    fn url(&mut self, field: ProductField, value: Option<String>) -> Option<String> {
        let value = value?;
        if !is_valid_url(&value) {
            self.reject(field, &value, "must be a valid absolute URL");
        }
        Some(value)
    }
}

/// Coerce and validate one raw row. Every problem in the row is reported.
pub fn normalize_row(raw: &RawRow, options: &ImportOptions) -> Result<Product, Vec<ValidationError>> {
    let mut row = RowCoercer::new(raw);

    let name = row.text(ProductField::Name).unwrap_or_default();
    if name.is_empty() {
        row.reject(ProductField::Name, &name, "name is required");
    }

    let regular_price = row.number(ProductField::RegularPrice);
    let sale_price = row.number(ProductField::SalePrice);
    let stock_quantity = row.whole_number(ProductField::StockQuantity);

    let image_url = row.text(ProductField::ImageUrl);
    let image_url = row.url(ProductField::ImageUrl, image_url);

    let amazon_url = row.text(ProductField::AmazonUrl).map(|url| {
        if options.sanitize_urls {
            sanitize_amazon_url(&url, &options.affiliate_tag)
        } else {
            url
        }
    });
    let amazon_url = row.url(ProductField::AmazonUrl, amazon_url);

    let product = Product {
        id: None,
        name,
        description: row.text(ProductField::Description),
        regular_price,
        sale_price,
        stock_quantity,
        sku: row.text(ProductField::Sku),
        brand: row.text(ProductField::Brand),
        category: row.text(ProductField::Category),
        subcategories: row.list(ProductField::Subcategories),
        tags: row.list(ProductField::Tags),
        tank_types: row.list(ProductField::TankTypes),
        image_url,
        amazon_url,
        weight: row.lenient_number(ProductField::Weight),
        dimensions: row.text(ProductField::Dimensions),
        rating: row.lenient_number(ProductField::Rating),
        review_count: row.lenient_whole_number(ProductField::ReviewCount),
        is_featured: row.flag(ProductField::IsFeatured).unwrap_or(false),
        is_active: row.flag(ProductField::IsActive).unwrap_or(true),
    };

    if row.errors.is_empty() {
        Ok(product)
    } else {
        Err(row.errors)
    }
}
