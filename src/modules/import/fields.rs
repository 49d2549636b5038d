//! Target fields of a normalized product and the header auto-mapping rules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Source column name → target field.
pub type FieldMapping = BTreeMap<String, ProductField>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductField {
    Name,
    Description,
    RegularPrice,
    SalePrice,
    StockQuantity,
    Sku,
    Brand,
    Category,
    Subcategories,
    Tags,
    TankTypes,
    ImageUrl,
    AmazonUrl,
    Weight,
    Dimensions,
    Rating,
    ReviewCount,
    IsFeatured,
    IsActive,
    Ignore,
}

impl ProductField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductField::Name => "name",
            ProductField::Description => "description",
            ProductField::RegularPrice => "regular_price",
            ProductField::SalePrice => "sale_price",
            ProductField::StockQuantity => "stock_quantity",
            ProductField::Sku => "sku",
            ProductField::Brand => "brand",
            ProductField::Category => "category",
            ProductField::Subcategories => "subcategories",
            ProductField::Tags => "tags",
            ProductField::TankTypes => "tank_types",
            ProductField::ImageUrl => "image_url",
            ProductField::AmazonUrl => "amazon_url",
            ProductField::Weight => "weight",
            ProductField::Dimensions => "dimensions",
            ProductField::Rating => "rating",
            ProductField::ReviewCount => "review_count",
            ProductField::IsFeatured => "is_featured",
            ProductField::IsActive => "is_active",
            ProductField::Ignore => "ignore",
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(
            self,
            ProductField::Tags | ProductField::TankTypes | ProductField::Subcategories
        )
    }
}

impl fmt::Display for ProductField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Headers that map by exact (case-sensitive) match before any keyword rule.
const EXACT_RULES: &[(&str, ProductField)] = &[
    ("Price", ProductField::RegularPrice),
    ("Product Link", ProductField::AmazonUrl),
    ("Title", ProductField::Name),
];

/// Case-insensitive substring rules, first hit wins.
/// `sale` must precede `price`, `subcategor` must precede `categor`,
/// and `brand`/`categor` must precede `name` ("Brand Name", "Category Name").
const KEYWORD_RULES: &[(&[&str], ProductField)] = &[
    (&["sale"], ProductField::SalePrice),
    (&["price", "cost"], ProductField::RegularPrice),
    (&["image", "img", "photo", "picture"], ProductField::ImageUrl),
    (&["amazon", "link", "url"], ProductField::AmazonUrl),
    (&["sku"], ProductField::Sku),
    (&["brand", "manufacturer"], ProductField::Brand),
    (&["subcategor"], ProductField::Subcategories),
    (&["categor"], ProductField::Category),
    (&["tank"], ProductField::TankTypes),
    (&["tag"], ProductField::Tags),
    (&["name", "title"], ProductField::Name),
    (&["desc"], ProductField::Description),
    (&["stock", "quantity", "qty", "inventory"], ProductField::StockQuantity),
    (&["weight"], ProductField::Weight),
    (&["dimension", "size"], ProductField::Dimensions),
    (&["rating", "stars"], ProductField::Rating),
    (&["review"], ProductField::ReviewCount),
    (&["featured"], ProductField::IsFeatured),
    (&["active", "visible"], ProductField::IsActive),
];

/// Guess the target field for a CSV header.
pub fn auto_map_header(header: &str) -> ProductField {
    let header = header.trim();

    if let Some((_, field)) = EXACT_RULES.iter().find(|(literal, _)| *literal == header) {
        return *field;
    }

    let lower = header.to_lowercase();
    KEYWORD_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, field)| *field)
        .unwrap_or(ProductField::Ignore)
}

pub fn auto_map_headers(headers: &[String]) -> FieldMapping {
    headers
        .iter()
        .map(|h| (h.clone(), auto_map_header(h)))
        .collect()
}

/// Resolve the field of every header, in header order. Headers the user did
/// not map fall back to the auto-mapping.
pub fn resolve_mapping(headers: &[String], user: Option<&FieldMapping>) -> Vec<ProductField> {
    headers
        .iter()
        .map(|h| {
            user.and_then(|m| m.get(h).or_else(|| m.get(h.trim())))
                .copied()
                .unwrap_or_else(|| auto_map_header(h))
        })
        .collect()
}

/// Field addressed by a key of a JSON product object.
pub fn json_key_field(key: &str) -> Option<ProductField> {
    let field = match key {
        "name" | "title" => ProductField::Name,
        "description" => ProductField::Description,
        "price" | "regular_price" => ProductField::RegularPrice,
        "sale_price" => ProductField::SalePrice,
        "quantity" | "stock" | "stock_quantity" => ProductField::StockQuantity,
        "sku" => ProductField::Sku,
        "brand" => ProductField::Brand,
        "category" => ProductField::Category,
        "subcategories" => ProductField::Subcategories,
        "tags" => ProductField::Tags,
        "tank_types" => ProductField::TankTypes,
        "image_url" | "image" => ProductField::ImageUrl,
        "amazon_url" | "url" | "link" => ProductField::AmazonUrl,
        "weight" => ProductField::Weight,
        "dimensions" => ProductField::Dimensions,
        "rating" => ProductField::Rating,
        "review_count" => ProductField::ReviewCount,
        "is_featured" => ProductField::IsFeatured,
        "is_active" => ProductField::IsActive,
        _ => return None,
    };
    Some(field)
}
