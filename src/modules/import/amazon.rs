//! Amazon product URL canonicalization.

use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_AFFILIATE_TAG: &str = "travisdraga07-20";

/// ASIN patterns in priority order.
static ASIN_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"/dp/([A-Za-z0-9]{10})",
        r"/gp/product/([A-Za-z0-9]{10})",
        r"/product/([A-Za-z0-9]{10})",
        r"pd_rd_i=([A-Za-z0-9]{10})",
        r"ASIN=([A-Za-z0-9]{10})",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

pub fn is_amazon_url(url: &str) -> bool {
    url.contains("amazon.")
}

/// Extract the ASIN from an Amazon URL.
pub fn extract_asin(url: &str) -> Option<String> {
    if !is_amazon_url(url) {
        return None;
    }

    ASIN_PATTERNS
        .iter()
        .find_map(|re| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn affiliate_url(asin: &str, tag: &str) -> String {
    format!("https://www.amazon.com/dp/{}?tag={}", asin, tag)
}

/// Rewrite an Amazon URL to its canonical affiliate form.
/// Anything without a recognizable ASIN is returned unchanged.
pub fn sanitize_amazon_url(url: &str, tag: &str) -> String {
    match extract_asin(url) {
        Some(asin) => affiliate_url(&asin, tag),
        None => url.to_string(),
    }
}
