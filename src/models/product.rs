use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Core product entity. `id` is a server-assigned UUID string, unique across
/// the collection and never changed by an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
}

// ── Request payloads ─────────────────────────────────────────────────────────

/// A validated write payload — everything a product carries except its id.
/// Only the `ValidProduct` extractor produces one, so a draft reaching a
/// handler has already passed the required-field checks.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
}

impl ProductDraft {
    pub fn into_product(self, id: String) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            in_stock: self.in_stock,
        }
    }
}

// ── Query parameters ──────────────────────────────────────────────────────────

const DEFAULT_PAGE: usize = 1;
const DEFAULT_LIMIT: usize = 10;

/// Raw list-route query string. `page` and `limit` stay untyped here so a
/// non-numeric value falls back to its default instead of failing extraction.
#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListQuery {
    /// Page number, 1-based. Unparseable or below 1 means page 1.
    pub fn page(&self) -> usize {
        parse_min_one(self.page.as_deref()).unwrap_or(DEFAULT_PAGE)
    }

    /// Page size. Unparseable or below 1 means 10; no upper bound.
    pub fn limit(&self) -> usize {
        parse_min_one(self.limit.as_deref()).unwrap_or(DEFAULT_LIMIT)
    }
}

fn parse_min_one(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|s| s.parse::<usize>().ok()).filter(|&n| n >= 1)
}

// ── Responses ─────────────────────────────────────────────────────────────────

/// One page of list results.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_products: usize,
}

/// Aggregates over the whole collection.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub total_products: usize,
    /// Category → record count, in first-seen order.
    pub category_count: IndexMap<String, usize>,
    pub in_stock_count: usize,
    pub out_of_stock_count: usize,
    /// `None` (serialized as null) when the collection is empty.
    pub price_range: Option<PriceRange>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}
