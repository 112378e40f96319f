use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{ListQuery, PriceRange, Product, ProductDraft, ProductPage, StoreStats};

/// In-memory product collection. Insertion order is the list order; the
/// whole collection sits behind one RwLock, so each operation is atomic and
/// readers run concurrently.
#[derive(Debug, Clone, Default)]
pub struct ProductStore {
    products: Arc<RwLock<Vec<Product>>>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }

    /// Filter by exact category, then case-insensitive name substring, then
    /// slice out the requested page. An out-of-range page is an empty page,
    /// not an error.
    pub async fn list(&self, query: &ListQuery) -> ProductPage {
        let products = self.products.read().await;

        let filtered: Vec<&Product> = products
            .iter()
            .filter(|p| query.category.as_ref().map_or(true, |c| &p.category == c))
            .filter(|p| {
                query
                    .search
                    .as_ref()
                    .map_or(true, |s| p.name.to_lowercase().contains(&s.to_lowercase()))
            })
            .collect();

        let page = query.page();
        let limit = query.limit();
        let total_products = filtered.len();
        let total_pages = (total_products + limit - 1) / limit;

        let window: Vec<Product> = filtered
            .into_iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .cloned()
            .collect();

        ProductPage {
            products: window,
            current_page: page,
            total_pages,
            total_products,
        }
    }

    pub async fn get(&self, id: &str) -> AppResult<Product> {
        let products = self.products.read().await;
        products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    /// Appends a new record under a fresh UUID and returns it.
    pub async fn create(&self, draft: ProductDraft) -> Product {
        let product = draft.into_product(Uuid::new_v4().to_string());
        self.products.write().await.push(product.clone());
        info!(id = %product.id, name = %product.name, "Created product");
        product
    }

    /// Replaces every field except `id` at the record's current position.
    pub async fn update(&self, id: &str, draft: ProductDraft) -> AppResult<Product> {
        let mut products = self.products.write().await;
        let slot = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(not_found)?;
        *slot = draft.into_product(id.to_string());
        let updated = slot.clone();
        info!(id = %id, "Updated product");
        Ok(updated)
    }

    /// Removes the record, shifting everything after it, and returns it.
    pub async fn delete(&self, id: &str) -> AppResult<Product> {
        let mut products = self.products.write().await;
        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(not_found)?;
        let removed = products.remove(index);
        info!(id = %id, "Deleted product");
        Ok(removed)
    }

    /// Aggregates over the unfiltered collection, computed fresh per call.
    pub async fn stats(&self) -> StoreStats {
        let products = self.products.read().await;

        let mut category_count: IndexMap<String, usize> = IndexMap::new();
        for product in products.iter() {
            *category_count.entry(product.category.clone()).or_insert(0) += 1;
        }

        let in_stock_count = products.iter().filter(|p| p.in_stock).count();

        let price_range = if products.is_empty() {
            None
        } else {
            let min = products
                .iter()
                .map(|p| p.price)
                .fold(f64::INFINITY, f64::min);
            let max = products
                .iter()
                .map(|p| p.price)
                .fold(f64::NEG_INFINITY, f64::max);
            let sum: f64 = products.iter().map(|p| p.price).sum();
            Some(PriceRange {
                min,
                max,
                avg: sum / products.len() as f64,
            })
        };

        StoreStats {
            total_products: products.len(),
            category_count,
            in_stock_count,
            out_of_stock_count: products.len() - in_stock_count,
            price_range,
        }
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Product not found".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn draft(name: &str, category: &str, price: f64) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            description: format!("{name} description"),
            price,
            category: category.to_string(),
            in_stock: true,
        }
    }

    fn list_query(
        category: Option<&str>,
        search: Option<&str>,
        page: Option<&str>,
        limit: Option<&str>,
    ) -> ListQuery {
        ListQuery {
            category: category.map(str::to_string),
            search: search.map(str::to_string),
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
        }
    }

    fn seeded() -> ProductStore {
        ProductStore::with_products(seed::sample_products())
    }

    // ── List / filter / paginate ──────────────────────────────────────────────

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let page = seeded().list(&ListQuery::default()).await;
        let names: Vec<&str> = page.products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Laptop", "Smartphone", "Coffee Maker"]);
        assert_eq!(page.total_products, 3);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn category_filter_is_exact_and_case_sensitive() {
        let store = seeded();

        let page = store
            .list(&list_query(Some("kitchen"), None, None, None))
            .await;
        assert_eq!(page.products.len(), 1);
        assert_eq!(page.products[0].name, "Coffee Maker");

        let page = store
            .list(&list_query(Some("Kitchen"), None, None, None))
            .await;
        assert!(page.products.is_empty());
        assert_eq!(page.total_products, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn search_matches_name_case_insensitively() {
        let store = seeded();
        for needle in ["lap", "LAP", "aPtO"] {
            let page = store.list(&list_query(None, Some(needle), None, None)).await;
            assert_eq!(page.products.len(), 1, "search {needle:?}");
            assert_eq!(page.products[0].name, "Laptop");
        }
    }

    #[tokio::test]
    async fn category_and_search_combine() {
        let store = seeded();
        let page = store
            .list(&list_query(Some("electronics"), Some("phone"), None, None))
            .await;
        assert_eq!(page.products.len(), 1);
        assert_eq!(page.products[0].name, "Smartphone");
    }

    #[tokio::test]
    async fn pagination_slices_windows() {
        let store = seeded();

        let first = store.list(&list_query(None, None, Some("1"), Some("2"))).await;
        assert_eq!(first.products.len(), 2);
        assert_eq!(first.current_page, 1);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.total_products, 3);

        let second = store.list(&list_query(None, None, Some("2"), Some("2"))).await;
        assert_eq!(second.products.len(), 1);
        assert_eq!(second.products[0].name, "Coffee Maker");
        assert_eq!(second.current_page, 2);
    }

    #[tokio::test]
    async fn out_of_range_page_is_empty_not_an_error() {
        let page = seeded()
            .list(&list_query(None, None, Some("7"), Some("10")))
            .await;
        assert!(page.products.is_empty());
        assert_eq!(page.total_products, 3);
        assert_eq!(page.current_page, 7);
    }

    // ── CRUD ──────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn create_appends_with_fresh_unique_id() {
        let store = seeded();
        let a = store.create(draft("Blender", "kitchen", 70.0)).await;
        let b = store.create(draft("Toaster", "kitchen", 30.0)).await;

        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert!(!["1", "2", "3"].contains(&a.id.as_str()));

        let page = store.list(&ListQuery::default()).await;
        assert_eq!(page.total_products, 5);
        assert_eq!(page.products.last().unwrap().name, "Toaster");
    }

    #[tokio::test]
    async fn get_roundtrips_created_record() {
        let store = seeded();
        let created = store.create(draft("Blender", "kitchen", 70.0)).await;
        let fetched = store.get(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let err = seeded().get("no-such-id").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_replaces_fields_in_place() {
        let store = seeded();
        let updated = store
            .update("2", draft("Smartphone Pro", "electronics", 950.0))
            .await
            .unwrap();

        assert_eq!(updated.id, "2");
        assert_eq!(updated.price, 950.0);

        // Position in the collection is unchanged.
        let page = store.list(&ListQuery::default()).await;
        assert_eq!(page.products[1].name, "Smartphone Pro");
    }

    #[tokio::test]
    async fn update_unknown_id_leaves_collection_untouched() {
        let store = seeded();
        assert!(store
            .update("missing", draft("X", "misc", 1.0))
            .await
            .is_err());
        assert_eq!(store.list(&ListQuery::default()).await.total_products, 3);
    }

    #[tokio::test]
    async fn delete_returns_record_and_shifts_order() {
        let store = seeded();
        let removed = store.delete("2").await.unwrap();
        assert_eq!(removed.name, "Smartphone");

        assert!(store.get("2").await.is_err());
        let names: Vec<String> = store
            .list(&ListQuery::default())
            .await
            .products
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Laptop", "Coffee Maker"]);
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let store = seeded();
        assert!(store.delete("missing").await.is_err());
        assert_eq!(store.list(&ListQuery::default()).await.total_products, 3);
    }

    // ── Stats ─────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn stats_over_seeded_collection() {
        let stats = seeded().stats().await;

        assert_eq!(stats.total_products, 3);
        assert_eq!(stats.in_stock_count, 2);
        assert_eq!(stats.out_of_stock_count, 1);
        assert_eq!(stats.category_count.get("electronics"), Some(&2));
        assert_eq!(stats.category_count.get("kitchen"), Some(&1));

        let range = stats.price_range.unwrap();
        assert_eq!(range.min, 50.0);
        assert_eq!(range.max, 1200.0);
        assert!((range.avg - 2050.0 / 3.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn stats_on_empty_store_have_no_price_range() {
        let stats = ProductStore::new().stats().await;
        assert_eq!(stats.total_products, 0);
        assert_eq!(stats.in_stock_count, 0);
        assert_eq!(stats.out_of_stock_count, 0);
        assert!(stats.category_count.is_empty());
        assert!(stats.price_range.is_none());
    }
}
