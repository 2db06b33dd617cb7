//! Product detail cache for the HTTP catalog.

use std::time::Duration;

use moka::future::Cache;
use rocketshoes_core::{Product, ProductId};

const MAX_CACHED_PRODUCTS: u64 = 1000;

/// TTL cache of product details keyed by id.
///
/// A zero TTL disables caching entirely.
#[derive(Clone)]
pub struct ProductCache {
    inner: Option<Cache<ProductId, Product>>,
}

impl ProductCache {
    pub fn new(ttl: Duration) -> Self {
        let inner = (!ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(MAX_CACHED_PRODUCTS)
                .time_to_live(ttl)
                .build()
        });

        Self { inner }
    }

    pub async fn get(&self, id: ProductId) -> Option<Product> {
        match &self.inner {
            Some(cache) => cache.get(&id).await,
            None => None,
        }
    }

    pub async fn insert(&self, product: Product) {
        if let Some(cache) = &self.inner {
            cache.insert(product.id, product).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: i32) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Shoe {id}"),
            price: Decimal::new(9990, 2),
            image: format!("shoe-{id}.jpg"),
            extra: serde_json::Map::new(),
        }
    }

    #[tokio::test]
    async fn test_cache_hit() {
        let cache = ProductCache::new(Duration::from_secs(60));
        cache.insert(product(1)).await;

        assert_eq!(cache.get(ProductId::new(1)).await, Some(product(1)));
        assert_eq!(cache.get(ProductId::new(2)).await, None);
    }

    #[tokio::test]
    async fn test_zero_ttl_disables_cache() {
        let cache = ProductCache::new(Duration::ZERO);
        cache.insert(product(1)).await;

        assert_eq!(cache.get(ProductId::new(1)).await, None);
    }
}
