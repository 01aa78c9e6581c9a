use crate::domain::ports::{PriceSourceBox, RouteQuery};
use crate::infrastructure::lru_cache::LruCache;
use crate::infrastructure::mock_price::{DEFAULT_MOCK_PRICE, MockPriceSource};
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// Resolves cash fares for routes, memoized per route and date.
///
/// Lookup failures never reach the caller: they are logged and replaced by
/// the fallback price, and the fallback is cached like any other answer.
pub struct CashPriceResolver {
    source: PriceSourceBox,
    fallback: Decimal,
    cache: LruCache<RouteQuery, Decimal>,
}

impl CashPriceResolver {
    /// Creates a resolver over `source` caching up to `capacity` routes.
    pub fn new(source: PriceSourceBox, capacity: usize) -> Self {
        Self {
            source,
            fallback: DEFAULT_MOCK_PRICE,
            cache: LruCache::new(capacity),
        }
    }

    /// A resolver that only ever quotes mock fares.
    pub fn mock(capacity: usize) -> Self {
        Self::new(Box::new(MockPriceSource::new()), capacity)
    }

    pub fn with_fallback(mut self, fallback: Decimal) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn fallback(&self) -> Decimal {
        self.fallback
    }

    /// Cash fare for `origin` → `destination` on `date`.
    ///
    /// Location codes are case-insensitive.
    pub async fn resolve_price(&self, origin: &str, destination: &str, date: &str) -> Decimal {
        self.resolve(&RouteQuery::new(origin, destination, date)).await
    }

    pub async fn resolve(&self, query: &RouteQuery) -> Decimal {
        self.cache
            .get_or_compute(query.clone(), || async {
                debug!(route = %query, "Cash price cache miss");
                match self.source.flight_price(query).await {
                    Ok(price) => price,
                    Err(e) => {
                        warn!(
                            route = %query,
                            error = %e,
                            fallback = %self.fallback,
                            "Price lookup failed, using fallback"
                        );
                        self.fallback
                    }
                }
            })
            .await
    }

    /// Number of routes currently cached.
    pub async fn cached_routes(&self) -> usize {
        self.cache.len().await
    }
}
