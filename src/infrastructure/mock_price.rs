use crate::domain::ports::{PriceSource, RouteQuery};
use crate::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fare quoted for any route without a specific rule, and the substitute
/// for any failed live lookup.
pub const DEFAULT_MOCK_PRICE: Decimal = dec!(900.0);

/// Offline price source with a handful of hand-picked fares.
#[derive(Debug, Clone)]
pub struct MockPriceSource {
    rules: Vec<(&'static str, &'static str, Decimal)>,
    default_price: Decimal,
}

impl MockPriceSource {
    pub fn new() -> Self {
        Self {
            rules: vec![("JFK", "DXB", dec!(1200.0)), ("JFK", "LHR", dec!(850.0))],
            default_price: DEFAULT_MOCK_PRICE,
        }
    }

    pub fn price_for(&self, origin: &str, destination: &str) -> Decimal {
        self.rules
            .iter()
            .find(|(from, to, _)| *from == origin && *to == destination)
            .map(|(_, _, price)| *price)
            .unwrap_or(self.default_price)
    }
}

impl Default for MockPriceSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceSource for MockPriceSource {
    async fn flight_price(&self, query: &RouteQuery) -> Result<Decimal> {
        Ok(self.price_for(&query.origin, &query.destination))
    }
}
