use crate::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::fmt;

/// A one-way flight search: upper-cased location codes plus a travel date.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteQuery {
    pub origin: String,
    pub destination: String,
    pub date: String,
}

impl RouteQuery {
    pub fn new(origin: &str, destination: &str, date: &str) -> Self {
        Self {
            origin: origin.trim().to_uppercase(),
            destination: destination.trim().to_uppercase(),
            date: date.to_string(),
        }
    }

    /// Award chart key, e.g. `JFK-LHR`.
    pub fn route_key(&self) -> String {
        format!("{}-{}", self.origin, self.destination)
    }
}

impl fmt::Display for RouteQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} on {}", self.origin, self.destination, self.date)
    }
}

/// Source of cash fares for a route.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn flight_price(&self, query: &RouteQuery) -> Result<Decimal>;
}

pub type PriceSourceBox = Box<dyn PriceSource>;
