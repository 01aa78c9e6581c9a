//! Adapters behind the domain ports plus the static award data.

pub mod amadeus;
pub mod charts;
pub mod lru_cache;
pub mod mock_price;
