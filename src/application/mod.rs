//! Application layer orchestrating price resolution and valuation.
//!
//! `Optimizer` is the entry point used by both the HTTP and CLI interfaces.
//! It owns the award charts and the `CashPriceResolver`, whose bounded cache
//! is the only state shared between requests.

pub mod optimizer;
pub mod price_resolver;
