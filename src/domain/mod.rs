//! Domain layer: award data types, pricing seasons, the valuation rules and
//! the ports the application layer talks to.

pub mod award;
pub mod calendar;
pub mod ports;
pub mod transfer;
pub mod valuation;
