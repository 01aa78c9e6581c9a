//! Outer surfaces: the HTTP API.

pub mod http;
