#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use pointpilot::application::optimizer::Optimizer;
use pointpilot::application::price_resolver::CashPriceResolver;
use pointpilot::domain::ports::{PriceSource, RouteQuery};
use pointpilot::error::{PointPilotError, Result};
use pointpilot::infrastructure::charts::AwardCharts;
use pointpilot::interfaces::http::router;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tower::ServiceExt;

/// Price source that quotes a fixed fare and counts how often it is asked.
pub struct CountingPriceSource {
    price: Decimal,
    delay: Duration,
    calls: Arc<AtomicUsize>,
}

impl CountingPriceSource {
    pub fn new(price: Decimal) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = Self {
            price,
            delay: Duration::ZERO,
            calls: Arc::clone(&calls),
        };
        (source, calls)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl PriceSource for CountingPriceSource {
    async fn flight_price(&self, _query: &RouteQuery) -> Result<Decimal> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.price)
    }
}

/// Price source that always fails, as an unreachable live API would.
pub struct FailingPriceSource;

#[async_trait]
impl PriceSource for FailingPriceSource {
    async fn flight_price(&self, query: &RouteQuery) -> Result<Decimal> {
        Err(PointPilotError::PriceLookup(format!("no fare for {query}")))
    }
}

pub fn mock_optimizer() -> Optimizer {
    Optimizer::new(Arc::new(AwardCharts::builtin()), CashPriceResolver::mock(128))
}

pub fn mock_router() -> Router {
    router(Arc::new(mock_optimizer()))
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}
