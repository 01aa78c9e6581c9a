mod common;

use common::{CountingPriceSource, FailingPriceSource};
use pointpilot::application::price_resolver::CashPriceResolver;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

#[tokio::test]
async fn test_repeated_lookups_hit_the_source_once() {
    let (source, calls) = CountingPriceSource::new(dec!(640));
    let resolver = CashPriceResolver::new(Box::new(source), 16);

    for _ in 0..5 {
        let price = resolver.resolve_price("JFK", "LHR", "2024-07-01").await;
        assert_eq!(price, dec!(640));
    }
    resolver.resolve_price(" jfk ", "lhr", "2024-07-01").await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_date_is_part_of_the_key() {
    let (source, calls) = CountingPriceSource::new(dec!(640));
    let resolver = CashPriceResolver::new(Box::new(source), 16);

    resolver.resolve_price("JFK", "LHR", "2024-07-01").await;
    resolver.resolve_price("JFK", "LHR", "2024-07-02").await;
    resolver.resolve_price("LHR", "JFK", "2024-07-01").await;

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(resolver.cached_routes().await, 3);
}

#[tokio::test]
async fn test_concurrent_lookups_for_one_route_compute_once() {
    let (source, calls) = CountingPriceSource::new(dec!(1010));
    let source = source.with_delay(Duration::from_millis(50));
    let resolver = Arc::new(CashPriceResolver::new(Box::new(source), 16));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let resolver = Arc::clone(&resolver);
            tokio::spawn(async move { resolver.resolve_price("SFO", "SIN", "2024-09-09").await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), dec!(1010));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failing_source_falls_back() {
    let resolver = CashPriceResolver::new(Box::new(FailingPriceSource), 16);

    assert_eq!(resolver.resolve_price("JFK", "LHR", "2024-07-01").await, dec!(900));
    assert_eq!(resolver.cached_routes().await, 1);
}

#[tokio::test]
async fn test_custom_fallback() {
    let resolver =
        CashPriceResolver::new(Box::new(FailingPriceSource), 16).with_fallback(dec!(499.99));

    assert_eq!(resolver.fallback(), dec!(499.99));
    assert_eq!(resolver.resolve_price("MIA", "EZE", "2024-01-15").await, dec!(499.99));
}

#[tokio::test]
async fn test_least_recently_used_route_is_evicted() {
    let (source, calls) = CountingPriceSource::new(dec!(300));
    let resolver = CashPriceResolver::new(Box::new(source), 2);

    resolver.resolve_price("AAA", "BBB", "2024-01-01").await;
    resolver.resolve_price("CCC", "DDD", "2024-01-01").await;
    // Touch the first route so the second becomes the eviction candidate.
    resolver.resolve_price("AAA", "BBB", "2024-01-01").await;
    resolver.resolve_price("EEE", "FFF", "2024-01-01").await;
    assert_eq!(resolver.cached_routes().await, 2);
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    resolver.resolve_price("AAA", "BBB", "2024-01-01").await;
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    resolver.resolve_price("CCC", "DDD", "2024-01-01").await;
    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert_eq!(resolver.cached_routes().await, 2);
}
