//! Property-based tests for the bounded metrics buffers

use concurrencypad::backend::metrics::MetricsCollector;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_latency_buffer_never_exceeds_bound(count in 0usize..3000) {
        let metrics = MetricsCollector::new();
        for i in 0..count {
            metrics.record_message(i as f64 + 1.0);
        }
        let stats = metrics.get_stats(0, 0);
        prop_assert_eq!(stats.total_messages, count as u64);
        // Percentiles always come from retained samples
        prop_assert!(stats.p95_latency_ms <= count as f64);
        prop_assert!(stats.p50_latency_ms <= stats.p95_latency_ms);
    }

    #[test]
    fn test_event_log_never_exceeds_bound(count in 0usize..300) {
        let metrics = MetricsCollector::new();
        for i in 0..count {
            metrics.add_event("connect", "room", &format!("user-{i}"), "");
        }
        prop_assert!(metrics.get_events(usize::MAX).len() <= 100);
    }
}
