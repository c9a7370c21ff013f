//! Property-based test suite
//!
//! Uses proptest to generate random inputs and verify invariants of the
//! document store, the metrics buffers, and the wire protocol types.

mod metrics_properties;
mod protocol_properties;
mod store_properties;
