//! Integration test suite
//!
//! Drives the full application through axum-test: the REST surface in
//! `api`, the WebSocket lifecycle in `ws`.

#[path = "../common/mod.rs"]
mod common;

mod api;
mod ws;
