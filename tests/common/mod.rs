//! Shared test utilities
//!
//! This module provides common helpers used across the test suites

pub mod servers;
