//! Integration testing module
//!
//! End-to-end tests for the subtitle pipeline:
//! - Discovery against real temp directories
//! - Conversion and serving over a live listener
//! - Remote sources fetched over HTTP

pub mod e2e;
pub mod fixtures;
