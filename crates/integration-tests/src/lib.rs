//! Integration tests for the shoptools server.
//!
//! These tests drive the public API end-to-end (resolver, catalog,
//! dispatch, registry, execution client) with injected `Environment`
//! maps and a scripted `Transport`, so no network access or process
//! environment mutation is involved.
//!
//! # Test Files
//!
//! - `category_resolution` - resolver modes and catalog queries
//! - `dispatch_pipeline` - dispatch ordering, duplication, mounted counts
//! - `execution_client` - client construction, normalization, escaping
