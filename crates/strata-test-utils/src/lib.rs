//! Shared test utilities for the strata workspace.
//!
//! This crate provides standardised fixtures so every crate tests against
//! the same sample documents. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`]: canned JSON, TOML and YAML configuration documents
//! - [`dir`]: [`TestDir`](dir::TestDir), a temporary directory for documents

pub mod dir;
pub mod fixtures;

pub use dir::TestDir;
