//! imagelingo Core - Shared types library.
//!
//! This crate provides common types used across all imagelingo components:
//! - `admin` - Translation companion service (image page action, metrics proxy)
//! - `cli` - Command-line tools for metrics queries and image browsing
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Shop domains, cursor pagination, image records, pricing plans

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
