//! ImageLingo admin library.
//!
//! This crate provides the companion service as a library,
//! allowing it to be tested and reused by the CLI.
//!
//! # Surfaces
//!
//! - Image page action backed by the Shopify Admin GraphQL API
//! - Metrics client and proxy routes for the translation server
//! - Pricing plans page
//!
//! The Shopify Admin token is HIGH PRIVILEGE. Bind to loopback unless a
//! reverse proxy terminates access control.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod metrics;
pub mod routes;
pub mod shopify;
pub mod state;
