//! Core types for imagelingo.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod image;
pub mod page;
pub mod plan;
pub mod price;
pub mod shop;

pub use image::{ImageRecord, ImageSource};
pub use page::{Connection, Edge, PageCursor, PageDirection, PageInfo, PageRequest};
pub use plan::PricingPlan;
pub use price::{CurrencyCode, Price};
pub use shop::{ShopDomain, ShopDomainError};
