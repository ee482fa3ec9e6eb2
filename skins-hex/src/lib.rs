//! # Skins Hex
//!
//! Application service layer and HTTP adapter for the skin store.
//!
//! ## Architecture
//!
//! - `service/` - Purchase orchestrator (skin check, rate, price, persist)
//! - `catalog/` - Read-only skin catalog with sale prices
//! - `pricing/` - Markdown price calculator
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! Services are generic over the repository, so different repository
//! implementations can be injected.

pub mod catalog;
pub mod inbound;
pub mod openapi;
pub mod pricing;
pub mod service;


pub use catalog::SkinService;
pub use pricing::MarkdownPriceCalculator;
pub use service::{PurchaseService, StoreRepository};
