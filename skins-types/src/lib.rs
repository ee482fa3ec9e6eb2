//! # Skins Types
//!
//! Domain types and port traits for the skin store.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Skin, Purchase, RateQuote)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    NewPurchase, Purchase, PurchaseId, RateQuote, Skin, SkinId, UNAVAILABLE_RATE, UserId,
};
pub use dto::*;
pub use error::{AppError, DomainError, PricingError, RateError, RepoError};
pub use ports::{PriceCalculator, PurchaseRepository, RateProvider, SkinRepository};

// Callers of `RateProvider` need the same token type.
pub use tokio_util::sync::CancellationToken;
