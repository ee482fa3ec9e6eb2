//! Domain models for the skin store.

pub mod purchase;
pub mod rate;
pub mod skin;

pub use purchase::{NewPurchase, Purchase, PurchaseId, UserId};
pub use rate::{RateQuote, UNAVAILABLE_RATE};
pub use skin::{Skin, SkinId};
