//! Repository port traits.
//!
//! Adapters (SQLite, in-memory) implement these. "Not found" is a normal
//! `Ok(None)`, never an error.

use crate::domain::{NewPurchase, Purchase, PurchaseId, Skin, SkinId, UserId};
use crate::error::RepoError;

/// Read access to the skin catalog.
#[async_trait::async_trait]
pub trait SkinRepository: Send + Sync + 'static {
    /// Gets a skin by ID.
    async fn get_skin(&self, id: SkinId) -> Result<Option<Skin>, RepoError>;

    /// Lists all skins, ordered by id.
    async fn list_skins(&self) -> Result<Vec<Skin>, RepoError>;
}

/// Storage for purchase records.
///
/// Purchases are append-only: there is no update or delete.
#[async_trait::async_trait]
pub trait PurchaseRepository: Send + Sync + 'static {
    /// Stores a purchase and returns it with its assigned id.
    async fn add_purchase(&self, purchase: NewPurchase) -> Result<Purchase, RepoError>;

    /// Gets a purchase by ID.
    async fn get_purchase(&self, id: PurchaseId) -> Result<Option<Purchase>, RepoError>;

    /// Lists a user's purchases in insertion order.
    async fn list_purchases_for_user(&self, user_id: &UserId) -> Result<Vec<Purchase>, RepoError>;
}
