//! In-memory repository adapter.
//!
//! Used when no `DATABASE_URL` is configured and by tests. Purchases live in
//! an append-only vector so listing keeps insertion order.

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::RwLock;

use skins_types::{
    NewPurchase, Purchase, PurchaseId, PurchaseRepository, RepoError, Skin, SkinId,
    SkinRepository, UserId,
};

use crate::default_catalog;

/// In-memory repository implementation.
#[derive(Default)]
pub struct InMemoryRepo {
    skins: DashMap<SkinId, Skin>,
    purchases: RwLock<Vec<Purchase>>,
}

impl InMemoryRepo {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding the default catalog.
    pub fn seeded() -> Self {
        Self::with_skins(default_catalog())
    }

    /// Creates a repository holding the given skins.
    pub fn with_skins(skins: impl IntoIterator<Item = Skin>) -> Self {
        let repo = Self::new();
        for skin in skins {
            repo.upsert_skin(skin);
        }
        repo
    }

    /// Inserts or replaces a skin. The catalog is managed outside the
    /// purchase flow; this is the hook for it.
    pub fn upsert_skin(&self, skin: Skin) {
        self.skins.insert(skin.id, skin);
    }
}

#[async_trait]
impl SkinRepository for InMemoryRepo {
    async fn get_skin(&self, id: SkinId) -> Result<Option<Skin>, RepoError> {
        Ok(self.skins.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list_skins(&self) -> Result<Vec<Skin>, RepoError> {
        let mut skins: Vec<Skin> = self.skins.iter().map(|e| e.value().clone()).collect();
        skins.sort_by_key(|s| s.id);
        Ok(skins)
    }
}

#[async_trait]
impl PurchaseRepository for InMemoryRepo {
    async fn add_purchase(&self, purchase: NewPurchase) -> Result<Purchase, RepoError> {
        let mut purchases = self.purchases.write().await;
        let id = PurchaseId::new(purchases.len() as i64 + 1);
        let stored = purchase.into_persisted(id);
        purchases.push(stored.clone());
        Ok(stored)
    }

    async fn get_purchase(&self, id: PurchaseId) -> Result<Option<Purchase>, RepoError> {
        let purchases = self.purchases.read().await;
        Ok(purchases.iter().find(|p| p.id() == id).cloned())
    }

    async fn list_purchases_for_user(&self, user_id: &UserId) -> Result<Vec<Purchase>, RepoError> {
        let purchases = self.purchases.read().await;
        Ok(purchases
            .iter()
            .filter(|p| p.owner_id() == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use skins_types::RateQuote;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn new_purchase(skin: i64, owner: &str) -> NewPurchase {
        NewPurchase::new(
            SkinId::new(skin),
            user(owner),
            Decimal::new(250, 2),
            RateQuote::Live(Decimal::new(65_000, 0)),
        )
    }

    #[tokio::test]
    async fn test_seeded_catalog() {
        let repo = InMemoryRepo::seeded();

        let skins = repo.list_skins().await.unwrap();
        assert_eq!(skins.len(), 2);
        assert_eq!(skins[0].name, "Default Skin");
        assert_eq!(skins[1].base_price_usd, Decimal::new(10, 0));

        assert!(repo.get_skin(SkinId::new(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_assigns_sequential_ids() {
        let repo = InMemoryRepo::new();

        let first = repo.add_purchase(new_purchase(1, "a")).await.unwrap();
        let second = repo.add_purchase(new_purchase(2, "a")).await.unwrap();

        assert_eq!(first.id(), PurchaseId::new(1));
        assert_eq!(second.id(), PurchaseId::new(2));
        assert_eq!(repo.get_purchase(second.id()).await.unwrap(), Some(second));
        assert!(repo.get_purchase(PurchaseId::new(3)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_by_user_filters_and_keeps_order() {
        let repo = InMemoryRepo::new();
        repo.add_purchase(new_purchase(2, "a")).await.unwrap();
        repo.add_purchase(new_purchase(1, "b")).await.unwrap();
        repo.add_purchase(new_purchase(1, "a")).await.unwrap();

        let mine = repo.list_purchases_for_user(&user("a")).await.unwrap();
        let skin_ids: Vec<i64> = mine.iter().map(|p| p.skin_id().value()).collect();
        assert_eq!(skin_ids, vec![2, 1]);
        assert!(mine.iter().all(|p| p.owner_id() == &user("a")));
    }
}
