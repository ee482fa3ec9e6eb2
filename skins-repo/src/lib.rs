//! # Skins Repository
//!
//! Concrete repository implementations (adapters) for the skin store.
//! The in-memory adapter is always available; SQLite sits behind the
//! `sqlite` feature.

use async_trait::async_trait;
use rust_decimal::Decimal;
use skins_types::{
    NewPurchase, Purchase, PurchaseId, PurchaseRepository, RepoError, Skin, SkinId,
    SkinRepository, UserId,
};

pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
mod types;

#[cfg(feature = "sqlite")]
#[cfg(test)]
mod sqlite_tests;

pub use memory::InMemoryRepo;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepo;

/// The catalog every fresh store starts with.
pub fn default_catalog() -> Vec<Skin> {
    vec![
        Skin {
            id: SkinId::new(1),
            name: "Default Skin".into(),
            base_price_usd: Decimal::new(250, 2),
            is_available: true,
        },
        Skin {
            id: SkinId::new(2),
            name: "Rare Skin".into(),
            base_price_usd: Decimal::new(1000, 2),
            is_available: true,
        },
    ]
}

/// Unified repository wrapper over the available adapters.
pub enum Repo {
    Memory(InMemoryRepo),
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteRepo),
}

/// Build and initialize a repository.
///
/// With no database URL the seeded in-memory store is returned. A URL
/// requires the `sqlite` feature.
///
/// # Examples
///
/// ```ignore
/// let repo = build_repo(None).await?;
/// let repo = build_repo(Some("sqlite://data/skins.db?mode=rwc")).await?;
/// ```
pub async fn build_repo(database_url: Option<&str>) -> anyhow::Result<Repo> {
    match database_url.map(str::trim).filter(|u| !u.is_empty()) {
        None => {
            tracing::info!("no DATABASE_URL set, using in-memory repository");
            Ok(Repo::Memory(InMemoryRepo::seeded()))
        }
        #[cfg(feature = "sqlite")]
        Some(url) => Ok(Repo::Sqlite(SqliteRepo::new(url).await?)),
        #[cfg(not(feature = "sqlite"))]
        Some(url) => anyhow::bail!(
            "DATABASE_URL {} requires the `sqlite` feature of skins-repo",
            url
        ),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Delegation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl SkinRepository for Repo {
    async fn get_skin(&self, id: SkinId) -> Result<Option<Skin>, RepoError> {
        match self {
            Repo::Memory(r) => r.get_skin(id).await,
            #[cfg(feature = "sqlite")]
            Repo::Sqlite(r) => r.get_skin(id).await,
        }
    }

    async fn list_skins(&self) -> Result<Vec<Skin>, RepoError> {
        match self {
            Repo::Memory(r) => r.list_skins().await,
            #[cfg(feature = "sqlite")]
            Repo::Sqlite(r) => r.list_skins().await,
        }
    }
}

#[async_trait]
impl PurchaseRepository for Repo {
    async fn add_purchase(&self, purchase: NewPurchase) -> Result<Purchase, RepoError> {
        match self {
            Repo::Memory(r) => r.add_purchase(purchase).await,
            #[cfg(feature = "sqlite")]
            Repo::Sqlite(r) => r.add_purchase(purchase).await,
        }
    }

    async fn get_purchase(&self, id: PurchaseId) -> Result<Option<Purchase>, RepoError> {
        match self {
            Repo::Memory(r) => r.get_purchase(id).await,
            #[cfg(feature = "sqlite")]
            Repo::Sqlite(r) => r.get_purchase(id).await,
        }
    }

    async fn list_purchases_for_user(&self, user_id: &UserId) -> Result<Vec<Purchase>, RepoError> {
        match self {
            Repo::Memory(r) => r.list_purchases_for_user(user_id).await,
            #[cfg(feature = "sqlite")]
            Repo::Sqlite(r) => r.list_purchases_for_user(user_id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_repo_without_url_is_seeded_memory() {
        let repo = build_repo(None).await.unwrap();
        assert!(matches!(repo, Repo::Memory(_)));
        assert_eq!(repo.list_skins().await.unwrap(), default_catalog());

        let blank = build_repo(Some("  ")).await.unwrap();
        assert!(matches!(blank, Repo::Memory(_)));
    }

    #[cfg(not(feature = "sqlite"))]
    #[tokio::test]
    async fn test_build_repo_with_url_needs_feature() {
        assert!(build_repo(Some("sqlite::memory:")).await.is_err());
    }

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn test_build_repo_with_url_is_sqlite() {
        let repo = build_repo(Some("sqlite::memory:")).await.unwrap();
        assert!(matches!(repo, Repo::Sqlite(_)));
        assert_eq!(repo.list_skins().await.unwrap(), default_catalog());
    }
}
