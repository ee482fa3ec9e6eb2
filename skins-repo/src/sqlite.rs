//! SQLite repository adapter.
//!
//! Decimals are stored as TEXT so prices and rates survive the round trip
//! exactly; timestamps are RFC 3339 strings.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use skins_types::{
    NewPurchase, Purchase, PurchaseId, PurchaseRepository, RepoError, Skin, SkinId,
    SkinRepository, UserId,
};

use crate::types::{DbPurchase, DbSkin};

const MIGRATIONS: [&str; 2] = [
    include_str!("../migrations/0001_create_tables.sql"),
    include_str!("../migrations/0002_seed_skins.sql"),
];

fn db_err(e: sqlx::Error) -> RepoError {
    RepoError::Database(e.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository, creating the schema and seeding the
    /// catalog if needed.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let in_memory = database_url.contains(":memory:");

        // Ensure on-disk SQLite target directory exists.
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if !in_memory {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // Every connection to `:memory:` opens its own database.
        let pool = SqlitePoolOptions::new()
            .max_connections(if in_memory { 1 } else { 5 })
            .connect_with(options)
            .await?;

        let repo = Self { pool };
        repo.migrate().await?;
        tracing::info!(in_memory, "sqlite repository ready");
        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Applies the bundled migrations. Safe to run repeatedly.
    pub async fn migrate(&self) -> Result<(), RepoError> {
        for ddl in MIGRATIONS {
            sqlx::raw_sql(ddl).execute(&self.pool).await.map_err(db_err)?;
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SkinRepository
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl SkinRepository for SqliteRepo {
    async fn get_skin(&self, id: SkinId) -> Result<Option<Skin>, RepoError> {
        let row = sqlx::query_as::<_, DbSkin>(
            "SELECT id, name, base_price_usd, is_available FROM skins WHERE id = ?",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(DbSkin::into_domain).transpose()
    }

    async fn list_skins(&self) -> Result<Vec<Skin>, RepoError> {
        let rows = sqlx::query_as::<_, DbSkin>(
            "SELECT id, name, base_price_usd, is_available FROM skins ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(DbSkin::into_domain).collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PurchaseRepository
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl PurchaseRepository for SqliteRepo {
    async fn add_purchase(&self, purchase: NewPurchase) -> Result<Purchase, RepoError> {
        let result = sqlx::query(
            r#"
            INSERT INTO purchases
                (skin_id, user_id, paid_amount_usd, btc_price_at_moment, purchased_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(purchase.skin_id().value())
        .bind(purchase.user_id().as_str())
        .bind(purchase.paid_amount_usd().to_string())
        .bind(purchase.btc_price_at_moment().to_string())
        .bind(purchase.purchased_at().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        let id = PurchaseId::new(result.last_insert_rowid());
        tracing::debug!(purchase_id = %id, skin_id = %purchase.skin_id(), "purchase stored");
        Ok(purchase.into_persisted(id))
    }

    async fn get_purchase(&self, id: PurchaseId) -> Result<Option<Purchase>, RepoError> {
        let row = sqlx::query_as::<_, DbPurchase>(
            r#"
            SELECT id, skin_id, user_id, paid_amount_usd, btc_price_at_moment, purchased_at
            FROM purchases WHERE id = ?
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(DbPurchase::into_domain).transpose()
    }

    async fn list_purchases_for_user(&self, user_id: &UserId) -> Result<Vec<Purchase>, RepoError> {
        let rows = sqlx::query_as::<_, DbPurchase>(
            r#"
            SELECT id, skin_id, user_id, paid_amount_usd, btc_price_at_moment, purchased_at
            FROM purchases WHERE user_id = ?
            ORDER BY id
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(DbPurchase::into_domain).collect()
    }
}
