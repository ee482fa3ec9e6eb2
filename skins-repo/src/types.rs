//! Database row types and their conversion to domain models.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use skins_types::{Purchase, PurchaseId, RepoError, Skin, SkinId, UserId};

fn parse_decimal(column: &str, value: &str) -> Result<Decimal, RepoError> {
    Decimal::from_str(value)
        .map_err(|e| RepoError::Database(format!("invalid {} '{}': {}", column, value, e)))
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, RepoError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepoError::Database(e.to_string()))
}

/// Skin row from database.
#[derive(FromRow)]
pub struct DbSkin {
    pub id: i64,
    pub name: String,
    pub base_price_usd: String,
    pub is_available: bool,
}

impl DbSkin {
    pub fn into_domain(self) -> Result<Skin, RepoError> {
        let price = parse_decimal("base_price_usd", &self.base_price_usd)?;
        Ok(Skin::new(SkinId::new(self.id), self.name, price, self.is_available)?)
    }
}

/// Purchase row from database.
#[derive(FromRow)]
pub struct DbPurchase {
    pub id: i64,
    pub skin_id: i64,
    pub user_id: String,
    pub paid_amount_usd: String,
    pub btc_price_at_moment: String,
    pub purchased_at: String,
}

impl DbPurchase {
    pub fn into_domain(self) -> Result<Purchase, RepoError> {
        Ok(Purchase::from_parts(
            PurchaseId::new(self.id),
            SkinId::new(self.skin_id),
            UserId::new(self.user_id)?,
            parse_decimal("paid_amount_usd", &self.paid_amount_usd)?,
            parse_decimal("btc_price_at_moment", &self.btc_price_at_moment)?,
            parse_timestamp(&self.purchased_at)?,
        ))
    }
}
