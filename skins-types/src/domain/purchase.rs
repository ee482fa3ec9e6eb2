//! Purchase domain model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::rate::RateQuote;
use super::skin::SkinId;
use crate::error::DomainError;

/// Identifier of a persisted purchase. Assigned by the repository.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct PurchaseId(i64);

impl PurchaseId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PurchaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PurchaseId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Opaque identifier of the buyer, as supplied by the authentication layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a user id.
    ///
    /// # Validation
    /// - Cannot be empty or whitespace
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::ValidationError("User id cannot be empty".into()));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A purchase that has been priced but not yet stored.
///
/// Handed to [`crate::ports::PurchaseRepository::add_purchase`], which assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPurchase {
    skin_id: SkinId,
    user_id: UserId,
    paid_amount_usd: Decimal,
    btc_price_at_moment: Decimal,
    purchased_at: DateTime<Utc>,
}

impl NewPurchase {
    /// Builds a purchase record stamped with the current UTC time.
    pub fn new(skin_id: SkinId, user_id: UserId, paid_amount_usd: Decimal, rate: RateQuote) -> Self {
        Self::at(skin_id, user_id, paid_amount_usd, rate, Utc::now())
    }

    /// Builds a purchase record with an explicit timestamp.
    pub fn at(
        skin_id: SkinId,
        user_id: UserId,
        paid_amount_usd: Decimal,
        rate: RateQuote,
        purchased_at: DateTime<Utc>,
    ) -> Self {
        Self {
            skin_id,
            user_id,
            paid_amount_usd,
            btc_price_at_moment: rate.as_decimal(),
            purchased_at,
        }
    }

    pub fn skin_id(&self) -> SkinId {
        self.skin_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn paid_amount_usd(&self) -> Decimal {
        self.paid_amount_usd
    }

    pub fn btc_price_at_moment(&self) -> Decimal {
        self.btc_price_at_moment
    }

    pub fn purchased_at(&self) -> DateTime<Utc> {
        self.purchased_at
    }

    /// Attaches the repository-assigned id, producing the stored record.
    pub fn into_persisted(self, id: PurchaseId) -> Purchase {
        Purchase {
            id,
            skin_id: self.skin_id,
            user_id: self.user_id,
            paid_amount_usd: self.paid_amount_usd,
            btc_price_at_moment: self.btc_price_at_moment,
            purchased_at: self.purchased_at,
        }
    }
}

/// A stored purchase.
///
/// Immutable once created: there are no setters, and the rate is a snapshot
/// taken at purchase time.
#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    id: PurchaseId,
    skin_id: SkinId,
    user_id: UserId,
    paid_amount_usd: Decimal,
    btc_price_at_moment: Decimal,
    purchased_at: DateTime<Utc>,
}

impl Purchase {
    /// Reconstructs a purchase from database fields.
    pub fn from_parts(
        id: PurchaseId,
        skin_id: SkinId,
        user_id: UserId,
        paid_amount_usd: Decimal,
        btc_price_at_moment: Decimal,
        purchased_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            skin_id,
            user_id,
            paid_amount_usd,
            btc_price_at_moment,
            purchased_at,
        }
    }

    pub fn id(&self) -> PurchaseId {
        self.id
    }

    pub fn skin_id(&self) -> SkinId {
        self.skin_id
    }

    /// The owning user. Used for authorization only; never serialized to clients.
    pub fn owner_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn paid_amount_usd(&self) -> Decimal {
        self.paid_amount_usd
    }

    /// Raw stored rate, `-1` when the quote was unavailable.
    pub fn btc_price_at_moment(&self) -> Decimal {
        self.btc_price_at_moment
    }

    /// The stored rate interpreted as a quote.
    pub fn rate_snapshot(&self) -> RateQuote {
        RateQuote::from_decimal(self.btc_price_at_moment)
    }

    pub fn purchased_at(&self) -> DateTime<Utc> {
        self.purchased_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[test]
    fn test_new_purchase_keeps_rate_snapshot() {
        let rate = RateQuote::Live(Decimal::new(6_500_000, 2));
        let new = NewPurchase::new(SkinId::new(2), user("7"), Decimal::new(950, 2), rate);
        let purchase = new.into_persisted(PurchaseId::new(1));

        assert_eq!(purchase.id(), PurchaseId::new(1));
        assert_eq!(purchase.skin_id(), SkinId::new(2));
        assert_eq!(purchase.owner_id(), &user("7"));
        assert_eq!(purchase.paid_amount_usd(), Decimal::new(950, 2));
        assert_eq!(purchase.rate_snapshot(), rate);
    }

    #[test]
    fn test_unavailable_rate_is_stored_as_sentinel() {
        let new = NewPurchase::new(SkinId::new(1), user("a"), Decimal::ONE, RateQuote::Unavailable);
        assert_eq!(new.btc_price_at_moment(), Decimal::NEGATIVE_ONE);

        let purchase = new.into_persisted(PurchaseId::new(3));
        assert_eq!(purchase.rate_snapshot(), RateQuote::Unavailable);
    }

    #[test]
    fn test_empty_user_id_rejected() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("   ").is_err());
        assert_eq!(user("alice").as_str(), "alice");
    }
}
