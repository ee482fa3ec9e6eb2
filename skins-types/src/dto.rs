//! Data Transfer Objects (DTOs) for requests and responses.
//!
//! Field names are camelCase on the wire. No response type carries the
//! buyer's user id.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Purchase, PurchaseId, Skin, SkinId};

// ─────────────────────────────────────────────────────────────────────────────
// Skin DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Catalog entry with the price a buyer would actually pay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkinResponse {
    #[schema(value_type = i64, example = 2)]
    pub id: SkinId,
    #[schema(example = "Rare Skin")]
    pub name: String,
    #[schema(value_type = String, example = "10.00")]
    pub base_price_usd: Decimal,
    /// Price after markdown
    #[schema(value_type = String, example = "9.50")]
    pub final_price_usd: Decimal,
    pub is_available: bool,
}

impl SkinResponse {
    pub fn from_skin(skin: Skin, final_price_usd: Decimal) -> Self {
        Self {
            id: skin.id,
            name: skin.name,
            base_price_usd: skin.base_price_usd,
            final_price_usd,
            is_available: skin.is_available,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Purchase DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request body for buying a skin. The buyer comes from the auth context.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuySkinRequest {
    #[schema(value_type = i64, example = 1)]
    pub skin_id: SkinId,
}

/// A purchase as returned to its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseResponse {
    #[schema(value_type = i64, example = 1)]
    pub id: PurchaseId,
    #[schema(value_type = i64, example = 2)]
    pub skin_id: SkinId,
    #[schema(value_type = String, example = "9.50")]
    pub paid_amount_usd: Decimal,
    /// BTC/USD at purchase time; null when no live quote was available
    #[schema(value_type = Option<String>, example = "65000.00")]
    pub btc_price_at_moment: Option<Decimal>,
    #[schema(value_type = String, example = "2024-01-01T00:00:00Z")]
    pub purchased_at: DateTime<Utc>,
}

impl From<&Purchase> for PurchaseResponse {
    fn from(p: &Purchase) -> Self {
        Self {
            id: p.id(),
            skin_id: p.skin_id(),
            paid_amount_usd: p.paid_amount_usd(),
            btc_price_at_moment: p.rate_snapshot().live(),
            purchased_at: p.purchased_at(),
        }
    }
}

impl From<Purchase> for PurchaseResponse {
    fn from(p: Purchase) -> Self {
        Self::from(&p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewPurchase, RateQuote, UserId};

    #[test]
    fn test_purchase_response_hides_owner_and_sentinel() {
        let purchase = NewPurchase::new(
            SkinId::new(1),
            UserId::new("secret-owner").unwrap(),
            Decimal::new(250, 2),
            RateQuote::Unavailable,
        )
        .into_persisted(PurchaseId::new(9));

        let json = serde_json::to_value(PurchaseResponse::from(&purchase)).unwrap();

        assert_eq!(json["id"], 9);
        assert_eq!(json["skinId"], 1);
        assert!(json["btcPriceAtMoment"].is_null());
        assert!(!json.to_string().contains("secret-owner"));
    }

    #[test]
    fn test_buy_request_camel_case() {
        let req: BuySkinRequest = serde_json::from_str(r#"{"skinId": 2}"#).unwrap();
        assert_eq!(req.skin_id, SkinId::new(2));
    }
}
