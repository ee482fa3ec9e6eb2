//! Skin domain model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::DomainError;

/// Identifier of a skin in the catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct SkinId(i64);

impl SkinId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw integer value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for SkinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SkinId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// A purchasable cosmetic item.
///
/// Skins are owned by the inventory side of the system; purchase code only
/// reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skin {
    pub id: SkinId,
    pub name: String,
    /// Base price in USD, before any markdown.
    pub base_price_usd: Decimal,
    pub is_available: bool,
}

impl Skin {
    /// Creates a skin.
    ///
    /// # Validation
    /// - Name cannot be empty
    /// - Base price cannot be negative
    pub fn new(
        id: SkinId,
        name: impl Into<String>,
        base_price_usd: Decimal,
        is_available: bool,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Skin name cannot be empty".into(),
            ));
        }
        if base_price_usd.is_sign_negative() {
            return Err(DomainError::NegativeAmount);
        }

        Ok(Self {
            id,
            name,
            base_price_usd,
            is_available,
        })
    }

    /// A skin can be bought only while it is flagged available.
    pub fn is_purchasable(&self) -> bool {
        self.is_available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skin_creation() {
        let skin = Skin::new(SkinId::new(1), "Default Skin", Decimal::new(250, 2), true).unwrap();
        assert_eq!(skin.name, "Default Skin");
        assert!(skin.is_purchasable());
    }

    #[test]
    fn test_negative_price_fails() {
        let result = Skin::new(SkinId::new(1), "Broken", Decimal::new(-1, 0), true);
        assert!(matches!(result, Err(DomainError::NegativeAmount)));
    }

    #[test]
    fn test_empty_name_fails() {
        let result = Skin::new(SkinId::new(1), "  ", Decimal::ONE, true);
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[test]
    fn test_skin_id_parse() {
        assert_eq!("42".parse::<SkinId>().unwrap(), SkinId::new(42));
        assert!("abc".parse::<SkinId>().is_err());
    }
}
