//! Price calculator adapter.

use async_trait::async_trait;
use rust_decimal::{Decimal, RoundingStrategy};

use skins_types::{DomainError, PriceCalculator, PricingError};

/// Applies a flat percentage markdown to the base price.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownPriceCalculator {
    discount_percent: Decimal,
}

impl MarkdownPriceCalculator {
    /// Creates a calculator. `discount_percent` must lie in `0..=100`.
    pub fn new(discount_percent: Decimal) -> Result<Self, DomainError> {
        if discount_percent < Decimal::ZERO || discount_percent > Decimal::ONE_HUNDRED {
            return Err(DomainError::ValidationError(format!(
                "discount must be between 0 and 100, got {}",
                discount_percent
            )));
        }
        Ok(Self { discount_percent })
    }

    /// A calculator that charges the base price.
    pub fn no_discount() -> Self {
        Self {
            discount_percent: Decimal::ZERO,
        }
    }

    pub fn discount_percent(&self) -> Decimal {
        self.discount_percent
    }
}

#[async_trait]
impl PriceCalculator for MarkdownPriceCalculator {
    async fn compute_final_price(&self, base_price_usd: Decimal) -> Result<Decimal, PricingError> {
        if base_price_usd.is_sign_negative() {
            return Err(DomainError::NegativeAmount.into());
        }
        let factor = Decimal::ONE_HUNDRED - self.discount_percent;
        let mut price = base_price_usd
            .checked_mul(factor)
            .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
            .ok_or_else(|| {
                DomainError::ValidationError(format!(
                    "base price {} is too large to price",
                    base_price_usd
                ))
            })?
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        // Always two places on the wire: "9.50", not "9.5".
        price.rescale(2);
        Ok(price)
    }
}
