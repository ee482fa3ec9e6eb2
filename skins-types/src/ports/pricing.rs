//! Price calculator port.

use rust_decimal::Decimal;

use crate::error::PricingError;

/// Turns a skin's base price into the price the buyer pays.
#[async_trait::async_trait]
pub trait PriceCalculator: Send + Sync {
    async fn compute_final_price(&self, base_price_usd: Decimal) -> Result<Decimal, PricingError>;
}
