//! Purchase Application Service
//!
//! Orchestrates the purchase flow through the repository, rate and pricing
//! ports. Contains NO infrastructure logic - pure business orchestration.

use std::sync::Arc;

use skins_types::{
    AppError, CancellationToken, DomainError, NewPurchase, PriceCalculator, Purchase, PurchaseId,
    PurchaseRepository, RateProvider, Skin, SkinId, SkinRepository, UserId,
};

/// Both repository ports, as one bound.
pub trait StoreRepository: SkinRepository + PurchaseRepository {}

impl<T: SkinRepository + PurchaseRepository> StoreRepository for T {}

/// Application service for purchases.
///
/// Generic over `R: StoreRepository`; the rate and pricing collaborators are
/// trait objects so the rate cache can be shared with other services.
pub struct PurchaseService<R: StoreRepository> {
    repo: Arc<R>,
    pricing: Arc<dyn PriceCalculator>,
    rates: Arc<dyn RateProvider>,
}

impl<R: StoreRepository> PurchaseService<R> {
    pub fn new(
        repo: Arc<R>,
        pricing: Arc<dyn PriceCalculator>,
        rates: Arc<dyn RateProvider>,
    ) -> Self {
        Self {
            repo,
            pricing,
            rates,
        }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Purchase flow
    // ─────────────────────────────────────────────────────────────────────────────

    /// Buys `skin_id` for `user_id`.
    ///
    /// A missing or unavailable skin is rejected before the rate or the price
    /// is requested. Both must succeed before anything is persisted.
    #[tracing::instrument(skip(self, cancel), fields(user_id = %user_id, skin_id = %skin_id))]
    pub async fn buy_skin(
        &self,
        user_id: &UserId,
        skin_id: SkinId,
        cancel: &CancellationToken,
    ) -> Result<Purchase, AppError> {
        let skin = self
            .repo
            .get_skin(skin_id)
            .await?
            .filter(Skin::is_purchasable)
            .ok_or(DomainError::SkinNotPurchasable(skin_id))?;

        let rate = self.rates.get_rate(cancel).await?;
        let final_price = self.pricing.compute_final_price(skin.base_price_usd).await?;
        if !rate.is_available() {
            tracing::warn!("BTC rate unavailable, recording purchase without a rate");
        }

        let purchase = self
            .repo
            .add_purchase(NewPurchase::new(skin.id, user_id.clone(), final_price, rate))
            .await?;

        tracing::info!(
            purchase_id = %purchase.id(),
            paid_usd = %purchase.paid_amount_usd(),
            rate = %rate,
            "purchase completed"
        );
        Ok(purchase)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Read paths
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists the purchases owned by `user_id`, in repository order.
    pub async fn list_user_purchases(&self, user_id: &UserId) -> Result<Vec<Purchase>, AppError> {
        self.repo
            .list_purchases_for_user(user_id)
            .await
            .map_err(Into::into)
    }

    /// Gets a purchase by ID. Does not check ownership.
    pub async fn get_purchase(&self, id: PurchaseId) -> Result<Option<Purchase>, AppError> {
        self.repo.get_purchase(id).await.map_err(Into::into)
    }

    /// Owner of a purchase, for authorization checks only. Never put this in
    /// a response.
    pub async fn get_purchase_owner_id(&self, id: PurchaseId) -> Result<Option<UserId>, AppError> {
        Ok(self
            .repo
            .get_purchase(id)
            .await?
            .map(|p| p.owner_id().clone()))
    }
}
