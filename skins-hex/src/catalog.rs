//! Skin catalog service: read-only views with the current sale price.

use std::sync::Arc;

use skins_types::{AppError, PriceCalculator, SkinId, SkinRepository, SkinResponse};

pub struct SkinService<R: SkinRepository> {
    repo: Arc<R>,
    pricing: Arc<dyn PriceCalculator>,
}

impl<R: SkinRepository> SkinService<R> {
    pub fn new(repo: Arc<R>, pricing: Arc<dyn PriceCalculator>) -> Self {
        Self { repo, pricing }
    }

    /// Lists every skin, available or not.
    pub async fn list_skins(&self) -> Result<Vec<SkinResponse>, AppError> {
        let skins = self.repo.list_skins().await?;
        let mut out = Vec::with_capacity(skins.len());
        for skin in skins {
            let final_price = self.pricing.compute_final_price(skin.base_price_usd).await?;
            out.push(SkinResponse::from_skin(skin, final_price));
        }
        Ok(out)
    }

    pub async fn get_skin(&self, id: SkinId) -> Result<SkinResponse, AppError> {
        let skin = self
            .repo
            .get_skin(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Skin with ID {} not found", id)))?;
        let final_price = self.pricing.compute_final_price(skin.base_price_usd).await?;
        Ok(SkinResponse::from_skin(skin, final_price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MarkdownPriceCalculator;
    use rust_decimal::Decimal;
    use skins_repo::InMemoryRepo;

    fn service(pct: i64) -> SkinService<InMemoryRepo> {
        let pricing = MarkdownPriceCalculator::new(Decimal::from(pct)).unwrap();
        SkinService::new(Arc::new(InMemoryRepo::seeded()), Arc::new(pricing))
    }

    #[tokio::test]
    async fn test_list_applies_markdown() {
        let skins = service(10).list_skins().await.unwrap();

        assert_eq!(skins.len(), 2);
        assert_eq!(skins[0].final_price_usd, Decimal::new(225, 2));
        assert_eq!(skins[1].base_price_usd, Decimal::new(1000, 2));
        assert_eq!(skins[1].final_price_usd, Decimal::new(900, 2));
    }

    #[tokio::test]
    async fn test_get_missing_skin_is_not_found() {
        let err = service(0).get_skin(SkinId::new(7)).await.unwrap_err();
        match err {
            AppError::NotFound(msg) => assert_eq!(msg, "Skin with ID 7 not found"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
