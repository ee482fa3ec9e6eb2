//! SQLite repository integration tests.

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use skins_types::{
        NewPurchase, PurchaseId, PurchaseRepository, RateQuote, SkinId, SkinRepository, UserId,
    };

    use crate::SqliteRepo;

    async fn setup_repo() -> SqliteRepo {
        SqliteRepo::new("sqlite::memory:").await.unwrap()
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn test_catalog_is_seeded() {
        let repo = setup_repo().await;

        let skins = repo.list_skins().await.unwrap();

        assert_eq!(skins.len(), 2);
        assert_eq!(skins[0].id, SkinId::new(1));
        assert_eq!(skins[0].base_price_usd, Decimal::new(250, 2));
        assert_eq!(skins[1].name, "Rare Skin");
        assert!(skins.iter().all(|s| s.is_available));
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let repo = setup_repo().await;
        repo.migrate().await.unwrap();

        assert_eq!(repo.list_skins().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_skin_not_found() {
        let repo = setup_repo().await;

        assert!(repo.get_skin(SkinId::new(42)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_purchase_round_trip_keeps_exact_values() {
        let repo = setup_repo().await;
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let new = NewPurchase::at(
            SkinId::new(2),
            user("alice"),
            Decimal::new(950, 2),
            RateQuote::Live(Decimal::new(6_500_012, 2)),
            at,
        );

        let stored = repo.add_purchase(new).await.unwrap();
        let fetched = repo.get_purchase(stored.id()).await.unwrap().unwrap();

        assert_eq!(fetched, stored);
        assert_eq!(fetched.paid_amount_usd(), Decimal::new(950, 2));
        assert_eq!(fetched.btc_price_at_moment(), Decimal::new(6_500_012, 2));
        assert_eq!(fetched.purchased_at(), at);
    }

    #[tokio::test]
    async fn test_unavailable_rate_is_stored_as_sentinel() {
        let repo = setup_repo().await;
        let new = NewPurchase::new(
            SkinId::new(1),
            user("bob"),
            Decimal::new(250, 2),
            RateQuote::Unavailable,
        );

        let stored = repo.add_purchase(new).await.unwrap();
        let fetched = repo.get_purchase(stored.id()).await.unwrap().unwrap();

        assert_eq!(fetched.btc_price_at_moment(), Decimal::NEGATIVE_ONE);
        assert_eq!(fetched.rate_snapshot(), RateQuote::Unavailable);
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let repo = setup_repo().await;
        let mk = || {
            NewPurchase::new(
                SkinId::new(1),
                user("carol"),
                Decimal::new(250, 2),
                RateQuote::Unavailable,
            )
        };

        let a = repo.add_purchase(mk()).await.unwrap();
        let b = repo.add_purchase(mk()).await.unwrap();

        assert_eq!(a.id(), PurchaseId::new(1));
        assert_eq!(b.id(), PurchaseId::new(2));
    }

    #[tokio::test]
    async fn test_list_purchases_for_user_is_isolated() {
        let repo = setup_repo().await;
        for (skin, owner) in [(1, "alice"), (2, "bob"), (2, "alice")] {
            let new = NewPurchase::new(
                SkinId::new(skin),
                user(owner),
                Decimal::new(100, 2),
                RateQuote::Unavailable,
            );
            repo.add_purchase(new).await.unwrap();
        }

        let alice = repo.list_purchases_for_user(&user("alice")).await.unwrap();
        let skins: Vec<i64> = alice.iter().map(|p| p.skin_id().value()).collect();
        assert_eq!(skins, vec![1, 2]);

        let nobody = repo.list_purchases_for_user(&user("dave")).await.unwrap();
        assert!(nobody.is_empty());
    }
}
