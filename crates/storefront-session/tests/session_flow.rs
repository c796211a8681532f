//! End-to-end shopping session driven the way the shell drives it.

use storefront_session::*;

fn bulk_config() -> StoreConfig {
    StoreConfig::from_toml(
        r#"
        [store]
        name = "Test Mart"

        [pricing]
        bulk_threshold = 10
        bulk_bonus_rate = 0.05
        "#,
    )
    .unwrap()
}

#[test]
fn bulk_bonus_stacks_with_tiers_and_coupon() {
    let mut store = Storefront::with_defaults(bulk_config(), MemorySink::new());

    store.add_to_cart("p1");
    store.update_quantity("p1", 10);
    store.add_to_cart("p2");

    // p1: 10% tier combined with the 5% bulk bonus; p2: bulk bonus only.
    assert_eq!(store.item_discount_rate("p1").unwrap().bps(), 1_450);
    assert_eq!(store.item_discount_rate("p2").unwrap().bps(), 500);

    let view = store.refresh();
    assert_eq!(view.totals.subtotal.minor(), 120_000);
    assert_eq!(view.totals.after_item_discount.minor(), 104_500);
    assert_eq!(view.totals.discounted_item_count, 2);

    let view = store.select_coupon("PERCENT10");
    assert_eq!(view.totals.total.minor(), 94_050);
    assert!(view.advisory.is_none());
    assert_eq!(store.total_item_count(), 11);
}

#[test]
fn amount_coupon_never_drives_total_negative() {
    let mut store = Storefront::with_defaults(StoreConfig::default(), MemorySink::new());
    store
        .add_product(NewProduct {
            name: "Sticker".into(),
            price: storefront_core::Money::from_minor(300),
            stock: 10,
            discounts: vec![],
            description: None,
            is_recommended: false,
        })
        .unwrap();
    let sticker = store.search_products("sticker").unwrap()[0].id.clone();

    store.add_to_cart(&sticker);
    let view = store.select_coupon("amount5000");

    assert_eq!(view.totals.total.minor(), 0);
    assert_eq!(view.totals.total_discount.minor(), 300);
}

#[test]
fn notifications_follow_every_operation() {
    let mut store = Storefront::with_defaults(StoreConfig::default(), MemorySink::new());

    store.add_to_cart("p3");
    store.update_quantity("p3", 25);
    store.update_quantity("p3", 0);
    store.complete_order();

    let notes = store.sink_mut().drain();
    let codes: Vec<&str> = notes.iter().map(|n| n.code.as_str()).collect();
    assert_eq!(
        codes,
        vec!["added", "exceeds_stock", "removed", "order_completed"]
    );
    assert_eq!(notes[1].level, NotificationLevel::Error);
}
