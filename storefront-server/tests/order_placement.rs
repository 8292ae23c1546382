//! Order placement core behavior: all-or-nothing transaction, stock
//! floor, price snapshots and cart clearing.

mod common;

use common::*;
use storefront_server::db::{self, inventory, orders};
use storefront_server::db::models::{OrderStatus, OrderUpdate};
use storefront_server::orders::{place_order, PlacementError};

#[tokio::test]
async fn placing_an_order_reserves_stock_and_clears_cart() {
    let (_dir, pool) = test_pool().await;
    let user_id = seed_user(&pool, "buyer@example.com").await;
    let coffee = seed_product(&pool, "Coffee", 5, 10).await;
    let mug = seed_product(&pool, "Mug", 10, 4).await;

    add_to_cart(&pool, user_id, coffee, 3).await;
    add_to_cart(&pool, user_id, mug, 1).await;

    let placed = place_order(&pool, user_id, &delivery()).await.unwrap();

    // 3 * 5 + 1 * 10
    assert_eq!(placed.total_amount, 25);
    assert_eq!(stock_of(&pool, coffee).await, 7);
    assert_eq!(stock_of(&pool, mug).await, 3);
    assert_eq!(cart_len(&pool, user_id).await, 0);

    let order = orders::find_by_id(&pool, placed.order_id).await.unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_amount, 25);
    assert_eq!(order.user_id, user_id);

    let items = orders::items_for_order(&pool, placed.order_id).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].product_id, coffee);
    assert_eq!(items[0].quantity, 3);
    assert_eq!(items[0].price, 5);
}

#[tokio::test]
async fn empty_cart_places_no_order() {
    let (_dir, pool) = test_pool().await;
    let user_id = seed_user(&pool, "buyer@example.com").await;

    let err = place_order(&pool, user_id, &delivery()).await.unwrap_err();
    assert!(matches!(err, PlacementError::EmptyCart));
    assert_eq!(order_count(&pool).await, 0);
}

#[tokio::test]
async fn insufficient_stock_rolls_back_everything() {
    let (_dir, pool) = test_pool().await;
    let user_id = seed_user(&pool, "buyer@example.com").await;
    let coffee = seed_product(&pool, "Coffee", 5, 2).await;

    add_to_cart(&pool, user_id, coffee, 5).await;

    let err = place_order(&pool, user_id, &delivery()).await.unwrap_err();
    match err {
        PlacementError::InsufficientStock {
            product_id,
            requested,
            available,
        } => {
            assert_eq!(product_id, coffee);
            assert_eq!(requested, 5);
            assert_eq!(available, 2);
        }
        other => panic!("expected InsufficientStock, got {other:?}"),
    }

    // Nothing committed: no order, stock untouched, cart intact
    assert_eq!(order_count(&pool).await, 0);
    assert_eq!(stock_of(&pool, coffee).await, 2);
    assert_eq!(cart_len(&pool, user_id).await, 1);
}

#[tokio::test]
async fn failing_line_rolls_back_earlier_lines() {
    let (_dir, pool) = test_pool().await;
    let user_id = seed_user(&pool, "buyer@example.com").await;
    let coffee = seed_product(&pool, "Coffee", 5, 10).await;
    let mug = seed_product(&pool, "Mug", 10, 1).await;

    // First line fits, second does not
    add_to_cart(&pool, user_id, coffee, 2).await;
    add_to_cart(&pool, user_id, mug, 3).await;

    let err = place_order(&pool, user_id, &delivery()).await.unwrap_err();
    assert!(matches!(err, PlacementError::InsufficientStock { .. }));

    assert_eq!(order_count(&pool).await, 0);
    assert_eq!(stock_of(&pool, coffee).await, 10);
    assert_eq!(stock_of(&pool, mug).await, 1);
    assert_eq!(cart_len(&pool, user_id).await, 2);
}

#[tokio::test]
async fn dropped_transaction_leaves_no_trace() {
    let (_dir, pool) = test_pool().await;
    let user_id = seed_user(&pool, "buyer@example.com").await;
    let coffee = seed_product(&pool, "Coffee", 5, 10).await;

    {
        let mut tx = pool.begin().await.unwrap();
        let order_id = orders::insert_pending(
            &mut *tx,
            user_id,
            "79990001122",
            "US",
            "Springfield",
            "742 Evergreen Terrace",
        )
        .await
        .unwrap();
        orders::insert_item(&mut *tx, order_id, coffee, 2, 5).await.unwrap();
        inventory::reserve(&mut *tx, coffee, 2).await.unwrap();
        // Dropped without commit
    }

    assert_eq!(order_count(&pool).await, 0);
    assert_eq!(stock_of(&pool, coffee).await, 10);
}

#[tokio::test]
async fn order_total_survives_later_price_change() {
    let (_dir, pool) = test_pool().await;
    let user_id = seed_user(&pool, "buyer@example.com").await;
    let coffee = seed_product(&pool, "Coffee", 5, 10).await;

    add_to_cart(&pool, user_id, coffee, 2).await;
    let placed = place_order(&pool, user_id, &delivery()).await.unwrap();
    assert_eq!(placed.total_amount, 10);

    // Price hike after the sale
    let update = storefront_server::db::models::ProductUpdate {
        price: Some(50),
        ..Default::default()
    };
    db::catalog::update_product(&pool, coffee, &update).await.unwrap();

    let order = orders::find_by_id(&pool, placed.order_id).await.unwrap().unwrap();
    assert_eq!(order.total_amount, 10);
    let items = orders::items_for_order(&pool, placed.order_id).await.unwrap();
    assert_eq!(items[0].price, 5);
}

#[tokio::test]
async fn concurrent_reservations_never_oversell() {
    let (_dir, pool) = test_pool().await;
    let coffee = seed_product(&pool, "Coffee", 5, 3).await;

    let mut handles = Vec::new();
    for _ in 0..5 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            let mut conn = pool.acquire().await.unwrap();
            inventory::reserve(&mut *conn, coffee, 1).await.is_ok()
        }));
    }

    let mut succeeded = 0;
    for handle in handles {
        if handle.await.unwrap() {
            succeeded += 1;
        }
    }

    assert_eq!(succeeded, 3);
    assert_eq!(stock_of(&pool, coffee).await, 0);
}

#[tokio::test]
async fn concurrent_placements_for_last_unit_yield_one_order() {
    let (_dir, pool) = test_pool().await;

    // Repeated rounds so the two placements actually collide sometimes.
    // Whatever the interleaving, the loser must see the stock error, not a
    // storage failure.
    for round in 0..10 {
        let alice = seed_user(&pool, &format!("alice{round}@example.com")).await;
        let bob = seed_user(&pool, &format!("bob{round}@example.com")).await;
        let coffee = seed_product(&pool, "Coffee", 5, 1).await;

        add_to_cart(&pool, alice, coffee, 1).await;
        add_to_cart(&pool, bob, coffee, 1).await;

        let pool_a = pool.clone();
        let pool_b = pool.clone();
        let a = tokio::spawn(async move { place_order(&pool_a, alice, &delivery()).await });
        let b = tokio::spawn(async move { place_order(&pool_b, bob, &delivery()).await });

        let results = [a.await.unwrap(), b.await.unwrap()];
        let succeeded = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(succeeded, 1);
        assert_eq!(stock_of(&pool, coffee).await, 0);

        let loser = results
            .into_iter()
            .find(Result::is_err)
            .unwrap()
            .unwrap_err();
        match loser {
            PlacementError::InsufficientStock {
                product_id,
                requested,
                available,
            } => {
                assert_eq!(product_id, coffee);
                assert_eq!(requested, 1);
                assert_eq!(available, 0);
            }
            other => panic!("loser should see an insufficient-stock error, got {other:?}"),
        }
    }

    assert_eq!(order_count(&pool).await, 10);
}

#[tokio::test]
async fn admin_update_changes_only_provided_fields() {
    let (_dir, pool) = test_pool().await;
    let user_id = seed_user(&pool, "buyer@example.com").await;
    let coffee = seed_product(&pool, "Coffee", 5, 10).await;
    add_to_cart(&pool, user_id, coffee, 1).await;
    let placed = place_order(&pool, user_id, &delivery()).await.unwrap();

    let update = OrderUpdate {
        status: Some(OrderStatus::Shipped),
        ..Default::default()
    };
    let order = orders::update_fields(&pool, placed.order_id, &update).await.unwrap();

    assert_eq!(order.status, OrderStatus::Shipped);
    // Delivery fields untouched
    assert_eq!(order.city, "Springfield");
    assert_eq!(order.address, "742 Evergreen Terrace");
}

#[tokio::test]
async fn updating_a_missing_order_is_not_found() {
    let (_dir, pool) = test_pool().await;
    let update = OrderUpdate {
        status: Some(OrderStatus::Canceled),
        ..Default::default()
    };
    let err = orders::update_fields(&pool, 999, &update).await.unwrap_err();
    assert!(matches!(err, storefront_server::AppError::NotFound(_)));
}

#[tokio::test]
async fn repeated_cart_adds_accumulate() {
    let (_dir, pool) = test_pool().await;
    let user_id = seed_user(&pool, "buyer@example.com").await;
    let coffee = seed_product(&pool, "Coffee", 5, 10).await;

    add_to_cart(&pool, user_id, coffee, 2).await;
    add_to_cart(&pool, user_id, coffee, 3).await;

    let mut conn = pool.acquire().await.unwrap();
    let lines = db::cart::lines_for_user(&mut *conn, user_id).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 5);
}
