use super::*;

#[tokio::test]
async fn test_approve_reserves_stock_and_records() {
    let (db, coordinator) = setup().await;
    let product_id = seed_product(&db, "Tee", 5).await;
    let order = seed_order(&db, vec![line_item(&product_id, 2)]).await;
    let order_id = order.id.as_deref().unwrap();

    let updated = coordinator
        .update_status(&staff_ctx(), order_id, OrderStatus::Approved, None)
        .await
        .unwrap();

    assert_eq!(updated.status, OrderStatus::Approved);
    assert!(updated.updated_at >= order.updated_at);
    assert_eq!(product_stock(&db, &product_id).await, 3);

    // History grew by one entry and ends at the new status
    let last = updated.status_history.last().unwrap();
    assert_eq!(last.status, OrderStatus::Approved);
    assert_eq!(last.updated_by, STAFF);

    // One status_change activity, newest first
    let activities = order_activities(&db, &updated).await;
    assert_eq!(activities.len(), 1);
    assert_eq!(activities[0].old_value.as_deref(), Some("pending"));
    assert_eq!(activities[0].new_value.as_deref(), Some("approved"));

    // Staff acted, so the customer is notified
    let notifications = customer_notifications(&db).await;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].receiver_id, CUSTOMER);
    assert!(!notifications[0].read);
}

#[tokio::test]
async fn test_invalid_transition_rejected() {
    let (db, coordinator) = setup().await;
    let product_id = seed_product(&db, "Tee", 5).await;
    let order = seed_order(&db, vec![line_item(&product_id, 2)]).await;
    let order_id = order.id.as_deref().unwrap();

    let err = coordinator
        .update_status(&staff_ctx(), order_id, OrderStatus::Shipped, None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        FlowError::InvalidTransition {
            from: OrderStatus::Pending,
            to: OrderStatus::Shipped,
        }
    ));

    // Nothing moved
    assert_eq!(product_stock(&db, &product_id).await, 5);
    let reloaded = OrderRepository::new(db.clone())
        .find_by_id(order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.status, OrderStatus::Pending);
    assert!(order_activities(&db, &order).await.is_empty());
}

#[tokio::test]
async fn test_unknown_order_is_not_found() {
    let (_db, coordinator) = setup().await;

    let err = coordinator
        .update_status(&staff_ctx(), "rdoesnotexist", OrderStatus::Approved, None)
        .await
        .unwrap_err();

    assert!(matches!(err, FlowError::OrderNotFound(_)));
}

#[tokio::test]
async fn test_repeating_current_status_is_invalid() {
    let (db, coordinator) = setup().await;
    let product_id = seed_product(&db, "Tee", 5).await;
    let order = seed_order(&db, vec![line_item(&product_id, 2)]).await;
    let order_id = order.id.as_deref().unwrap();

    coordinator
        .update_status(&staff_ctx(), order_id, OrderStatus::Approved, None)
        .await
        .unwrap();

    // Same target again: rejected, not silently accepted
    let err = coordinator
        .update_status(&staff_ctx(), order_id, OrderStatus::Approved, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        FlowError::InvalidTransition {
            from: OrderStatus::Approved,
            to: OrderStatus::Approved,
        }
    ));

    // The reservation was not applied twice
    assert_eq!(product_stock(&db, &product_id).await, 3);
}

#[tokio::test]
async fn test_customer_acting_on_own_order_gets_no_notification() {
    let (db, coordinator) = setup().await;
    let product_id = seed_product(&db, "Tee", 5).await;
    let order = seed_order(&db, vec![line_item(&product_id, 2)]).await;
    let order_id = order.id.as_deref().unwrap();

    coordinator
        .update_status(&customer_ctx(), order_id, OrderStatus::Cancelled, None)
        .await
        .unwrap();

    // Audit entry yes, self-notification no
    assert_eq!(order_activities(&db, &order).await.len(), 1);
    assert!(customer_notifications(&db).await.is_empty());
}

#[tokio::test]
async fn test_foreign_store_order_is_invisible() {
    let (db, coordinator) = setup().await;
    let product_id = seed_product(&db, "Tee", 5).await;
    let order = seed_order(&db, vec![line_item(&product_id, 2)]).await;
    let order_id = order.id.as_deref().unwrap();

    let foreign = RequestContext::new("store_other", STAFF);
    let err = coordinator
        .update_status(&foreign, order_id, OrderStatus::Approved, None)
        .await
        .unwrap_err();

    assert!(matches!(err, FlowError::OrderNotFound(_)));
    assert_eq!(product_stock(&db, &product_id).await, 5);
}

#[tokio::test]
async fn test_reason_lands_in_history_and_notes() {
    let (db, coordinator) = setup().await;
    let product_id = seed_product(&db, "Tee", 5).await;
    let order = seed_order(&db, vec![line_item(&product_id, 1)]).await;
    let order_id = order.id.as_deref().unwrap();

    let updated = coordinator
        .update_status(
            &staff_ctx(),
            order_id,
            OrderStatus::Rejected,
            Some("Payment verification failed".into()),
        )
        .await
        .unwrap();

    assert_eq!(updated.notes.as_deref(), Some("Payment verification failed"));
    assert_eq!(
        updated.status_history.last().unwrap().note.as_deref(),
        Some("Payment verification failed")
    );
}
