use super::*;

#[tokio::test]
async fn test_full_lifecycle_to_completed() {
    let (db, coordinator) = setup().await;
    let product_id = seed_product(&db, "Tee", 5).await;
    let order = seed_order(&db, vec![line_item(&product_id, 2)]).await;
    let order_id = order.id.as_deref().unwrap();

    let finished = advance(
        &coordinator,
        &staff_ctx(),
        order_id,
        &[
            OrderStatus::Approved,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Completed,
        ],
    )
    .await;

    assert_eq!(finished.status, OrderStatus::Completed);
    // Reserved once at approval, never restored along the happy path
    assert_eq!(product_stock(&db, &product_id).await, 3);

    // Full history: pending + five transitions
    let statuses: Vec<OrderStatus> =
        finished.status_history.iter().map(|e| e.status).collect();
    assert_eq!(
        statuses,
        vec![
            OrderStatus::Pending,
            OrderStatus::Approved,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Completed,
        ]
    );

    // Completed is terminal
    let err = coordinator
        .update_status(&staff_ctx(), order_id, OrderStatus::Returned, None)
        .await
        .unwrap_err();
    assert!(matches!(err, FlowError::InvalidTransition { .. }));
}

#[tokio::test]
async fn test_cancel_after_processing_restores_and_terminates() {
    let (db, coordinator) = setup().await;
    let product_id = seed_product(&db, "Tee", 5).await;
    let order = seed_order(&db, vec![line_item(&product_id, 2)]).await;
    let order_id = order.id.as_deref().unwrap();

    advance(
        &coordinator,
        &staff_ctx(),
        order_id,
        &[
            OrderStatus::Approved,
            OrderStatus::Processing,
            OrderStatus::Cancelled,
        ],
    )
    .await;

    assert_eq!(product_stock(&db, &product_id).await, 5);

    // Cancelled admits nothing further
    let err = coordinator
        .update_status(&staff_ctx(), order_id, OrderStatus::Processing, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        FlowError::InvalidTransition {
            from: OrderStatus::Cancelled,
            to: OrderStatus::Processing,
        }
    ));
}

#[tokio::test]
async fn test_return_after_delivery_restores_then_refunds() {
    let (db, coordinator) = setup().await;
    let product_id = seed_product(&db, "Tee", 5).await;
    let order = seed_order(&db, vec![line_item(&product_id, 2)]).await;
    let order_id = order.id.as_deref().unwrap();

    advance(
        &coordinator,
        &staff_ctx(),
        order_id,
        &[
            OrderStatus::Approved,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Returned,
        ],
    )
    .await;

    // The return put the reservation back
    assert_eq!(product_stock(&db, &product_id).await, 5);

    // Refunding moves no stock
    let refunded = coordinator
        .update_status(&staff_ctx(), order_id, OrderStatus::Refunded, None)
        .await
        .unwrap();
    assert_eq!(refunded.status, OrderStatus::Refunded);
    assert_eq!(product_stock(&db, &product_id).await, 5);
    assert!(refunded.status.is_terminal());
}

#[tokio::test]
async fn test_rejection_from_pending_moves_no_stock() {
    let (db, coordinator) = setup().await;
    let product_id = seed_product(&db, "Tee", 5).await;
    let order = seed_order(&db, vec![line_item(&product_id, 2)]).await;
    let order_id = order.id.as_deref().unwrap();

    // Nothing was reserved yet, so nothing is restored
    coordinator
        .update_status(&staff_ctx(), order_id, OrderStatus::Rejected, None)
        .await
        .unwrap();
    assert_eq!(product_stock(&db, &product_id).await, 5);
}

#[tokio::test]
async fn test_payment_and_delivery_flags_leave_status_alone() {
    let (db, coordinator) = setup().await;
    let product_id = seed_product(&db, "Tee", 5).await;
    let order = seed_order(&db, vec![line_item(&product_id, 2)]).await;
    let order_id = order.id.as_deref().unwrap();

    let after_payment = coordinator
        .approve_payment(&staff_ctx(), order_id)
        .await
        .unwrap();
    assert!(after_payment.approve_payment);
    assert_eq!(after_payment.status, OrderStatus::Pending);

    let after_delivery_flag = coordinator
        .mark_out_for_delivery(&staff_ctx(), order_id)
        .await
        .unwrap();
    assert!(after_delivery_flag.out_of_delivery);
    assert!(after_delivery_flag.approve_payment);
    assert_eq!(after_delivery_flag.status, OrderStatus::Pending);

    // Flags are permitted even in terminal statuses
    advance(
        &coordinator,
        &staff_ctx(),
        order_id,
        &[OrderStatus::Cancelled],
    )
    .await;
    let again = coordinator
        .approve_payment(&staff_ctx(), order_id)
        .await
        .unwrap();
    assert_eq!(again.status, OrderStatus::Cancelled);

    // Each flag change was audited with its own kind
    let activities = order_activities(&db, &order).await;
    let kinds: Vec<_> = activities.iter().map(|a| a.kind).collect();
    assert!(kinds.contains(&shared::models::ActivityKind::PaymentUpdate));
    assert!(kinds.contains(&shared::models::ActivityKind::ShippingUpdate));
}

#[tokio::test]
async fn test_activities_come_back_newest_first() {
    let (db, coordinator) = setup().await;
    let product_id = seed_product(&db, "Tee", 5).await;
    let order = seed_order(&db, vec![line_item(&product_id, 2)]).await;
    let order_id = order.id.as_deref().unwrap();

    advance(
        &coordinator,
        &staff_ctx(),
        order_id,
        &[OrderStatus::Approved, OrderStatus::Processing],
    )
    .await;

    let activities = order_activities(&db, &order).await;
    assert_eq!(activities.len(), 2);
    assert_eq!(activities[0].new_value.as_deref(), Some("processing"));
    assert_eq!(activities[1].new_value.as_deref(), Some("approved"));
    assert!(activities[0].created_at >= activities[1].created_at);
}

#[tokio::test]
async fn test_each_transition_notifies_customer_once() {
    let (db, coordinator) = setup().await;
    let product_id = seed_product(&db, "Tee", 5).await;
    let order = seed_order(&db, vec![line_item(&product_id, 2)]).await;
    let order_id = order.id.as_deref().unwrap();

    advance(
        &coordinator,
        &staff_ctx(),
        order_id,
        &[
            OrderStatus::Approved,
            OrderStatus::Processing,
            OrderStatus::Shipped,
        ],
    )
    .await;

    let notifications = customer_notifications(&db).await;
    assert_eq!(notifications.len(), 3);
    // The shipped template is the documented one
    assert!(
        notifications
            .iter()
            .any(|n| n.content == "Your order has been shipped and is on its way.")
    );
}
