use super::*;
use crate::db::DbService;
use crate::db::repository::{
    ActivityRepository, NotificationRepository, OrderRepository, ProductRepository,
};
use rust_decimal::Decimal;
use shared::RequestContext;
use shared::models::{
    DeliveryMethod, LineItem, Order, OrderActivity, OrderCreate, OrderStatus, ProductCreate,
    ShippingAddress, Variation,
};
use shared::request::StatusUpdate;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

mod test_core;
mod test_flows;

const STORE: &str = "store_1";
const STAFF: &str = "user_staff";
const CUSTOMER: &str = "user_customer";

async fn setup() -> (Surreal<Db>, OrderStatusCoordinator) {
    let service = DbService::memory().await.expect("in-memory store");
    let coordinator = OrderStatusCoordinator::new(service.db.clone());
    (service.db, coordinator)
}

fn staff_ctx() -> RequestContext {
    RequestContext::new(STORE, STAFF).with_actor_name("Staff A")
}

fn customer_ctx() -> RequestContext {
    RequestContext::new(STORE, CUSTOMER)
}

fn test_address() -> ShippingAddress {
    ShippingAddress {
        name: "Jordan Doe".into(),
        phone: None,
        line1: "1 Main St".into(),
        line2: None,
        city: "Springfield".into(),
        state: None,
        postal_code: Some("12345".into()),
        country: "US".into(),
    }
}

async fn seed_product(db: &Surreal<Db>, name: &str, stock: i64) -> String {
    let repo = ProductRepository::new(db.clone());
    let product = repo
        .create(ProductCreate {
            store_id: STORE.into(),
            name: name.into(),
            image: None,
            price: Decimal::new(1000, 2),
            stock,
            variations: None,
        })
        .await
        .expect("seed product");
    product.id.expect("seeded product has an id")
}

async fn seed_product_with_variations(
    db: &Surreal<Db>,
    name: &str,
    variations: &[(&str, i64)],
) -> String {
    let repo = ProductRepository::new(db.clone());
    let product = repo
        .create(ProductCreate {
            store_id: STORE.into(),
            name: name.into(),
            image: None,
            price: Decimal::new(1000, 2),
            stock: 0,
            variations: Some(
                variations
                    .iter()
                    .map(|(id, stock)| Variation {
                        id: (*id).into(),
                        name: (*id).into(),
                        price: None,
                        stock: *stock,
                    })
                    .collect(),
            ),
        })
        .await
        .expect("seed product");
    product.id.expect("seeded product has an id")
}

fn line_item(product_id: &str, quantity: u32) -> LineItem {
    let unit_price = Decimal::new(1000, 2);
    LineItem {
        product_id: product_id.into(),
        variation_id: None,
        product_name: "Test Product".into(),
        variation_name: None,
        quantity,
        unit_price,
        line_total: unit_price * Decimal::from(quantity),
    }
}

fn variation_item(product_id: &str, variation_id: &str, quantity: u32) -> LineItem {
    LineItem {
        variation_id: Some(variation_id.into()),
        variation_name: Some(variation_id.into()),
        ..line_item(product_id, quantity)
    }
}

async fn seed_order(db: &Surreal<Db>, items: Vec<LineItem>) -> Order {
    let repo = OrderRepository::new(db.clone());
    let subtotal: Decimal = items.iter().map(|i| i.line_total).sum();
    repo.create(OrderCreate {
        store_id: STORE.into(),
        customer_id: CUSTOMER.into(),
        customer_name: Some("Jordan Doe".into()),
        items,
        subtotal,
        shipping_fee: Decimal::ZERO,
        tax_amount: Decimal::ZERO,
        currency: "USD".into(),
        shipping_address: test_address(),
        delivery_method: DeliveryMethod::Standard,
        notes: None,
    })
    .await
    .expect("seed order")
}

async fn product_stock(db: &Surreal<Db>, product_id: &str) -> i64 {
    ProductRepository::new(db.clone())
        .find_by_id(product_id)
        .await
        .unwrap()
        .unwrap()
        .stock
}

async fn variation_stock(db: &Surreal<Db>, product_id: &str, variation_id: &str) -> i64 {
    ProductRepository::new(db.clone())
        .find_by_id(product_id)
        .await
        .unwrap()
        .unwrap()
        .variation(variation_id)
        .unwrap()
        .stock
}

async fn order_activities(db: &Surreal<Db>, order: &Order) -> Vec<OrderActivity> {
    ActivityRepository::new(db.clone())
        .find_by_order(STORE, order.id.as_deref().unwrap())
        .await
        .unwrap()
}

async fn customer_notifications(db: &Surreal<Db>) -> Vec<shared::models::Notification> {
    NotificationRepository::new(db.clone())
        .find_by_receiver(STORE, CUSTOMER, 100)
        .await
        .unwrap()
}

/// Walk an order through a sequence of valid transitions
async fn advance(
    coordinator: &OrderStatusCoordinator,
    ctx: &RequestContext,
    order_id: &str,
    statuses: &[OrderStatus],
) -> Order {
    let mut last = None;
    for status in statuses {
        last = Some(
            coordinator
                .update_status(ctx, order_id, *status, None)
                .await
                .unwrap_or_else(|e| panic!("transition to {status} failed: {e}")),
        );
    }
    last.expect("at least one transition")
}
