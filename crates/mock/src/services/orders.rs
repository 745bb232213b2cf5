//! Mock order service.
//!
//! Order status walks pending → confirmed → preparing → ready →
//! out_for_delivery → delivered; cancel is reachable from any
//! non-terminal state. Anything else is INVALID_STATUS.

use std::sync::Arc;

use chrono::Utc;

use clickdelivery_core::models::{
    CreateOrderRequest, Order, OrderPatch, OrderStatus, PaginatedResponse, Restaurant,
};
use clickdelivery_core::{ApiError, ApiResult, SessionStore};

use crate::paginate::paginate;
use crate::seed::new_order;
use crate::services::simulate_delay;
use crate::store::Store;

/// Fallback when no mock user is logged in.
const FALLBACK_CUSTOMER_ID: &str = "customer-1";
const FALLBACK_RESTAURANT_NAME: &str = "Mock Restaurant";
const DEFAULT_DELIVERY_ADDRESS: &str = "123 Test Address";

fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;
    if from.is_terminal() {
        return false;
    }
    match (from, to) {
        (_, Cancelled) => true,
        (Pending, Confirmed) => true,
        (Confirmed, Preparing) => true,
        (Preparing, Ready) => true,
        (Ready, OutForDelivery) => true,
        (OutForDelivery, Delivered) => true,
        _ => false,
    }
}

#[derive(Clone)]
pub struct MockOrderService {
    orders: Arc<Store<Order>>,
    restaurants: Arc<Store<Restaurant>>,
    session: Arc<SessionStore>,
}

impl MockOrderService {
    pub fn new(
        orders: Arc<Store<Order>>,
        restaurants: Arc<Store<Restaurant>>,
        session: Arc<SessionStore>,
    ) -> Self {
        Self {
            orders,
            restaurants,
            session,
        }
    }

    pub async fn get_orders(
        &self,
        page: Option<usize>,
        page_size: Option<usize>,
        status: Option<&str>,
    ) -> ApiResult<PaginatedResponse<Order>> {
        simulate_delay().await;
        let mut orders = self.orders.get_all();
        if let Some(status) = status {
            orders.retain(|order| {
                serde_json::to_value(order.status)
                    .map(|v| v == status)
                    .unwrap_or(false)
            });
        }
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(&orders, page, page_size))
    }

    pub async fn get_order_by_id(&self, id: &str) -> ApiResult<Order> {
        simulate_delay().await;
        self.orders
            .get(id)
            .ok_or_else(|| ApiError::not_found("Order not found"))
    }

    pub async fn create_order(&self, data: CreateOrderRequest) -> ApiResult<Order> {
        simulate_delay().await;
        let customer_id = self
            .session
            .current_user_id()
            .unwrap_or_else(|| FALLBACK_CUSTOMER_ID.to_string());
        let restaurant_name = self
            .restaurants
            .get(&data.restaurant_id)
            .map(|r| r.name)
            .unwrap_or_else(|| FALLBACK_RESTAURANT_NAME.to_string());
        let delivery_address = if data.delivery_address.is_empty() {
            DEFAULT_DELIVERY_ADDRESS.to_string()
        } else {
            data.delivery_address
        };

        let order = new_order(
            &customer_id,
            &data.restaurant_id,
            &restaurant_name,
            data.items,
            &delivery_address,
            data.notes,
        );
        self.orders.set(&order.id, order.clone());
        Ok(order)
    }

    pub async fn update_order_status(&self, id: &str, status: OrderStatus) -> ApiResult<Order> {
        simulate_delay().await;
        self.orders
            .try_update(id, |order| {
                if !can_transition(order.status, status) {
                    return Err(ApiError::invalid_status(
                        "Cannot change order to requested status",
                    ));
                }
                order.status = status;
                order.updated_at = Utc::now();
                Ok(())
            })?
            .ok_or_else(|| ApiError::not_found("Order not found"))
    }

    pub async fn cancel_order(&self, id: &str) -> ApiResult<Order> {
        simulate_delay().await;
        self.orders
            .try_update(id, |order| {
                if order.status.is_terminal() {
                    return Err(ApiError::invalid_status(
                        "Cannot cancel order in current status",
                    ));
                }
                order.status = OrderStatus::Cancelled;
                order.updated_at = Utc::now();
                Ok(())
            })?
            .ok_or_else(|| ApiError::not_found("Order not found"))
    }

    pub async fn assign_courier(&self, order_id: &str, courier_id: &str) -> ApiResult<Order> {
        simulate_delay().await;
        self.orders
            .update(order_id, |order| {
                order.courier_id = Some(courier_id.to_string());
                order.updated_at = Utc::now();
            })
            .ok_or_else(|| ApiError::not_found("Order not found"))
    }

    /// Admin-side merge; id, customer, restaurant, and money fields
    /// only change through their dedicated operations.
    pub fn update_order(&self, id: &str, patch: OrderPatch) -> Option<Order> {
        self.orders.update(id, |order| {
            if let Some(courier_id) = patch.courier_id {
                order.courier_id = Some(courier_id);
            }
            if let Some(delivery_address) = patch.delivery_address {
                order.delivery_address = delivery_address;
            }
            if let Some(notes) = patch.notes {
                order.notes = Some(notes);
            }
            order.updated_at = Utc::now();
        })
    }

    pub fn get_all_orders(&self) -> Vec<Order> {
        self.orders.get_all()
    }

    pub fn delete_order(&self, id: &str) -> bool {
        self.orders.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clickdelivery_core::models::OrderItem;

    fn service() -> MockOrderService {
        let session = Arc::new(SessionStore::new());
        session.set_current_user_id("customer-1");
        MockOrderService::new(
            Arc::new(Store::new("orders", None)),
            Arc::new(Store::new("restaurants", None)),
            session,
        )
    }

    fn request() -> CreateOrderRequest {
        CreateOrderRequest {
            restaurant_id: "rest-1".into(),
            items: vec![
                OrderItem {
                    menu_item_id: "menu-1".into(),
                    name: "Margherita Pizza".into(),
                    quantity: 2,
                    price: 10.0,
                },
                OrderItem {
                    menu_item_id: "menu-6".into(),
                    name: "French Fries".into(),
                    quantity: 1,
                    price: 5.0,
                },
            ],
            delivery_address: "789 Somewhere".into(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn created_order_holds_total_invariant() {
        let svc = service();
        let order = svc.create_order(request()).await.unwrap();
        assert_eq!(order.subtotal, 25.0);
        assert_eq!(order.delivery_fee, 4.99);
        assert_eq!(order.total, 29.99);
        assert_eq!(order.customer_id, "customer-1");
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn status_walks_the_chain() {
        let svc = service();
        let order = svc.create_order(request()).await.unwrap();

        for status in [
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
        ] {
            let updated = svc.update_order_status(&order.id, status).await.unwrap();
            assert_eq!(updated.status, status);
        }
    }

    #[tokio::test]
    async fn skipping_states_is_rejected() {
        let svc = service();
        let order = svc.create_order(request()).await.unwrap();
        let err = svc
            .update_order_status(&order.id, OrderStatus::Delivered)
            .await
            .unwrap_err();
        assert_eq!(err.error, "INVALID_STATUS");
        let unchanged = svc.get_order_by_id(&order.id).await.unwrap();
        assert_eq!(unchanged.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn cancelling_a_delivered_order_fails() {
        let svc = service();
        let order = svc.create_order(request()).await.unwrap();
        for status in [
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
        ] {
            svc.update_order_status(&order.id, status).await.unwrap();
        }

        let err = svc.cancel_order(&order.id).await.unwrap_err();
        assert_eq!(err.error, "INVALID_STATUS");
        let unchanged = svc.get_order_by_id(&order.id).await.unwrap();
        assert_eq!(unchanged.status, OrderStatus::Delivered);
    }

    #[tokio::test]
    async fn cancel_is_reachable_from_any_non_terminal_state() {
        let svc = service();
        let order = svc.create_order(request()).await.unwrap();
        svc.update_order_status(&order.id, OrderStatus::Confirmed)
            .await
            .unwrap();
        svc.update_order_status(&order.id, OrderStatus::Preparing)
            .await
            .unwrap();

        let cancelled = svc.cancel_order(&order.id).await.unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);

        // A second cancel hits the terminal guard.
        let err = svc.cancel_order(&order.id).await.unwrap_err();
        assert_eq!(err.error, "INVALID_STATUS");
    }

    #[tokio::test]
    async fn list_filters_by_status_and_sorts_newest_first() {
        let svc = service();
        let first = svc.create_order(request()).await.unwrap();
        let second = svc.create_order(request()).await.unwrap();
        svc.cancel_order(&first.id).await.unwrap();

        let pending = svc.get_orders(None, None, Some("pending")).await.unwrap();
        assert_eq!(pending.total, 1);
        assert_eq!(pending.data[0].id, second.id);

        let all = svc.get_orders(None, None, None).await.unwrap();
        assert_eq!(all.total, 2);
        assert!(all.data[0].created_at >= all.data[1].created_at);
    }

    #[tokio::test]
    async fn missing_order_is_not_found() {
        let svc = service();
        assert!(svc.get_order_by_id("nope").await.unwrap_err().is_not_found());
        assert!(svc.cancel_order("nope").await.unwrap_err().is_not_found());
    }
}
