//! Mock delivery service.
//!
//! Assigned deliveries move picked_up → in_transit → delivered, with
//! pickup and delivery timestamps stamped on the way; failed is
//! reachable from any non-terminal state.

use std::sync::Arc;

use chrono::Utc;

use clickdelivery_core::models::{
    Delivery, DeliveryPatch, DeliveryStatus, PaginatedResponse,
};
use clickdelivery_core::{ApiError, ApiResult};

use crate::paginate::paginate;
use crate::seed::new_delivery;
use crate::services::simulate_delay;
use crate::store::Store;

fn can_transition(from: DeliveryStatus, to: DeliveryStatus) -> bool {
    use DeliveryStatus::*;
    if from.is_terminal() {
        return false;
    }
    match (from, to) {
        (_, Failed) => true,
        (Pending, Assigned) => true,
        (Pending | Assigned, PickedUp) => true,
        (PickedUp, InTransit) => true,
        (InTransit, Delivered) => true,
        _ => false,
    }
}

#[derive(Clone)]
pub struct MockDeliveryService {
    deliveries: Arc<Store<Delivery>>,
}

impl MockDeliveryService {
    pub fn new(deliveries: Arc<Store<Delivery>>) -> Self {
        Self { deliveries }
    }

    pub async fn get_deliveries(
        &self,
        page: Option<usize>,
        page_size: Option<usize>,
        status: Option<&str>,
    ) -> ApiResult<PaginatedResponse<Delivery>> {
        simulate_delay().await;
        let mut deliveries = self.deliveries.get_all();
        if let Some(status) = status {
            deliveries.retain(|delivery| {
                serde_json::to_value(delivery.status)
                    .map(|v| v == status)
                    .unwrap_or(false)
            });
        }
        deliveries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(&deliveries, page, page_size))
    }

    pub async fn get_delivery_by_id(&self, id: &str) -> ApiResult<Delivery> {
        simulate_delay().await;
        self.deliveries
            .get(id)
            .ok_or_else(|| ApiError::not_found("Delivery not found"))
    }

    pub async fn create_delivery(&self, order_id: &str, courier_id: &str) -> ApiResult<Delivery> {
        simulate_delay().await;
        let delivery = new_delivery(order_id, courier_id);
        self.deliveries.set(&delivery.id, delivery.clone());
        Ok(delivery)
    }

    pub async fn update_delivery_status(
        &self,
        id: &str,
        status: DeliveryStatus,
    ) -> ApiResult<Delivery> {
        simulate_delay().await;
        self.deliveries
            .try_update(id, |delivery| {
                if !can_transition(delivery.status, status) {
                    return Err(ApiError::invalid_status(
                        "Cannot change delivery to requested status",
                    ));
                }
                delivery.status = status;
                let now = Utc::now();
                match status {
                    DeliveryStatus::PickedUp => delivery.pickup_time = Some(now),
                    DeliveryStatus::Delivered => delivery.delivery_time = Some(now),
                    _ => {}
                }
                delivery.updated_at = now;
                Ok(())
            })?
            .ok_or_else(|| ApiError::not_found("Delivery not found"))
    }

    pub async fn assign_courier(&self, id: &str, courier_id: &str) -> ApiResult<Delivery> {
        simulate_delay().await;
        self.deliveries
            .update(id, |delivery| {
                delivery.courier_id = courier_id.to_string();
                if delivery.status == DeliveryStatus::Pending {
                    delivery.status = DeliveryStatus::Assigned;
                }
                delivery.updated_at = Utc::now();
            })
            .ok_or_else(|| ApiError::not_found("Delivery not found"))
    }

    /// Courier takes a pending delivery for themselves.
    pub async fn accept_delivery(&self, id: &str, courier_id: &str) -> ApiResult<Delivery> {
        self.assign_courier(id, courier_id).await
    }

    pub async fn get_deliveries_by_courier(&self, courier_id: &str) -> ApiResult<Vec<Delivery>> {
        simulate_delay().await;
        let mut deliveries = self.deliveries.get_all();
        deliveries.retain(|d| d.courier_id == courier_id);
        deliveries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(deliveries)
    }

    /// Deliveries the courier still has in flight.
    pub async fn get_active_deliveries(&self, courier_id: &str) -> ApiResult<Vec<Delivery>> {
        let mut deliveries = self.get_deliveries_by_courier(courier_id).await?;
        deliveries.retain(|d| !d.status.is_terminal());
        Ok(deliveries)
    }

    pub fn update_delivery(&self, id: &str, patch: DeliveryPatch) -> Option<Delivery> {
        self.deliveries.update(id, |delivery| {
            if let Some(vehicle_id) = patch.vehicle_id {
                delivery.vehicle_id = Some(vehicle_id);
            }
            if let Some(pickup_address) = patch.pickup_address {
                delivery.pickup_address = pickup_address;
            }
            if let Some(delivery_address) = patch.delivery_address {
                delivery.delivery_address = delivery_address;
            }
            if let Some(distance) = patch.distance {
                delivery.distance = Some(distance);
            }
            if let Some(earnings) = patch.earnings {
                delivery.earnings = Some(earnings);
            }
            delivery.updated_at = Utc::now();
        })
    }

    pub fn get_all_deliveries(&self) -> Vec<Delivery> {
        self.deliveries.get_all()
    }

    pub fn delete_delivery(&self, id: &str) -> bool {
        self.deliveries.delete(id)
    }
}
