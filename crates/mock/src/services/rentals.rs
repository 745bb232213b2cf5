//! Mock rental service.
//!
//! Rentals start pending; the owner approves (rental becomes active
//! and the vehicle flips to rented) or rejects (cancelled). Active
//! rentals complete or cancel, releasing the vehicle. The vehicle
//! flip is best effort: a missing vehicle never rolls back the
//! rental transition.

use std::sync::Arc;

use chrono::Utc;

use clickdelivery_core::models::{
    CreateRentalRequest, PaginatedResponse, Rental, RentalStatus, Vehicle, VehicleStatus,
};
use clickdelivery_core::{ApiError, ApiResult, SessionStore};

use crate::paginate::paginate;
use crate::seed::new_rental;
use crate::services::simulate_delay;
use crate::store::Store;

const FALLBACK_COURIER_ID: &str = "courier-1";
const FALLBACK_PRICE_PER_DAY: f64 = 50.0;

#[derive(Clone)]
pub struct MockRentalService {
    rentals: Arc<Store<Rental>>,
    vehicles: Arc<Store<Vehicle>>,
    session: Arc<SessionStore>,
}

impl MockRentalService {
    pub fn new(
        rentals: Arc<Store<Rental>>,
        vehicles: Arc<Store<Vehicle>>,
        session: Arc<SessionStore>,
    ) -> Self {
        Self {
            rentals,
            vehicles,
            session,
        }
    }

    pub async fn get_rentals(
        &self,
        page: Option<usize>,
        page_size: Option<usize>,
        status: Option<&str>,
    ) -> ApiResult<PaginatedResponse<Rental>> {
        simulate_delay().await;
        let mut rentals = self.rentals.get_all();
        if let Some(status) = status {
            rentals.retain(|rental| {
                serde_json::to_value(rental.status)
                    .map(|v| v == status)
                    .unwrap_or(false)
            });
        }
        rentals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(&rentals, page, page_size))
    }

    pub async fn get_rental_by_id(&self, id: &str) -> ApiResult<Rental> {
        simulate_delay().await;
        self.rentals
            .get(id)
            .ok_or_else(|| ApiError::not_found("Rental not found"))
    }

    pub async fn create_rental(&self, data: CreateRentalRequest) -> ApiResult<Rental> {
        simulate_delay().await;
        let courier_id = self
            .session
            .current_user_id()
            .unwrap_or_else(|| FALLBACK_COURIER_ID.to_string());
        let price_per_day = self
            .vehicles
            .get(&data.vehicle_id)
            .map(|v| v.price_per_day)
            .unwrap_or(FALLBACK_PRICE_PER_DAY);

        let rental = new_rental(
            &data.vehicle_id,
            &courier_id,
            data.start_date,
            data.end_date,
            price_per_day,
        );
        self.rentals.set(&rental.id, rental.clone());
        Ok(rental)
    }

    /// Owner approves a pending rental; the vehicle goes out on rent.
    pub async fn approve_rental(&self, id: &str) -> ApiResult<Rental> {
        simulate_delay().await;
        let rental = self
            .rentals
            .try_update(id, |rental| {
                if rental.status != RentalStatus::Pending {
                    return Err(ApiError::invalid_status("Only pending rentals can be approved"));
                }
                rental.status = RentalStatus::Active;
                rental.updated_at = Utc::now();
                Ok(())
            })?
            .ok_or_else(|| ApiError::not_found("Rental not found"))?;
        self.flip_vehicle(&rental.vehicle_id, VehicleStatus::Rented);
        Ok(rental)
    }

    pub async fn reject_rental(&self, id: &str) -> ApiResult<Rental> {
        simulate_delay().await;
        self.rentals
            .try_update(id, |rental| {
                if rental.status != RentalStatus::Pending {
                    return Err(ApiError::invalid_status("Only pending rentals can be rejected"));
                }
                rental.status = RentalStatus::Cancelled;
                rental.updated_at = Utc::now();
                Ok(())
            })?
            .ok_or_else(|| ApiError::not_found("Rental not found"))
    }

    pub async fn complete_rental(&self, id: &str) -> ApiResult<Rental> {
        simulate_delay().await;
        let rental = self
            .rentals
            .try_update(id, |rental| {
                if rental.status != RentalStatus::Active {
                    return Err(ApiError::invalid_status("Only active rentals can be completed"));
                }
                rental.status = RentalStatus::Completed;
                rental.updated_at = Utc::now();
                Ok(())
            })?
            .ok_or_else(|| ApiError::not_found("Rental not found"))?;
        self.flip_vehicle(&rental.vehicle_id, VehicleStatus::Available);
        Ok(rental)
    }

    /// Cancels a pending or active rental; releasing the vehicle only
    /// matters when the rental was active.
    pub async fn cancel_rental(&self, id: &str) -> ApiResult<Rental> {
        simulate_delay().await;
        let mut was_active = false;
        let rental = self
            .rentals
            .try_update(id, |rental| {
                if rental.status.is_terminal() {
                    return Err(ApiError::invalid_status(
                        "Cannot cancel rental in current status",
                    ));
                }
                was_active = rental.status == RentalStatus::Active;
                rental.status = RentalStatus::Cancelled;
                rental.updated_at = Utc::now();
                Ok(())
            })?
            .ok_or_else(|| ApiError::not_found("Rental not found"))?;
        if was_active {
            self.flip_vehicle(&rental.vehicle_id, VehicleStatus::Available);
        }
        Ok(rental)
    }

    pub async fn get_rentals_by_courier(&self, courier_id: &str) -> ApiResult<Vec<Rental>> {
        simulate_delay().await;
        let mut rentals = self.rentals.get_all();
        rentals.retain(|r| r.courier_id == courier_id);
        rentals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rentals)
    }

    /// Rentals whose vehicle belongs to the given owner.
    pub async fn get_rentals_by_owner(&self, owner_id: &str) -> ApiResult<Vec<Rental>> {
        simulate_delay().await;
        let owned: Vec<String> = self
            .vehicles
            .get_all()
            .into_iter()
            .filter(|v| v.owner_id == owner_id)
            .map(|v| v.id)
            .collect();
        let mut rentals = self.rentals.get_all();
        rentals.retain(|r| owned.contains(&r.vehicle_id));
        rentals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rentals)
    }

    pub fn get_all_rentals(&self) -> Vec<Rental> {
        self.rentals.get_all()
    }

    pub fn delete_rental(&self, id: &str) -> bool {
        self.rentals.delete(id)
    }

    fn flip_vehicle(&self, vehicle_id: &str, status: VehicleStatus) {
        let flipped = self.vehicles.update(vehicle_id, |vehicle| {
            vehicle.status = status;
            vehicle.updated_at = Utc::now();
        });
        if flipped.is_none() {
            tracing::warn!(vehicle_id, "rental referenced a vehicle that no longer exists");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_vehicles;
    use chrono::Duration;

    fn service() -> (MockRentalService, Arc<Store<Vehicle>>) {
        let vehicles = Arc::new(Store::new("vehicles", None));
        for vehicle in default_vehicles() {
            let id = vehicle.id.clone();
            vehicles.set(&id, vehicle);
        }
        let session = Arc::new(SessionStore::new());
        session.set_current_user_id("courier-1");
        let svc = MockRentalService::new(
            Arc::new(Store::new("rentals", None)),
            vehicles.clone(),
            session,
        );
        (svc, vehicles)
    }

    fn request(vehicle_id: &str) -> CreateRentalRequest {
        let start = Utc::now();
        CreateRentalRequest {
            vehicle_id: vehicle_id.into(),
            start_date: start,
            end_date: start + Duration::days(3),
        }
    }

    #[tokio::test]
    async fn create_prices_from_the_vehicle() {
        let (svc, vehicles) = service();
        let price = vehicles.get("vehicle-1").unwrap().price_per_day;
        let rental = svc.create_rental(request("vehicle-1")).await.unwrap();
        assert_eq!(rental.status, RentalStatus::Pending);
        assert_eq!(rental.price_per_day, price);
        assert_eq!(rental.total_price, rental.total_days as f64 * price);
        assert_eq!(rental.courier_id, "courier-1");
    }

    #[tokio::test]
    async fn unknown_vehicle_falls_back_to_default_price() {
        let (svc, _) = service();
        let rental = svc.create_rental(request("ghost")).await.unwrap();
        assert_eq!(rental.price_per_day, 50.0);
    }

    #[tokio::test]
    async fn approve_flips_vehicle_to_rented() {
        let (svc, vehicles) = service();
        let rental = svc.create_rental(request("vehicle-1")).await.unwrap();
        let approved = svc.approve_rental(&rental.id).await.unwrap();
        assert_eq!(approved.status, RentalStatus::Active);
        assert_eq!(vehicles.get("vehicle-1").unwrap().status, VehicleStatus::Rented);
    }

    #[tokio::test]
    async fn complete_releases_the_vehicle() {
        let (svc, vehicles) = service();
        let rental = svc.create_rental(request("vehicle-1")).await.unwrap();
        svc.approve_rental(&rental.id).await.unwrap();
        let completed = svc.complete_rental(&rental.id).await.unwrap();
        assert_eq!(completed.status, RentalStatus::Completed);
        assert_eq!(
            vehicles.get("vehicle-1").unwrap().status,
            VehicleStatus::Available
        );
    }

    #[tokio::test]
    async fn cancel_of_pending_leaves_vehicle_untouched() {
        let (svc, vehicles) = service();
        vehicles.update("vehicle-1", |v| v.status = VehicleStatus::Maintenance);
        let rental = svc.create_rental(request("vehicle-1")).await.unwrap();
        svc.cancel_rental(&rental.id).await.unwrap();
        assert_eq!(
            vehicles.get("vehicle-1").unwrap().status,
            VehicleStatus::Maintenance
        );
    }

    #[tokio::test]
    async fn cancel_of_active_releases_the_vehicle() {
        let (svc, vehicles) = service();
        let rental = svc.create_rental(request("vehicle-2")).await.unwrap();
        svc.approve_rental(&rental.id).await.unwrap();
        svc.cancel_rental(&rental.id).await.unwrap();
        assert_eq!(
            vehicles.get("vehicle-2").unwrap().status,
            VehicleStatus::Available
        );
    }

    #[tokio::test]
    async fn approve_requires_pending() {
        let (svc, _) = service();
        let rental = svc.create_rental(request("vehicle-1")).await.unwrap();
        svc.reject_rental(&rental.id).await.unwrap();
        let err = svc.approve_rental(&rental.id).await.unwrap_err();
        assert_eq!(err.error, "INVALID_STATUS");
    }

    #[tokio::test]
    async fn missing_vehicle_does_not_roll_back_approval() {
        let (svc, vehicles) = service();
        let rental = svc.create_rental(request("vehicle-3")).await.unwrap();
        vehicles.delete("vehicle-3");
        let approved = svc.approve_rental(&rental.id).await.unwrap();
        assert_eq!(approved.status, RentalStatus::Active);
    }

    #[tokio::test]
    async fn owner_view_follows_the_vehicle() {
        let (svc, _) = service();
        svc.create_rental(request("vehicle-1")).await.unwrap();
        svc.create_rental(request("vehicle-2")).await.unwrap();
        let by_owner = svc.get_rentals_by_owner("owner-1").await.unwrap();
        assert_eq!(by_owner.len(), 2);
        assert!(svc.get_rentals_by_owner("owner-2").await.unwrap().is_empty());
    }
}
