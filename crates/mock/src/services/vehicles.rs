//! Mock vehicle service.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use clickdelivery_core::models::{
    PaginatedResponse, Vehicle, VehiclePatch, VehicleStatus, VehicleType,
};
use clickdelivery_core::{ApiError, ApiResult};

use crate::paginate::paginate;
use crate::seed::default_vehicles;
use crate::services::simulate_delay;
use crate::store::Store;

#[derive(Clone)]
pub struct MockVehicleService {
    vehicles: Arc<Store<Vehicle>>,
}

impl MockVehicleService {
    pub fn new(vehicles: Arc<Store<Vehicle>>) -> Self {
        let service = Self { vehicles };
        service.seed_if_empty();
        service
    }

    fn seed_if_empty(&self) {
        if self.vehicles.is_empty() {
            for vehicle in default_vehicles() {
                let id = vehicle.id.clone();
                self.vehicles.set(&id, vehicle);
            }
        }
    }

    pub async fn get_vehicles(
        &self,
        page: Option<usize>,
        page_size: Option<usize>,
    ) -> ApiResult<PaginatedResponse<Vehicle>> {
        simulate_delay().await;
        let mut vehicles = self.vehicles.get_all();
        vehicles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(&vehicles, page, page_size))
    }

    pub async fn get_vehicle_by_id(&self, id: &str) -> ApiResult<Vehicle> {
        simulate_delay().await;
        self.vehicles
            .get(id)
            .ok_or_else(|| ApiError::not_found("Vehicle not found"))
    }

    pub async fn get_available_vehicles(&self) -> ApiResult<Vec<Vehicle>> {
        simulate_delay().await;
        let mut vehicles = self.vehicles.get_all();
        vehicles.retain(|v| v.status == VehicleStatus::Available);
        Ok(vehicles)
    }

    pub async fn get_vehicles_by_owner(&self, owner_id: &str) -> ApiResult<Vec<Vehicle>> {
        simulate_delay().await;
        let mut vehicles = self.vehicles.get_all();
        vehicles.retain(|v| v.owner_id == owner_id);
        Ok(vehicles)
    }

    pub async fn create_vehicle(&self, data: VehiclePatch) -> ApiResult<Vehicle> {
        simulate_delay().await;
        let now = Utc::now();
        let vehicle = Vehicle {
            id: Uuid::new_v4().to_string(),
            owner_id: data.owner_id.unwrap_or_else(|| "owner-1".to_string()),
            vehicle_type: data.vehicle_type.unwrap_or(VehicleType::Bike),
            brand: data.brand.unwrap_or_default(),
            model: data.model.unwrap_or_default(),
            year: data.year.unwrap_or(2024),
            license_plate: data.license_plate.unwrap_or_default(),
            status: data.status.unwrap_or(VehicleStatus::Available),
            price_per_day: data.price_per_day.unwrap_or(50.0),
            created_at: now,
            updated_at: now,
        };
        self.vehicles.set(&vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    pub async fn update_vehicle(&self, id: &str, patch: VehiclePatch) -> ApiResult<Vehicle> {
        simulate_delay().await;
        self.vehicles
            .update(id, |vehicle| {
                // owner_id is fixed at creation; patches never move a
                // vehicle between owners.
                if let Some(vehicle_type) = patch.vehicle_type {
                    vehicle.vehicle_type = vehicle_type;
                }
                if let Some(brand) = patch.brand {
                    vehicle.brand = brand;
                }
                if let Some(model) = patch.model {
                    vehicle.model = model;
                }
                if let Some(year) = patch.year {
                    vehicle.year = year;
                }
                if let Some(license_plate) = patch.license_plate {
                    vehicle.license_plate = license_plate;
                }
                if let Some(status) = patch.status {
                    vehicle.status = status;
                }
                if let Some(price_per_day) = patch.price_per_day {
                    vehicle.price_per_day = price_per_day;
                }
                vehicle.updated_at = Utc::now();
            })
            .ok_or_else(|| ApiError::not_found("Vehicle not found"))
    }

    pub async fn update_vehicle_status(
        &self,
        id: &str,
        status: VehicleStatus,
    ) -> ApiResult<Vehicle> {
        simulate_delay().await;
        self.vehicles
            .update(id, |vehicle| {
                vehicle.status = status;
                vehicle.updated_at = Utc::now();
            })
            .ok_or_else(|| ApiError::not_found("Vehicle not found"))
    }

    pub async fn delete_vehicle(&self, id: &str) -> ApiResult<()> {
        simulate_delay().await;
        if self.vehicles.delete(id) {
            Ok(())
        } else {
            Err(ApiError::not_found("Vehicle not found"))
        }
    }

    pub fn get_all_vehicles(&self) -> Vec<Vehicle> {
        self.vehicles.get_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> MockVehicleService {
        MockVehicleService::new(Arc::new(Store::new("vehicles", None)))
    }

    #[tokio::test]
    async fn seeds_three_vehicles_once() {
        let store = Arc::new(Store::new("vehicles", None));
        let svc = MockVehicleService::new(store.clone());
        assert_eq!(svc.get_all_vehicles().len(), 3);
        // A second service over the same store must not reseed.
        let again = MockVehicleService::new(store);
        assert_eq!(again.get_all_vehicles().len(), 3);
    }

    #[tokio::test]
    async fn owner_filter_and_availability() {
        let svc = service();
        let owned = svc.get_vehicles_by_owner("owner-1").await.unwrap();
        assert_eq!(owned.len(), 3);

        svc.update_vehicle_status("vehicle-1", VehicleStatus::Maintenance)
            .await
            .unwrap();
        let available = svc.get_available_vehicles().await.unwrap();
        assert_eq!(available.len(), 2);
        assert!(available.iter().all(|v| v.id != "vehicle-1"));
    }

    #[tokio::test]
    async fn patch_cannot_move_vehicle_between_owners() {
        let svc = service();
        let patch = VehiclePatch {
            owner_id: Some("owner-2".into()),
            brand: Some("Yamaha".into()),
            ..VehiclePatch::default()
        };
        let updated = svc.update_vehicle("vehicle-1", patch).await.unwrap();
        assert_eq!(updated.owner_id, "owner-1");
        assert_eq!(updated.brand, "Yamaha");
    }

    #[tokio::test]
    async fn create_uses_sensible_defaults() {
        let svc = service();
        let created = svc
            .create_vehicle(VehiclePatch {
                brand: Some("Honda".into()),
                model: Some("Biz".into()),
                ..VehiclePatch::default()
            })
            .await
            .unwrap();
        assert_eq!(created.status, VehicleStatus::Available);
        assert_eq!(created.price_per_day, 50.0);
        assert_eq!(created.owner_id, "owner-1");
    }

    #[tokio::test]
    async fn delete_missing_vehicle_is_not_found() {
        let svc = service();
        assert!(svc.delete_vehicle("nope").await.unwrap_err().is_not_found());
    }
}
