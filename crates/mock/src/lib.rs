//! In-process backend that mirrors the delivery BFF.
//!
//! Every service reads and writes shared keyed stores, so a courier
//! approving a rental is visible to the owner listing vehicles. With a
//! data directory, state survives across constructions; without one it
//! is purely in memory.

pub mod paginate;
pub mod seed;
pub mod services;
pub mod store;

use std::path::PathBuf;
use std::sync::Arc;

use clickdelivery_core::SessionStore;

use services::auth::{MockAuthService, StoredUser};
use services::deliveries::MockDeliveryService;
use services::notifications::MockNotificationService;
use services::orders::MockOrderService;
use services::rentals::MockRentalService;
use services::restaurants::MockRestaurantService;
use services::users::{MockUserService, ProfileExtras};
use services::vehicles::MockVehicleService;
use store::Store;

pub use paginate::{paginate, DEFAULT_PAGE_SIZE};
pub use store::{clear_all_stores, STORAGE_PREFIX};

/// All mock services wired over shared stores and a shared session.
pub struct MockBackend {
    auth: MockAuthService,
    users: MockUserService,
    restaurants: MockRestaurantService,
    orders: MockOrderService,
    deliveries: MockDeliveryService,
    vehicles: MockVehicleService,
    rentals: MockRentalService,
    notifications: MockNotificationService,
}

impl MockBackend {
    /// Builds the backend. `data_dir` enables file persistence for
    /// every store; pass `None` for in-memory only.
    pub fn new(session: Arc<SessionStore>, data_dir: Option<PathBuf>) -> Self {
        let dir = data_dir.as_deref();

        let user_store: Arc<Store<StoredUser>> = Arc::new(Store::new("users", dir));
        let profile_store: Arc<Store<ProfileExtras>> = Arc::new(Store::new("profiles", dir));
        let restaurant_store = Arc::new(Store::new("restaurants", dir));
        let menu_store = Arc::new(Store::new("menu_items", dir));
        let order_store = Arc::new(Store::new("orders", dir));
        let delivery_store = Arc::new(Store::new("deliveries", dir));
        let vehicle_store = Arc::new(Store::new("vehicles", dir));
        let rental_store = Arc::new(Store::new("rentals", dir));
        let notification_store = Arc::new(Store::new("notifications", dir));

        let auth = MockAuthService::new(user_store, session.clone());
        Self {
            users: MockUserService::new(auth.clone(), profile_store),
            restaurants: MockRestaurantService::new(restaurant_store.clone(), menu_store),
            orders: MockOrderService::new(order_store, restaurant_store, session.clone()),
            deliveries: MockDeliveryService::new(delivery_store),
            vehicles: MockVehicleService::new(vehicle_store.clone()),
            rentals: MockRentalService::new(rental_store, vehicle_store, session.clone()),
            notifications: MockNotificationService::new(notification_store, session),
            auth,
        }
    }

    pub fn auth(&self) -> &MockAuthService {
        &self.auth
    }

    pub fn users(&self) -> &MockUserService {
        &self.users
    }

    pub fn restaurants(&self) -> &MockRestaurantService {
        &self.restaurants
    }

    pub fn orders(&self) -> &MockOrderService {
        &self.orders
    }

    pub fn deliveries(&self) -> &MockDeliveryService {
        &self.deliveries
    }

    pub fn vehicles(&self) -> &MockVehicleService {
        &self.vehicles
    }

    pub fn rentals(&self) -> &MockRentalService {
        &self.rentals
    }

    pub fn notifications(&self) -> &MockNotificationService {
        &self.notifications
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clickdelivery_core::models::{LoginRequest, VehicleStatus};

    #[tokio::test]
    async fn services_share_one_vehicle_store() {
        let backend = MockBackend::new(Arc::new(SessionStore::new()), None);
        backend
            .vehicles()
            .update_vehicle_status("vehicle-1", VehicleStatus::Rented)
            .await
            .unwrap();
        let owned = backend
            .rentals()
            .get_rentals_by_owner("owner-1")
            .await
            .unwrap();
        assert!(owned.is_empty());
        let available = backend.vehicles().get_available_vehicles().await.unwrap();
        assert_eq!(available.len(), 2);
    }

    #[tokio::test]
    async fn login_is_visible_to_every_service() {
        let session = Arc::new(SessionStore::new());
        let backend = MockBackend::new(session.clone(), None);
        backend
            .auth()
            .login(LoginRequest {
                email: "courier@example.com".into(),
                password: "courier123".into(),
            })
            .await
            .unwrap();

        assert!(session.is_authenticated());
        let me = backend.users().get_me().await.unwrap();
        assert_eq!(me.user.id, "courier-1");
        assert!(backend.notifications().get_notifications().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn state_survives_reconstruction_with_a_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let session = Arc::new(SessionStore::new());
        {
            let backend = MockBackend::new(session.clone(), Some(dir.path().to_path_buf()));
            backend
                .restaurants()
                .delete_restaurant("rest-3")
                .await
                .unwrap();
        }
        let backend = MockBackend::new(session, Some(dir.path().to_path_buf()));
        let listing = backend.restaurants().get_restaurants(None, None).await.unwrap();
        assert_eq!(listing.total, 2);
    }
}
