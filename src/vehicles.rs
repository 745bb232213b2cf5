//! Vehicle fleet operations (`/deliveries/veiculos` on the BFF).

use std::sync::Arc;

use async_trait::async_trait;

use clickdelivery_core::models::{ListParams, PaginatedResponse, Vehicle, VehiclePatch};
use clickdelivery_core::ApiResult;
use clickdelivery_mock::MockBackend;

use crate::fetch::HttpContext;

#[async_trait]
trait VehiclesBackend: Send + Sync {
    async fn list(&self, params: ListParams) -> ApiResult<PaginatedResponse<Vehicle>>;
    async fn get(&self, id: &str) -> ApiResult<Vehicle>;
    async fn create(&self, data: VehiclePatch) -> ApiResult<Vehicle>;
    async fn update(&self, id: &str, patch: VehiclePatch) -> ApiResult<Vehicle>;
    async fn delete(&self, id: &str) -> ApiResult<()>;
}

struct HttpVehiclesBackend {
    context: HttpContext,
}

#[async_trait]
impl VehiclesBackend for HttpVehiclesBackend {
    async fn list(&self, params: ListParams) -> ApiResult<PaginatedResponse<Vehicle>> {
        self.context
            .get("/deliveries/veiculos")
            .query_opt("page", params.page)
            .query_opt("pageSize", params.page_size)
            .query_opt("status", params.status)
            .execute()
            .await
    }

    async fn get(&self, id: &str) -> ApiResult<Vehicle> {
        self.context
            .get(&format!("/deliveries/veiculos/{id}"))
            .execute()
            .await
    }

    async fn create(&self, data: VehiclePatch) -> ApiResult<Vehicle> {
        self.context
            .post("/deliveries/veiculos")
            .json(&data)?
            .execute()
            .await
    }

    async fn update(&self, id: &str, patch: VehiclePatch) -> ApiResult<Vehicle> {
        self.context
            .put(&format!("/deliveries/veiculos/{id}"))
            .json(&patch)?
            .execute()
            .await
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        self.context
            .delete(&format!("/deliveries/veiculos/{id}"))
            .execute_unit()
            .await
    }
}

struct MockVehiclesBackend {
    backend: Arc<MockBackend>,
}

#[async_trait]
impl VehiclesBackend for MockVehiclesBackend {
    async fn list(&self, params: ListParams) -> ApiResult<PaginatedResponse<Vehicle>> {
        self.backend
            .vehicles()
            .get_vehicles(params.page, params.page_size)
            .await
    }

    async fn get(&self, id: &str) -> ApiResult<Vehicle> {
        self.backend.vehicles().get_vehicle_by_id(id).await
    }

    async fn create(&self, data: VehiclePatch) -> ApiResult<Vehicle> {
        self.backend.vehicles().create_vehicle(data).await
    }

    async fn update(&self, id: &str, patch: VehiclePatch) -> ApiResult<Vehicle> {
        self.backend.vehicles().update_vehicle(id, patch).await
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        self.backend.vehicles().delete_vehicle(id).await
    }
}

/// Facade over the selected vehicle backend.
pub struct VehiclesApi {
    backend: Arc<dyn VehiclesBackend>,
}

impl VehiclesApi {
    pub(crate) fn http(context: HttpContext) -> Self {
        Self {
            backend: Arc::new(HttpVehiclesBackend { context }),
        }
    }

    pub(crate) fn mock(backend: Arc<MockBackend>) -> Self {
        Self {
            backend: Arc::new(MockVehiclesBackend { backend }),
        }
    }

    pub async fn get_vehicles(&self, params: ListParams) -> ApiResult<PaginatedResponse<Vehicle>> {
        self.backend.list(params).await
    }

    pub async fn get_vehicle_by_id(&self, id: &str) -> ApiResult<Vehicle> {
        self.backend.get(id).await
    }

    pub async fn create_vehicle(&self, data: VehiclePatch) -> ApiResult<Vehicle> {
        self.backend.create(data).await
    }

    pub async fn update_vehicle(&self, id: &str, patch: VehiclePatch) -> ApiResult<Vehicle> {
        self.backend.update(id, patch).await
    }

    pub async fn delete_vehicle(&self, id: &str) -> ApiResult<()> {
        self.backend.delete(id).await
    }
}
