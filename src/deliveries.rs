//! Delivery operations (`/deliveries/entregas` on the BFF).

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use clickdelivery_core::models::{Delivery, DeliveryStatus, ListParams, PaginatedResponse};
use clickdelivery_core::ApiResult;
use clickdelivery_mock::MockBackend;

use crate::fetch::HttpContext;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusBody {
    status: DeliveryStatus,
}

#[async_trait]
trait DeliveriesBackend: Send + Sync {
    async fn list(&self, params: ListParams) -> ApiResult<PaginatedResponse<Delivery>>;
    async fn get(&self, id: &str) -> ApiResult<Delivery>;
    async fn update_status(&self, id: &str, status: DeliveryStatus) -> ApiResult<Delivery>;
}

struct HttpDeliveriesBackend {
    context: HttpContext,
}

#[async_trait]
impl DeliveriesBackend for HttpDeliveriesBackend {
    async fn list(&self, params: ListParams) -> ApiResult<PaginatedResponse<Delivery>> {
        self.context
            .get("/deliveries/entregas")
            .query_opt("page", params.page)
            .query_opt("pageSize", params.page_size)
            .query_opt("status", params.status)
            .execute()
            .await
    }

    async fn get(&self, id: &str) -> ApiResult<Delivery> {
        self.context
            .get(&format!("/deliveries/entregas/{id}"))
            .execute()
            .await
    }

    async fn update_status(&self, id: &str, status: DeliveryStatus) -> ApiResult<Delivery> {
        self.context
            .patch(&format!("/deliveries/entregas/{id}/status"))
            .json(&StatusBody { status })?
            .execute()
            .await
    }
}

struct MockDeliveriesBackend {
    backend: Arc<MockBackend>,
}

#[async_trait]
impl DeliveriesBackend for MockDeliveriesBackend {
    async fn list(&self, params: ListParams) -> ApiResult<PaginatedResponse<Delivery>> {
        self.backend
            .deliveries()
            .get_deliveries(params.page, params.page_size, params.status.as_deref())
            .await
    }

    async fn get(&self, id: &str) -> ApiResult<Delivery> {
        self.backend.deliveries().get_delivery_by_id(id).await
    }

    async fn update_status(&self, id: &str, status: DeliveryStatus) -> ApiResult<Delivery> {
        self.backend
            .deliveries()
            .update_delivery_status(id, status)
            .await
    }
}

/// Facade over the selected delivery backend.
pub struct DeliveriesApi {
    backend: Arc<dyn DeliveriesBackend>,
}

impl DeliveriesApi {
    pub(crate) fn http(context: HttpContext) -> Self {
        Self {
            backend: Arc::new(HttpDeliveriesBackend { context }),
        }
    }

    pub(crate) fn mock(backend: Arc<MockBackend>) -> Self {
        Self {
            backend: Arc::new(MockDeliveriesBackend { backend }),
        }
    }

    pub async fn get_deliveries(
        &self,
        params: ListParams,
    ) -> ApiResult<PaginatedResponse<Delivery>> {
        self.backend.list(params).await
    }

    pub async fn get_delivery_by_id(&self, id: &str) -> ApiResult<Delivery> {
        self.backend.get(id).await
    }

    /// Transitions stamp `pickup_time` on `picked_up` and
    /// `delivery_time` on `delivered`.
    pub async fn update_delivery_status(
        &self,
        id: &str,
        status: DeliveryStatus,
    ) -> ApiResult<Delivery> {
        self.backend.update_status(id, status).await
    }
}
