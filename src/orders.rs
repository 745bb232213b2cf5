//! Order operations (`/orders/pedidos` on the BFF).

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use clickdelivery_core::models::{
    CreateOrderRequest, ListParams, Order, OrderStatus, PaginatedResponse,
};
use clickdelivery_core::ApiResult;
use clickdelivery_mock::MockBackend;

use crate::fetch::HttpContext;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusBody {
    status: OrderStatus,
}

#[async_trait]
trait OrdersBackend: Send + Sync {
    async fn list(&self, params: ListParams) -> ApiResult<PaginatedResponse<Order>>;
    async fn get(&self, id: &str) -> ApiResult<Order>;
    async fn create(&self, data: CreateOrderRequest) -> ApiResult<Order>;
    async fn cancel(&self, id: &str) -> ApiResult<Order>;
    async fn update_status(&self, id: &str, status: OrderStatus) -> ApiResult<Order>;
}

struct HttpOrdersBackend {
    context: HttpContext,
}

#[async_trait]
impl OrdersBackend for HttpOrdersBackend {
    async fn list(&self, params: ListParams) -> ApiResult<PaginatedResponse<Order>> {
        self.context
            .get("/orders/pedidos")
            .query_opt("page", params.page)
            .query_opt("pageSize", params.page_size)
            .query_opt("status", params.status)
            .execute()
            .await
    }

    async fn get(&self, id: &str) -> ApiResult<Order> {
        self.context
            .get(&format!("/orders/pedidos/{id}"))
            .execute()
            .await
    }

    async fn create(&self, data: CreateOrderRequest) -> ApiResult<Order> {
        self.context
            .post("/orders/pedidos")
            .json(&data)?
            .execute()
            .await
    }

    async fn cancel(&self, id: &str) -> ApiResult<Order> {
        self.context
            .patch(&format!("/orders/pedidos/{id}/cancelar"))
            .execute()
            .await
    }

    async fn update_status(&self, id: &str, status: OrderStatus) -> ApiResult<Order> {
        self.context
            .patch(&format!("/orders/pedidos/{id}/status"))
            .json(&StatusBody { status })?
            .execute()
            .await
    }
}

struct MockOrdersBackend {
    backend: Arc<MockBackend>,
}

#[async_trait]
impl OrdersBackend for MockOrdersBackend {
    async fn list(&self, params: ListParams) -> ApiResult<PaginatedResponse<Order>> {
        self.backend
            .orders()
            .get_orders(params.page, params.page_size, params.status.as_deref())
            .await
    }

    async fn get(&self, id: &str) -> ApiResult<Order> {
        self.backend.orders().get_order_by_id(id).await
    }

    async fn create(&self, data: CreateOrderRequest) -> ApiResult<Order> {
        self.backend.orders().create_order(data).await
    }

    async fn cancel(&self, id: &str) -> ApiResult<Order> {
        self.backend.orders().cancel_order(id).await
    }

    async fn update_status(&self, id: &str, status: OrderStatus) -> ApiResult<Order> {
        self.backend.orders().update_order_status(id, status).await
    }
}

/// Facade over the selected order backend.
pub struct OrdersApi {
    backend: Arc<dyn OrdersBackend>,
}

impl OrdersApi {
    pub(crate) fn http(context: HttpContext) -> Self {
        Self {
            backend: Arc::new(HttpOrdersBackend { context }),
        }
    }

    pub(crate) fn mock(backend: Arc<MockBackend>) -> Self {
        Self {
            backend: Arc::new(MockOrdersBackend { backend }),
        }
    }

    pub async fn get_orders(&self, params: ListParams) -> ApiResult<PaginatedResponse<Order>> {
        self.backend.list(params).await
    }

    pub async fn get_order_by_id(&self, id: &str) -> ApiResult<Order> {
        self.backend.get(id).await
    }

    pub async fn create_order(&self, data: CreateOrderRequest) -> ApiResult<Order> {
        self.backend.create(data).await
    }

    /// Fails with INVALID_STATUS when the order already reached a
    /// terminal state.
    pub async fn cancel_order(&self, id: &str) -> ApiResult<Order> {
        self.backend.cancel(id).await
    }

    pub async fn update_order_status(&self, id: &str, status: OrderStatus) -> ApiResult<Order> {
        self.backend.update_status(id, status).await
    }
}
