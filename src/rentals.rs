//! Vehicle rental operations (`/rentals/rentals` on the BFF).

use std::sync::Arc;

use async_trait::async_trait;

use clickdelivery_core::models::{CreateRentalRequest, ListParams, PaginatedResponse, Rental};
use clickdelivery_core::ApiResult;
use clickdelivery_mock::MockBackend;

use crate::fetch::HttpContext;

#[async_trait]
trait RentalsBackend: Send + Sync {
    async fn list(&self, params: ListParams) -> ApiResult<PaginatedResponse<Rental>>;
    async fn get(&self, id: &str) -> ApiResult<Rental>;
    async fn create(&self, data: CreateRentalRequest) -> ApiResult<Rental>;
    async fn approve(&self, id: &str) -> ApiResult<Rental>;
    async fn reject(&self, id: &str) -> ApiResult<Rental>;
    async fn complete(&self, id: &str) -> ApiResult<Rental>;
    async fn cancel(&self, id: &str) -> ApiResult<Rental>;
}

struct HttpRentalsBackend {
    context: HttpContext,
}

impl HttpRentalsBackend {
    async fn transition(&self, id: &str, action: &str) -> ApiResult<Rental> {
        self.context
            .patch(&format!("/rentals/rentals/{id}/{action}"))
            .execute()
            .await
    }
}

#[async_trait]
impl RentalsBackend for HttpRentalsBackend {
    async fn list(&self, params: ListParams) -> ApiResult<PaginatedResponse<Rental>> {
        self.context
            .get("/rentals/rentals")
            .query_opt("page", params.page)
            .query_opt("pageSize", params.page_size)
            .query_opt("status", params.status)
            .execute()
            .await
    }

    async fn get(&self, id: &str) -> ApiResult<Rental> {
        self.context
            .get(&format!("/rentals/rentals/{id}"))
            .execute()
            .await
    }

    async fn create(&self, data: CreateRentalRequest) -> ApiResult<Rental> {
        self.context
            .post("/rentals/rentals")
            .json(&data)?
            .execute()
            .await
    }

    async fn approve(&self, id: &str) -> ApiResult<Rental> {
        self.transition(id, "approve").await
    }

    async fn reject(&self, id: &str) -> ApiResult<Rental> {
        self.transition(id, "reject").await
    }

    async fn complete(&self, id: &str) -> ApiResult<Rental> {
        self.transition(id, "complete").await
    }

    async fn cancel(&self, id: &str) -> ApiResult<Rental> {
        self.transition(id, "cancel").await
    }
}

struct MockRentalsBackend {
    backend: Arc<MockBackend>,
}

#[async_trait]
impl RentalsBackend for MockRentalsBackend {
    async fn list(&self, params: ListParams) -> ApiResult<PaginatedResponse<Rental>> {
        self.backend
            .rentals()
            .get_rentals(params.page, params.page_size, params.status.as_deref())
            .await
    }

    async fn get(&self, id: &str) -> ApiResult<Rental> {
        self.backend.rentals().get_rental_by_id(id).await
    }

    async fn create(&self, data: CreateRentalRequest) -> ApiResult<Rental> {
        self.backend.rentals().create_rental(data).await
    }

    async fn approve(&self, id: &str) -> ApiResult<Rental> {
        self.backend.rentals().approve_rental(id).await
    }

    async fn reject(&self, id: &str) -> ApiResult<Rental> {
        self.backend.rentals().reject_rental(id).await
    }

    async fn complete(&self, id: &str) -> ApiResult<Rental> {
        self.backend.rentals().complete_rental(id).await
    }

    async fn cancel(&self, id: &str) -> ApiResult<Rental> {
        self.backend.rentals().cancel_rental(id).await
    }
}

/// Facade over the selected rental backend.
pub struct RentalsApi {
    backend: Arc<dyn RentalsBackend>,
}

impl RentalsApi {
    pub(crate) fn http(context: HttpContext) -> Self {
        Self {
            backend: Arc::new(HttpRentalsBackend { context }),
        }
    }

    pub(crate) fn mock(backend: Arc<MockBackend>) -> Self {
        Self {
            backend: Arc::new(MockRentalsBackend { backend }),
        }
    }

    pub async fn get_rentals(&self, params: ListParams) -> ApiResult<PaginatedResponse<Rental>> {
        self.backend.list(params).await
    }

    pub async fn get_rental_by_id(&self, id: &str) -> ApiResult<Rental> {
        self.backend.get(id).await
    }

    pub async fn create_rental(&self, data: CreateRentalRequest) -> ApiResult<Rental> {
        self.backend.create(data).await
    }

    /// Owner approval; the rented vehicle leaves the available pool.
    pub async fn approve_rental(&self, id: &str) -> ApiResult<Rental> {
        self.backend.approve(id).await
    }

    pub async fn reject_rental(&self, id: &str) -> ApiResult<Rental> {
        self.backend.reject(id).await
    }

    pub async fn complete_rental(&self, id: &str) -> ApiResult<Rental> {
        self.backend.complete(id).await
    }

    pub async fn cancel_rental(&self, id: &str) -> ApiResult<Rental> {
        self.backend.cancel(id).await
    }
}
