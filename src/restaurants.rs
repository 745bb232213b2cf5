//! Restaurant catalog and menu management.
//!
//! The BFF exposes these under the orders service with Portuguese
//! segment names (`restaurantes`, `cardapios`).

use std::sync::Arc;

use async_trait::async_trait;

use clickdelivery_core::models::{
    ListParams, MenuItem, MenuItemPatch, PaginatedResponse, Restaurant, RestaurantPatch,
};
use clickdelivery_core::ApiResult;
use clickdelivery_mock::MockBackend;

use crate::fetch::HttpContext;

#[async_trait]
trait RestaurantsBackend: Send + Sync {
    async fn list(&self, params: ListParams) -> ApiResult<PaginatedResponse<Restaurant>>;
    async fn get(&self, id: &str) -> ApiResult<Restaurant>;
    async fn menu_items(&self, restaurant_id: &str) -> ApiResult<Vec<MenuItem>>;
    async fn create_menu_item(
        &self,
        restaurant_id: &str,
        data: MenuItemPatch,
    ) -> ApiResult<MenuItem>;
    async fn update_menu_item(&self, id: &str, patch: MenuItemPatch) -> ApiResult<MenuItem>;
    async fn delete_menu_item(&self, id: &str) -> ApiResult<()>;
    async fn create(&self, data: RestaurantPatch) -> ApiResult<Restaurant>;
    async fn update(&self, id: &str, patch: RestaurantPatch) -> ApiResult<Restaurant>;
    async fn delete(&self, id: &str) -> ApiResult<()>;
}

struct HttpRestaurantsBackend {
    context: HttpContext,
}

#[async_trait]
impl RestaurantsBackend for HttpRestaurantsBackend {
    async fn list(&self, params: ListParams) -> ApiResult<PaginatedResponse<Restaurant>> {
        self.context
            .get("/orders/restaurantes")
            .query_opt("page", params.page)
            .query_opt("pageSize", params.page_size)
            .query_opt("status", params.status)
            .execute()
            .await
    }

    async fn get(&self, id: &str) -> ApiResult<Restaurant> {
        self.context
            .get(&format!("/orders/restaurantes/{id}"))
            .execute()
            .await
    }

    async fn menu_items(&self, restaurant_id: &str) -> ApiResult<Vec<MenuItem>> {
        self.context
            .get(&format!("/orders/cardapios/restaurante/{restaurant_id}"))
            .execute()
            .await
    }

    async fn create_menu_item(
        &self,
        restaurant_id: &str,
        data: MenuItemPatch,
    ) -> ApiResult<MenuItem> {
        let mut body = serde_json::to_value(&data).map_err(|err| {
            clickdelivery_core::ApiError::unknown(
                format!("Failed to encode request body: {err}"),
                500,
            )
        })?;
        body["restaurantId"] = serde_json::Value::String(restaurant_id.to_string());
        self.context
            .post("/orders/cardapios")
            .json(&body)?
            .execute()
            .await
    }

    async fn update_menu_item(&self, id: &str, patch: MenuItemPatch) -> ApiResult<MenuItem> {
        self.context
            .put(&format!("/orders/cardapios/{id}"))
            .json(&patch)?
            .execute()
            .await
    }

    async fn delete_menu_item(&self, id: &str) -> ApiResult<()> {
        self.context
            .delete(&format!("/orders/cardapios/{id}"))
            .execute_unit()
            .await
    }

    async fn create(&self, data: RestaurantPatch) -> ApiResult<Restaurant> {
        self.context
            .post("/orders/restaurantes")
            .json(&data)?
            .execute()
            .await
    }

    async fn update(&self, id: &str, patch: RestaurantPatch) -> ApiResult<Restaurant> {
        self.context
            .put(&format!("/orders/restaurantes/{id}"))
            .json(&patch)?
            .execute()
            .await
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        self.context
            .delete(&format!("/orders/restaurantes/{id}"))
            .execute_unit()
            .await
    }
}

struct MockRestaurantsBackend {
    backend: Arc<MockBackend>,
}

#[async_trait]
impl RestaurantsBackend for MockRestaurantsBackend {
    async fn list(&self, params: ListParams) -> ApiResult<PaginatedResponse<Restaurant>> {
        self.backend
            .restaurants()
            .get_restaurants(params.page, params.page_size)
            .await
    }

    async fn get(&self, id: &str) -> ApiResult<Restaurant> {
        self.backend.restaurants().get_restaurant_by_id(id).await
    }

    async fn menu_items(&self, restaurant_id: &str) -> ApiResult<Vec<MenuItem>> {
        self.backend.restaurants().get_menu_items(restaurant_id).await
    }

    async fn create_menu_item(
        &self,
        restaurant_id: &str,
        data: MenuItemPatch,
    ) -> ApiResult<MenuItem> {
        self.backend
            .restaurants()
            .create_menu_item(restaurant_id, data)
            .await
    }

    async fn update_menu_item(&self, id: &str, patch: MenuItemPatch) -> ApiResult<MenuItem> {
        self.backend.restaurants().update_menu_item(id, patch).await
    }

    async fn delete_menu_item(&self, id: &str) -> ApiResult<()> {
        self.backend.restaurants().delete_menu_item(id).await
    }

    async fn create(&self, data: RestaurantPatch) -> ApiResult<Restaurant> {
        self.backend.restaurants().create_restaurant(data).await
    }

    async fn update(&self, id: &str, patch: RestaurantPatch) -> ApiResult<Restaurant> {
        self.backend.restaurants().update_restaurant(id, patch).await
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        self.backend.restaurants().delete_restaurant(id).await
    }
}

/// Facade over the selected restaurant backend.
pub struct RestaurantsApi {
    backend: Arc<dyn RestaurantsBackend>,
}

impl RestaurantsApi {
    pub(crate) fn http(context: HttpContext) -> Self {
        Self {
            backend: Arc::new(HttpRestaurantsBackend { context }),
        }
    }

    pub(crate) fn mock(backend: Arc<MockBackend>) -> Self {
        Self {
            backend: Arc::new(MockRestaurantsBackend { backend }),
        }
    }

    pub async fn get_restaurants(
        &self,
        params: ListParams,
    ) -> ApiResult<PaginatedResponse<Restaurant>> {
        self.backend.list(params).await
    }

    pub async fn get_restaurant_by_id(&self, id: &str) -> ApiResult<Restaurant> {
        self.backend.get(id).await
    }

    pub async fn get_menu_items(&self, restaurant_id: &str) -> ApiResult<Vec<MenuItem>> {
        self.backend.menu_items(restaurant_id).await
    }

    pub async fn create_menu_item(
        &self,
        restaurant_id: &str,
        data: MenuItemPatch,
    ) -> ApiResult<MenuItem> {
        self.backend.create_menu_item(restaurant_id, data).await
    }

    pub async fn update_menu_item(&self, id: &str, patch: MenuItemPatch) -> ApiResult<MenuItem> {
        self.backend.update_menu_item(id, patch).await
    }

    pub async fn delete_menu_item(&self, id: &str) -> ApiResult<()> {
        self.backend.delete_menu_item(id).await
    }

    pub async fn create_restaurant(&self, data: RestaurantPatch) -> ApiResult<Restaurant> {
        self.backend.create(data).await
    }

    pub async fn update_restaurant(
        &self,
        id: &str,
        patch: RestaurantPatch,
    ) -> ApiResult<Restaurant> {
        self.backend.update(id, patch).await
    }

    pub async fn delete_restaurant(&self, id: &str) -> ApiResult<()> {
        self.backend.delete(id).await
    }
}
