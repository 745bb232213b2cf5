//! Mock restaurant and menu service.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use clickdelivery_core::models::{
    MenuItem, MenuItemPatch, PaginatedResponse, Restaurant, RestaurantPatch,
};
use clickdelivery_core::{ApiError, ApiResult};

use crate::paginate::paginate;
use crate::seed::{default_menu_items, default_restaurants};
use crate::services::simulate_delay;
use crate::store::Store;

#[derive(Clone)]
pub struct MockRestaurantService {
    restaurants: Arc<Store<Restaurant>>,
    menu_items: Arc<Store<MenuItem>>,
}

impl MockRestaurantService {
    pub fn new(restaurants: Arc<Store<Restaurant>>, menu_items: Arc<Store<MenuItem>>) -> Self {
        if restaurants.is_empty() {
            for restaurant in default_restaurants() {
                let id = restaurant.id.clone();
                restaurants.set(&id, restaurant);
            }
        }
        if menu_items.is_empty() {
            for item in default_menu_items() {
                let id = item.id.clone();
                menu_items.set(&id, item);
            }
        }
        Self {
            restaurants,
            menu_items,
        }
    }

    pub async fn get_restaurants(
        &self,
        page: Option<usize>,
        page_size: Option<usize>,
    ) -> ApiResult<PaginatedResponse<Restaurant>> {
        simulate_delay().await;
        Ok(paginate(&self.restaurants.get_all(), page, page_size))
    }

    pub async fn get_restaurant_by_id(&self, id: &str) -> ApiResult<Restaurant> {
        simulate_delay().await;
        self.restaurants
            .get(id)
            .ok_or_else(|| ApiError::not_found("Restaurant not found"))
    }

    pub async fn create_restaurant(&self, data: RestaurantPatch) -> ApiResult<Restaurant> {
        simulate_delay().await;
        let now = Utc::now();
        let restaurant = Restaurant {
            id: Uuid::new_v4().to_string(),
            name: data.name.unwrap_or_else(|| "New Restaurant".to_string()),
            description: data.description.unwrap_or_else(|| "A new restaurant".to_string()),
            cuisine: data.cuisine.unwrap_or_else(|| "International".to_string()),
            address: data.address.unwrap_or_else(|| "123 Test St".to_string()),
            phone: data.phone.unwrap_or_else(|| "555-0100".to_string()),
            rating: data.rating.unwrap_or(4.0),
            image_url: data.image_url,
            is_open: data.is_open.unwrap_or(true),
            delivery_time: data.delivery_time.unwrap_or_else(|| "30-45 min".to_string()),
            delivery_fee: data.delivery_fee.unwrap_or(4.99),
            created_at: now,
            updated_at: now,
        };
        self.restaurants.set(&restaurant.id, restaurant.clone());
        Ok(restaurant)
    }

    pub async fn update_restaurant(&self, id: &str, patch: RestaurantPatch) -> ApiResult<Restaurant> {
        simulate_delay().await;
        self.restaurants
            .update(id, |restaurant| {
                if let Some(name) = patch.name {
                    restaurant.name = name;
                }
                if let Some(description) = patch.description {
                    restaurant.description = description;
                }
                if let Some(cuisine) = patch.cuisine {
                    restaurant.cuisine = cuisine;
                }
                if let Some(address) = patch.address {
                    restaurant.address = address;
                }
                if let Some(phone) = patch.phone {
                    restaurant.phone = phone;
                }
                if let Some(rating) = patch.rating {
                    restaurant.rating = rating;
                }
                if let Some(image_url) = patch.image_url {
                    restaurant.image_url = Some(image_url);
                }
                if let Some(is_open) = patch.is_open {
                    restaurant.is_open = is_open;
                }
                if let Some(delivery_time) = patch.delivery_time {
                    restaurant.delivery_time = delivery_time;
                }
                if let Some(delivery_fee) = patch.delivery_fee {
                    restaurant.delivery_fee = delivery_fee;
                }
                restaurant.updated_at = Utc::now();
            })
            .ok_or_else(|| ApiError::not_found("Restaurant not found"))
    }

    /// Deletes a restaurant and cascades to its menu items.
    pub async fn delete_restaurant(&self, id: &str) -> ApiResult<()> {
        simulate_delay().await;
        if !self.restaurants.delete(id) {
            return Err(ApiError::not_found("Restaurant not found"));
        }
        let orphaned: Vec<String> = self
            .menu_items
            .get_all()
            .into_iter()
            .filter(|item| item.restaurant_id == id)
            .map(|item| item.id)
            .collect();
        for item_id in orphaned {
            self.menu_items.delete(&item_id);
        }
        Ok(())
    }

    pub async fn get_menu_items(&self, restaurant_id: &str) -> ApiResult<Vec<MenuItem>> {
        simulate_delay().await;
        Ok(self
            .menu_items
            .get_all()
            .into_iter()
            .filter(|item| item.restaurant_id == restaurant_id)
            .collect())
    }

    pub async fn get_menu_item_by_id(&self, id: &str) -> ApiResult<MenuItem> {
        simulate_delay().await;
        self.menu_items
            .get(id)
            .ok_or_else(|| ApiError::not_found("Menu item not found"))
    }

    pub async fn create_menu_item(
        &self,
        restaurant_id: &str,
        data: MenuItemPatch,
    ) -> ApiResult<MenuItem> {
        simulate_delay().await;
        let item = MenuItem {
            id: Uuid::new_v4().to_string(),
            restaurant_id: restaurant_id.to_string(),
            name: data.name.unwrap_or_else(|| "New Menu Item".to_string()),
            description: data.description.unwrap_or_else(|| "Delicious dish".to_string()),
            price: data.price.unwrap_or(10.99),
            category: data.category.unwrap_or_else(|| "Main".to_string()),
            image_url: data.image_url,
            available: data.available.unwrap_or(true),
        };
        self.menu_items.set(&item.id, item.clone());
        Ok(item)
    }

    /// The owning restaurant of a menu item never changes.
    pub async fn update_menu_item(&self, id: &str, patch: MenuItemPatch) -> ApiResult<MenuItem> {
        simulate_delay().await;
        self.menu_items
            .update(id, |item| {
                if let Some(name) = patch.name {
                    item.name = name;
                }
                if let Some(description) = patch.description {
                    item.description = description;
                }
                if let Some(price) = patch.price {
                    item.price = price;
                }
                if let Some(category) = patch.category {
                    item.category = category;
                }
                if let Some(image_url) = patch.image_url {
                    item.image_url = Some(image_url);
                }
                if let Some(available) = patch.available {
                    item.available = available;
                }
            })
            .ok_or_else(|| ApiError::not_found("Menu item not found"))
    }

    pub async fn delete_menu_item(&self, id: &str) -> ApiResult<()> {
        simulate_delay().await;
        if !self.menu_items.delete(id) {
            return Err(ApiError::not_found("Menu item not found"));
        }
        Ok(())
    }

    pub fn get_all_restaurants(&self) -> Vec<Restaurant> {
        self.restaurants.get_all()
    }

    pub fn get_all_menu_items(&self) -> Vec<MenuItem> {
        self.menu_items.get_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> MockRestaurantService {
        MockRestaurantService::new(
            Arc::new(Store::new("restaurants", None)),
            Arc::new(Store::new("menu_items", None)),
        )
    }

    #[tokio::test]
    async fn seeds_default_catalogue() {
        let svc = service();
        let page = svc.get_restaurants(None, None).await.unwrap();
        assert_eq!(page.total, 3);
        let menu = svc.get_menu_items("rest-1").await.unwrap();
        assert_eq!(menu.len(), 2);
    }

    #[tokio::test]
    async fn deleting_a_restaurant_cascades_to_menu_items() {
        let svc = service();
        let restaurant = svc
            .create_restaurant(RestaurantPatch {
                name: Some("Short-lived".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        let first = svc
            .create_menu_item(&restaurant.id, MenuItemPatch::default())
            .await
            .unwrap();
        let second = svc
            .create_menu_item(&restaurant.id, MenuItemPatch::default())
            .await
            .unwrap();

        svc.delete_restaurant(&restaurant.id).await.unwrap();

        let err = svc.get_restaurant_by_id(&restaurant.id).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(svc.get_menu_item_by_id(&first.id).await.unwrap_err().is_not_found());
        assert!(svc.get_menu_item_by_id(&second.id).await.unwrap_err().is_not_found());
        // Other restaurants' items survive.
        assert_eq!(svc.get_menu_items("rest-1").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn menu_item_update_keeps_restaurant() {
        let svc = service();
        let updated = svc
            .update_menu_item(
                "menu-1",
                MenuItemPatch {
                    price: Some(13.99),
                    available: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.restaurant_id, "rest-1");
        assert_eq!(updated.price, 13.99);
        assert!(!updated.available);
    }

    #[tokio::test]
    async fn missing_restaurant_is_not_found() {
        let svc = service();
        let err = svc.get_restaurant_by_id("nope").await.unwrap_err();
        assert_eq!(err.error, "NOT_FOUND");
        assert_eq!(err.status_code, 404);
    }
}
