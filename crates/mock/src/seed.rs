//! Seed data and entity generators for the mock backend.

use chrono::{Duration, Utc};
use uuid::Uuid;

use clickdelivery_core::models::{
    Delivery, DeliveryStatus, MenuItem, Order, OrderItem, OrderStatus, Rental, RentalStatus,
    Restaurant, User, Vehicle, VehicleStatus, VehicleType,
};

/// Delivery fee applied to mock orders.
pub const DEFAULT_DELIVERY_FEE: f64 = 4.99;

pub fn default_restaurants() -> Vec<Restaurant> {
    let now = Utc::now();
    vec![
        Restaurant {
            id: "rest-1".into(),
            name: "Italian Bistro".into(),
            description: "Authentic Italian cuisine".into(),
            cuisine: "Italian".into(),
            address: "123 Main St, City".into(),
            phone: "555-0101".into(),
            rating: 4.5,
            image_url: None,
            is_open: true,
            delivery_time: "30-45 min".into(),
            delivery_fee: 5.99,
            created_at: now,
            updated_at: now,
        },
        Restaurant {
            id: "rest-2".into(),
            name: "Sushi Paradise".into(),
            description: "Fresh sushi and Japanese dishes".into(),
            cuisine: "Japanese".into(),
            address: "456 Oak Ave, City".into(),
            phone: "555-0102".into(),
            rating: 4.8,
            image_url: None,
            is_open: true,
            delivery_time: "25-35 min".into(),
            delivery_fee: 4.99,
            created_at: now,
            updated_at: now,
        },
        Restaurant {
            id: "rest-3".into(),
            name: "Burger House".into(),
            description: "Gourmet burgers and fries".into(),
            cuisine: "American".into(),
            address: "789 Pine Rd, City".into(),
            phone: "555-0103".into(),
            rating: 4.2,
            image_url: None,
            is_open: true,
            delivery_time: "20-30 min".into(),
            delivery_fee: 3.99,
            created_at: now,
            updated_at: now,
        },
    ]
}

pub fn default_menu_items() -> Vec<MenuItem> {
    let item = |id: &str, restaurant_id: &str, name: &str, description: &str, price, category: &str| MenuItem {
        id: id.into(),
        restaurant_id: restaurant_id.into(),
        name: name.into(),
        description: description.into(),
        price,
        category: category.into(),
        image_url: None,
        available: true,
    };
    vec![
        item("menu-1", "rest-1", "Margherita Pizza", "Classic tomato and mozzarella", 12.99, "Pizza"),
        item("menu-2", "rest-1", "Pasta Carbonara", "Creamy pasta with bacon", 14.99, "Pasta"),
        item("menu-3", "rest-2", "California Roll", "8 pieces of California roll", 8.99, "Sushi"),
        item("menu-4", "rest-2", "Salmon Sashimi", "Fresh salmon sashimi", 15.99, "Sashimi"),
        item("menu-5", "rest-3", "Classic Burger", "Beef patty with lettuce and tomato", 9.99, "Burgers"),
        item("menu-6", "rest-3", "French Fries", "Crispy golden fries", 3.99, "Sides"),
    ]
}

pub fn default_vehicles() -> Vec<Vehicle> {
    let now = Utc::now();
    let vehicle = |id: &str, vehicle_type, brand: &str, model: &str, year, plate: &str, price| Vehicle {
        id: id.into(),
        owner_id: "owner-1".into(),
        vehicle_type,
        brand: brand.into(),
        model: model.into(),
        year,
        license_plate: plate.into(),
        status: VehicleStatus::Available,
        price_per_day: price,
        created_at: now,
        updated_at: now,
    };
    vec![
        vehicle("vehicle-1", VehicleType::Bike, "Honda", "CG 160", 2023, "ABC-1234", 50.0),
        vehicle("vehicle-2", VehicleType::Motorcycle, "Yamaha", "Fazer 250", 2022, "XYZ-5678", 65.0),
        vehicle("vehicle-3", VehicleType::Car, "Fiat", "Uno", 2021, "DEF-9012", 80.0),
    ]
}

/// Seed users for every role; passwords are `<role>123`.
pub fn default_users() -> Vec<(User, String)> {
    let now = Utc::now();
    let user = |id: &str, email: &str, name: &str, phone: &str, role: &str| User {
        id: id.into(),
        email: email.into(),
        name: name.into(),
        phone: Some(phone.into()),
        roles: vec![role.into()],
        created_at: now,
        updated_at: now,
    };
    vec![
        (user("admin-1", "admin@clickdelivery.com", "Admin User", "555-0000", "admin"), "admin123".into()),
        (user("customer-1", "customer@example.com", "Test Customer", "555-0001", "customer"), "customer123".into()),
        (user("restaurant-1", "restaurant@example.com", "Test Restaurant", "555-0002", "restaurant"), "restaurant123".into()),
        (user("courier-1", "courier@example.com", "Test Courier", "555-0003", "courier"), "courier123".into()),
        (user("owner-1", "owner@example.com", "Test Owner", "555-0004", "owner"), "owner123".into()),
    ]
}

pub fn new_order(
    customer_id: &str,
    restaurant_id: &str,
    restaurant_name: &str,
    items: Vec<OrderItem>,
    delivery_address: &str,
    notes: Option<String>,
) -> Order {
    let now = Utc::now();
    let subtotal: f64 = items.iter().map(|i| i.price * i.quantity as f64).sum();
    Order {
        id: Uuid::new_v4().to_string(),
        customer_id: customer_id.into(),
        restaurant_id: restaurant_id.into(),
        restaurant_name: restaurant_name.into(),
        courier_id: None,
        items,
        status: OrderStatus::Pending,
        subtotal,
        delivery_fee: DEFAULT_DELIVERY_FEE,
        total: subtotal + DEFAULT_DELIVERY_FEE,
        delivery_address: delivery_address.into(),
        notes,
        estimated_delivery_time: Some(now + Duration::minutes(45)),
        created_at: now,
        updated_at: now,
    }
}

pub fn new_delivery(order_id: &str, courier_id: &str) -> Delivery {
    let now = Utc::now();
    Delivery {
        id: Uuid::new_v4().to_string(),
        order_id: order_id.into(),
        courier_id: courier_id.into(),
        vehicle_id: None,
        status: DeliveryStatus::Assigned,
        pickup_address: "123 Restaurant St".into(),
        delivery_address: "456 Customer Ave".into(),
        distance: Some(5.2),
        earnings: Some(8.5),
        pickup_time: None,
        delivery_time: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn new_rental(
    vehicle_id: &str,
    courier_id: &str,
    start_date: chrono::DateTime<Utc>,
    end_date: chrono::DateTime<Utc>,
    price_per_day: f64,
) -> Rental {
    let now = Utc::now();
    // Partial days count as whole rental days; minimum one.
    let total_days = ((end_date - start_date).num_days().max(0) as u32).max(1);
    Rental {
        id: Uuid::new_v4().to_string(),
        vehicle_id: vehicle_id.into(),
        courier_id: courier_id.into(),
        status: RentalStatus::Pending,
        start_date,
        end_date,
        total_days,
        price_per_day,
        total_price: total_days as f64 * price_per_day,
        created_at: now,
        updated_at: now,
    }
}
