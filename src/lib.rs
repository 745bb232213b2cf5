//! ClickDelivery Rust Client Library
//!
//! A Rust client for the ClickDelivery platform. The same typed API
//! runs against the real backend-for-frontend over HTTP or against an
//! in-process mock backend with seeded data, selected once at
//! construction.

pub mod auth;
pub mod config;
pub mod deliveries;
pub mod fetch;
pub mod notifications;
pub mod orders;
pub mod rentals;
pub mod restaurants;
pub mod users;
pub mod vehicles;

use std::sync::Arc;

use reqwest::Client;

use clickdelivery_core::SessionStore;
use clickdelivery_mock::MockBackend;

use crate::auth::AuthApi;
use crate::config::{BackendMode, ClientOptions};
use crate::deliveries::DeliveriesApi;
use crate::fetch::HttpContext;
use crate::notifications::NotificationsApi;
use crate::orders::OrdersApi;
use crate::rentals::RentalsApi;
use crate::restaurants::RestaurantsApi;
use crate::users::UsersApi;
use crate::vehicles::VehiclesApi;

pub use clickdelivery_core::{ApiError, ApiResult, Cart};
pub use clickdelivery_core::models;

/// The main entry point for the ClickDelivery client
pub struct ClickDelivery {
    /// The base URL of the backend-for-frontend
    pub base_url: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Client options
    pub options: ClientOptions,
    session: Arc<SessionStore>,
    mock: Option<Arc<MockBackend>>,
}

impl ClickDelivery {
    /// Create a new client against the real backend
    ///
    /// # Example
    ///
    /// ```
    /// use clickdelivery_rust::ClickDelivery;
    ///
    /// let client = ClickDelivery::new("https://bff.clickdelivery.example");
    /// ```
    pub fn new(base_url: &str) -> Self {
        Self::new_with_options(base_url, ClientOptions::default())
    }

    /// Create a new client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use clickdelivery_rust::{ClickDelivery, config::ClientOptions};
    ///
    /// let options = ClientOptions::default().with_mock_backend();
    /// let client = ClickDelivery::new_with_options("https://bff.clickdelivery.example", options);
    /// ```
    pub fn new_with_options(base_url: &str, options: ClientOptions) -> Self {
        let http_client = Client::new();
        let session = Arc::new(match &options.data_dir {
            Some(dir) => SessionStore::with_dir(dir),
            None => SessionStore::new(),
        });

        let mock = match options.backend_mode {
            BackendMode::Mock => Some(Arc::new(MockBackend::new(
                session.clone(),
                options.data_dir.clone(),
            ))),
            BackendMode::Real => None,
        };

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
            options,
            session,
            mock,
        }
    }

    fn http_context(&self) -> HttpContext {
        HttpContext::new(
            &self.base_url,
            self.http_client.clone(),
            self.session.clone(),
            self.options.request_timeout,
        )
    }

    /// Get the auth API for login, registration and session state
    pub fn auth(&self) -> AuthApi {
        match &self.mock {
            Some(mock) => AuthApi::mock(mock.clone(), self.session.clone()),
            None => AuthApi::http(self.http_context()),
        }
    }

    /// Get the user profile API
    pub fn users(&self) -> UsersApi {
        match &self.mock {
            Some(mock) => UsersApi::mock(mock.clone()),
            None => UsersApi::http(self.http_context()),
        }
    }

    /// Get the restaurant catalog and menu API
    pub fn restaurants(&self) -> RestaurantsApi {
        match &self.mock {
            Some(mock) => RestaurantsApi::mock(mock.clone()),
            None => RestaurantsApi::http(self.http_context()),
        }
    }

    /// Get the order API
    pub fn orders(&self) -> OrdersApi {
        match &self.mock {
            Some(mock) => OrdersApi::mock(mock.clone()),
            None => OrdersApi::http(self.http_context()),
        }
    }

    /// Get the delivery API
    pub fn deliveries(&self) -> DeliveriesApi {
        match &self.mock {
            Some(mock) => DeliveriesApi::mock(mock.clone()),
            None => DeliveriesApi::http(self.http_context()),
        }
    }

    /// Get the vehicle fleet API
    pub fn vehicles(&self) -> VehiclesApi {
        match &self.mock {
            Some(mock) => VehiclesApi::mock(mock.clone()),
            None => VehiclesApi::http(self.http_context()),
        }
    }

    /// Get the rental API
    pub fn rentals(&self) -> RentalsApi {
        match &self.mock {
            Some(mock) => RentalsApi::mock(mock.clone()),
            None => RentalsApi::http(self.http_context()),
        }
    }

    /// Get the notification API
    pub fn notifications(&self) -> NotificationsApi {
        match &self.mock {
            Some(mock) => NotificationsApi::mock(mock.clone()),
            None => NotificationsApi::http(self.http_context()),
        }
    }

    /// Session state shared by every API: tokens, correlation id, cart
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::{BackendMode, ClientOptions};
    pub use crate::ClickDelivery;
    pub use clickdelivery_core::{ApiError, ApiResult, Cart, SessionStore};
    pub use clickdelivery_roles::guards::{AuthState, RouteDecision};
    pub use clickdelivery_roles::{get_primary_dashboard_path, get_user_roles};
}
