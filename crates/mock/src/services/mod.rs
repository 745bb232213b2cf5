//! Mock domain services, one per BFF resource family.
//!
//! Every network-simulating call sleeps briefly so calling code
//! exercises the same asynchronous loading states as the real backend.

pub mod auth;
pub mod deliveries;
pub mod notifications;
pub mod orders;
pub mod rentals;
pub mod restaurants;
pub mod users;
pub mod vehicles;

use std::time::Duration;

pub(crate) const SIMULATED_LATENCY: Duration = Duration::from_millis(300);
pub(crate) const AUTH_LATENCY: Duration = Duration::from_millis(500);

pub(crate) async fn simulate_delay() {
    tokio::time::sleep(SIMULATED_LATENCY).await;
}

pub(crate) async fn simulate_auth_delay() {
    tokio::time::sleep(AUTH_LATENCY).await;
}
