//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                            - Liveness
//! GET  /health/ready                      - Readiness (database ping)
//!
//! # Auth
//! POST /api/auth/register                 - Sign up
//! POST /api/auth/login                    - Sign in
//! POST /api/auth/logout                   - Sign out
//! GET  /api/auth/me                       - Current session user
//! POST /api/auth/forgot-password          - Start password reset
//! POST /api/auth/reset-password           - Complete password reset
//!
//! # Account (requires auth)
//! GET  /api/profile                       - Profile
//! GET  /api/orders                        - Order history
//! GET  /api/devices                       - Registered devices
//! POST /api/devices/register              - Claim a device
//! GET  /api/scans/recent                  - Recent scan history
//! GET  /api/appointments                  - Booked appointments
//! POST /api/appointments                  - Book an appointment
//!
//! # Public
//! POST /api/orders                        - Place an order (guest allowed)
//! GET  /api/doctors                       - Doctor directory
//! GET  /api/service-centers               - Service center directory
//! GET  /api/service-centers/{id}          - Service center detail
//! GET  /api/service-centers/{id}/slots    - Slot template
//! ```

pub mod appointments;
pub mod auth;
pub mod devices;
pub mod directory;
pub mod health;
pub mod orders;
pub mod profile;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth API router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .route("/forgot-password", post(auth::forgot_password))
        .route("/reset-password", post(auth::reset_password))
}

/// Create the main API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .route("/profile", get(profile::get_profile))
        .route("/orders", post(orders::place_order).get(orders::list_orders))
        .route("/devices", get(devices::list_devices))
        .route("/devices/register", post(devices::register_device))
        .route("/scans/recent", get(devices::recent_scans))
        .route("/doctors", get(directory::list_doctors))
        .route("/service-centers", get(directory::list_service_centers))
        .route("/service-centers/{id}", get(directory::get_service_center))
        .route("/service-centers/{id}/slots", get(appointments::center_slots))
        .route(
            "/appointments",
            post(appointments::book_appointment).get(appointments::list_appointments),
        )
}

/// Create the health check router.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::ready))
}
