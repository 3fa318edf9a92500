//! Checkout and order history handlers.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;

use crate::error::Result;
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::services::orders::{CheckoutForm, OrderService};
use crate::state::AppState;

/// Checkout request body.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

/// Place an order. Guests may order; signed-in buyers additionally get
/// profile updates and device auto-assignment.
pub async fn place_order(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Json(payload): Json<PlaceOrderPayload>,
) -> Result<impl IntoResponse> {
    let form = CheckoutForm {
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        address: payload.address,
        city: payload.city,
        state: payload.state,
        pincode: payload.pincode,
        quantity: payload.quantity,
    };

    let orders = OrderService::new(state.pool());
    let placed = orders
        .place_order(user.map(|u| u.id), &form, state.mailer())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "order": placed.order,
            "devices_assigned": placed.devices_assigned,
        })),
    ))
}

/// The signed-in user's order history, most recent first.
pub async fn list_orders(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let orders = OrderService::new(state.pool());
    let history = orders.list_for_user(user.id).await?;

    Ok(Json(json!({ "orders": history })))
}
