//! Order domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use nivara_core::{DeviceId, OrderId, PaymentStatus, UserId};

/// A purchase record for one or more devices.
///
/// Orders are independent of device assignment: `device_id` stays null at
/// creation and may be filled in later.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub order_id: OrderId,
    /// Owning account; null for guest checkouts.
    pub user_id: Option<UserId>,
    pub device_id: Option<DeviceId>,
    /// Total captured at creation time (unit price x quantity); never
    /// recomputed afterwards.
    pub amount_paid: Decimal,
    pub payment_status: PaymentStatus,
    pub shipping_address: Option<String>,
    pub order_date: DateTime<Utc>,
}

/// Fields for creating an order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: Option<UserId>,
    pub amount_paid: Decimal,
    pub payment_status: PaymentStatus,
    pub shipping_address: String,
}
