//! Order repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use nivara_core::{DeviceId, OrderId, PaymentStatus, UserId};

use super::RepositoryError;
use crate::models::{NewOrder, Order};

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    order_id: OrderId,
    user_id: Option<UserId>,
    device_id: Option<DeviceId>,
    amount_paid: Decimal,
    payment_status: String,
    shipping_address: Option<String>,
    order_date: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let payment_status: PaymentStatus = row
            .payment_status
            .parse()
            .map_err(RepositoryError::DataCorruption)?;

        Ok(Self {
            order_id: row.order_id,
            user_id: row.user_id,
            device_id: row.device_id,
            amount_paid: row.amount_paid,
            payment_status,
            shipping_address: row.shipping_address,
            order_date: row.order_date,
        })
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an order record.
    ///
    /// This is the primary write of the checkout workflow; everything after
    /// it (email, profile, device assignment) is best-effort.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, order: &NewOrder) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO storefront.orders (user_id, amount_paid, payment_status, shipping_address)
            VALUES ($1, $2, $3, $4)
            RETURNING order_id, user_id, device_id, amount_paid, payment_status,
                      shipping_address, order_date
            ",
        )
        .bind(order.user_id)
        .bind(order.amount_paid)
        .bind(order.payment_status.to_string())
        .bind(&order.shipping_address)
        .fetch_one(self.pool)
        .await?;

        Order::try_from(row)
    }

    /// List a user's orders, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT order_id, user_id, device_id, amount_paid, payment_status,
                   shipping_address, order_date
            FROM storefront.orders
            WHERE user_id = $1
            ORDER BY order_date DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }
}
