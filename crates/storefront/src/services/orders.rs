//! Checkout workflow.
//!
//! Placing an order performs one required write (the order row) followed by
//! three best-effort steps: confirmation email, profile upsert, and device
//! assignment. A failure in any best-effort step is logged and the order
//! still succeeds; support reconciles stragglers manually.

use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

use nivara_core::{PaymentStatus, UserId};

use crate::db::RepositoryError;
use crate::db::devices::DeviceRepository;
use crate::db::orders::OrderRepository;
use crate::db::profiles::ProfileRepository;
use crate::models::{NewOrder, Order, ProfilePatch};
use crate::services::email::{EmailService, OrderConfirmation};

/// Unit price of the device, in rupees.
pub const DEVICE_PRICE_RUPEES: u32 = 4999;

/// Checkout form as submitted by the buyer.
#[derive(Debug, Clone)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub quantity: u32,
}

/// Result of a successful checkout.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order: Order,
    /// How many devices were auto-assigned from the unowned pool. May be
    /// less than the quantity ordered when the pool runs low.
    pub devices_assigned: u64,
}

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum OrderError {
    /// A required form field is empty.
    #[error("{0}")]
    Validation(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Checkout and order history service.
pub struct OrderService<'a> {
    orders: OrderRepository<'a>,
    profiles: ProfileRepository<'a>,
    devices: DeviceRepository<'a>,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
            profiles: ProfileRepository::new(pool),
            devices: DeviceRepository::new(pool),
        }
    }

    /// Place an order for `form.quantity` devices.
    ///
    /// Payment is captured out of band, so the order is recorded as paid.
    /// After the order row lands, the confirmation email, profile update,
    /// and device assignment each run best-effort.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Validation` naming the first missing form field.
    /// Returns `OrderError::Repository` if the order row cannot be written.
    pub async fn place_order(
        &self,
        user_id: Option<UserId>,
        form: &CheckoutForm,
        mailer: &EmailService,
    ) -> Result<PlacedOrder, OrderError> {
        validate_form(form)?;

        let quantity = form.quantity.max(1);
        let total = order_total(quantity);
        let shipping_address = format_shipping_address(form);

        let order = self
            .orders
            .create(&NewOrder {
                user_id,
                amount_paid: total,
                payment_status: PaymentStatus::Paid,
                shipping_address: shipping_address.clone(),
            })
            .await?;

        tracing::info!(order_id = %order.order_id, quantity, "Order placed");

        // Best-effort step 1: confirmation email.
        let confirmation = OrderConfirmation {
            customer_name: form.name.clone(),
            order_id: order.order_id.to_string(),
            order_date: order.order_date.format("%-d %B %Y").to_string(),
            quantity,
            total: format_rupees(total),
            shipping_address: shipping_address.clone(),
        };
        if let Err(e) = mailer.send_order_confirmation(&form.email, &confirmation).await {
            tracing::warn!(order_id = %order.order_id, error = %e, "Failed to send order confirmation");
        }

        // Best-effort step 2: fold the shipping details into the profile.
        if let Some(user_id) = user_id {
            let patch = ProfilePatch {
                name: Some(form.name.clone()),
                phone: Some(form.phone.clone()),
                address: Some(form.address.clone()),
                city: Some(form.city.clone()),
                pincode: Some(form.pincode.clone()),
            };
            if let Err(e) = self.profiles.upsert(user_id, &patch).await {
                tracing::warn!(order_id = %order.order_id, error = %e, "Failed to update profile from checkout");
            }
        }

        // Best-effort step 3: assign unowned devices to the buyer.
        let devices_assigned = if let Some(user_id) = user_id {
            self.assign_devices(user_id, quantity).await
        } else {
            0
        };

        Ok(PlacedOrder {
            order,
            devices_assigned,
        })
    }

    /// List a user's orders, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Repository` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, OrderError> {
        Ok(self.orders.list_for_user(user_id).await?)
    }

    /// Pull up to `quantity` devices from the unowned pool and assign them.
    /// Never fails the checkout; a short or empty pool just assigns fewer.
    async fn assign_devices(&self, user_id: UserId, quantity: u32) -> u64 {
        let device_ids = match self.devices.find_unassigned(i64::from(quantity)).await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Failed to look up unassigned devices");
                return 0;
            }
        };

        if device_ids.is_empty() {
            tracing::warn!(user_id = %user_id, "No unassigned devices available for auto-assignment");
            return 0;
        }

        match self.devices.assign_many(&device_ids, user_id).await {
            Ok(assigned) => {
                if assigned < u64::from(quantity) {
                    tracing::warn!(
                        user_id = %user_id,
                        assigned,
                        requested = quantity,
                        "Device pool short; assigned fewer than ordered"
                    );
                }
                assigned
            }
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Failed to assign devices");
                0
            }
        }
    }
}

/// Compute the order total for a quantity of devices.
#[must_use]
pub fn order_total(quantity: u32) -> Decimal {
    Decimal::from(DEVICE_PRICE_RUPEES) * Decimal::from(quantity.max(1))
}

/// Format a rupee amount with thousands separators, e.g. "₹9,998".
///
/// Totals are whole rupees, so any fractional part is dropped.
#[must_use]
pub fn format_rupees(amount: Decimal) -> String {
    let digits = amount.trunc().to_string();
    let len = digits.chars().count();
    let mut out = String::with_capacity(digits.len() + len / 3 + '₹'.len_utf8());
    out.push('₹');
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Check every required form field, reporting the first one that is empty.
fn validate_form(form: &CheckoutForm) -> Result<(), OrderError> {
    let fields = [
        ("name", &form.name),
        ("email", &form.email),
        ("phone", &form.phone),
        ("address", &form.address),
        ("city", &form.city),
        ("state", &form.state),
        ("pincode", &form.pincode),
    ];

    for (label, value) in fields {
        if value.trim().is_empty() {
            return Err(OrderError::Validation(format!(
                "Please fill in your {label}"
            )));
        }
    }

    Ok(())
}

/// Join the address parts into the single-line shipping address stored on
/// the order: "address, city, state - pincode".
fn format_shipping_address(form: &CheckoutForm) -> String {
    format!(
        "{}, {}, {} - {}",
        form.address.trim(),
        form.city.trim(),
        form.state.trim(),
        form.pincode.trim()
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_form() -> CheckoutForm {
        CheckoutForm {
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            address: "12 MG Road".to_string(),
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            pincode: "560001".to_string(),
            quantity: 2,
        }
    }

    #[test]
    fn test_order_total_single_device() {
        assert_eq!(order_total(1), Decimal::from(4999));
    }

    #[test]
    fn test_order_total_scales_with_quantity() {
        assert_eq!(order_total(3), Decimal::from(14997));
    }

    #[test]
    fn test_order_total_clamps_zero_quantity() {
        assert_eq!(order_total(0), Decimal::from(4999));
    }

    #[test]
    fn test_format_rupees_groups_thousands() {
        assert_eq!(format_rupees(Decimal::from(999)), "₹999");
        assert_eq!(format_rupees(Decimal::from(9998)), "₹9,998");
        assert_eq!(format_rupees(Decimal::from(499_900)), "₹499,900");
        assert_eq!(format_rupees(Decimal::from(1_234_567)), "₹1,234,567");
    }

    #[test]
    fn test_confirmation_total_is_grouped() {
        assert_eq!(format_rupees(order_total(2)), "₹9,998");
        assert_eq!(format_rupees(order_total(21)), "₹104,979");
    }

    #[test]
    fn test_validate_form_accepts_complete_form() {
        assert!(validate_form(&sample_form()).is_ok());
    }

    #[test]
    fn test_validate_form_names_first_missing_field() {
        let mut form = sample_form();
        form.phone = String::new();
        form.city = String::new();

        let err = validate_form(&form).unwrap_err();
        assert_eq!(err.to_string(), "Please fill in your phone");
    }

    #[test]
    fn test_validate_form_rejects_whitespace_only() {
        let mut form = sample_form();
        form.pincode = "   ".to_string();

        let err = validate_form(&form).unwrap_err();
        assert_eq!(err.to_string(), "Please fill in your pincode");
    }

    #[test]
    fn test_shipping_address_format() {
        let form = sample_form();
        assert_eq!(
            format_shipping_address(&form),
            "12 MG Road, Bengaluru, Karnataka - 560001"
        );
    }
}
