//! Business logic services.
//!
//! Services own the workflows; repositories in [`crate::db`] own the SQL.
//! Each service borrows the pool and is constructed per request.

pub mod appointments;
pub mod auth;
pub mod devices;
pub mod directory;
pub mod email;
pub mod orders;

pub use appointments::{AppointmentError, AppointmentService};
pub use auth::{AuthError, AuthService};
pub use devices::{DeviceError, DeviceService};
pub use email::{EmailError, EmailService, OrderConfirmation};
pub use orders::{CheckoutForm, OrderError, OrderService, PlacedOrder};
