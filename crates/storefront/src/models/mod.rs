//! Domain types for the storefront.
//!
//! These are validated domain objects, separate from the raw row types the
//! repositories read out of Postgres.

pub mod appointment;
pub mod device;
pub mod doctor;
pub mod order;
pub mod profile;
pub mod scan;
pub mod service_center;
pub mod session;
pub mod user;

pub use appointment::{Appointment, NewAppointment};
pub use device::Device;
pub use doctor::Doctor;
pub use order::{NewOrder, Order};
pub use profile::{Profile, ProfilePatch};
pub use scan::Scan;
pub use service_center::{AppointmentSlots, ServiceCenter};
pub use session::{CurrentUser, session_keys};
pub use user::User;
