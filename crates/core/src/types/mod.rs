//! Core types for the Nivara storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod device;
pub mod email;
pub mod id;
pub mod status;

pub use device::{DeviceId, DeviceIdError};
pub use email::{Email, EmailError};
pub use id::*;
pub use status::*;
