//! Scan history domain types.
//!
//! Scans are uploaded by the devices themselves; the storefront only reads
//! them for the dashboard.

use chrono::{DateTime, Utc};
use serde::Serialize;

use nivara_core::{DeviceId, ScanId};

/// A single skin scan taken by a device.
#[derive(Debug, Clone, Serialize)]
pub struct Scan {
    pub scan_id: ScanId,
    pub device_id: DeviceId,
    pub timestamp: DateTime<Utc>,
    pub condition_detected: Option<String>,
    pub confidence_score: Option<f64>,
    pub image_path: Option<String>,
}
