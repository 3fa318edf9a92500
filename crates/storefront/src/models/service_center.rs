//! Service center domain types.

use serde::{Deserialize, Serialize};

use nivara_core::ServiceCenterId;

/// A physical location offering scans and consultations.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceCenter {
    pub id: ServiceCenterId,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub location_lat: Option<f64>,
    pub location_long: Option<f64>,
    pub services: Vec<String>,
    /// Display-only opening hours, stored as-is.
    pub operating_hours: Option<serde_json::Value>,
    pub appointment_slots: AppointmentSlots,
}

/// Daily appointment slot templates, grouped by period.
///
/// Slot values are display labels ("10:00 AM"), not structured times; the
/// uniqueness constraint on bookings compares them as strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentSlots {
    #[serde(default)]
    pub morning: Vec<String>,
    #[serde(default)]
    pub afternoon: Vec<String>,
    #[serde(default)]
    pub evening: Vec<String>,
}

impl AppointmentSlots {
    /// All offerable slots for a day: the union of the period lists, in
    /// template order. No check against existing bookings happens here;
    /// conflicts surface at submission.
    #[must_use]
    pub fn all(&self) -> Vec<String> {
        let mut slots =
            Vec::with_capacity(self.morning.len() + self.afternoon.len() + self.evening.len());
        slots.extend(self.morning.iter().cloned());
        slots.extend(self.afternoon.iter().cloned());
        slots.extend(self.evening.iter().cloned());
        slots
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_union_in_period_order() {
        let slots = AppointmentSlots {
            morning: vec!["9:00 AM".into(), "10:00 AM".into()],
            afternoon: vec!["2:00 PM".into()],
            evening: vec!["6:00 PM".into()],
        };
        assert_eq!(slots.all(), vec!["9:00 AM", "10:00 AM", "2:00 PM", "6:00 PM"]);
    }

    #[test]
    fn test_all_with_empty_template() {
        assert!(AppointmentSlots::default().all().is_empty());
    }

    #[test]
    fn test_deserialize_with_missing_periods() {
        let slots: AppointmentSlots =
            serde_json::from_str(r#"{"morning": ["9:00 AM"]}"#).unwrap();
        assert_eq!(slots.morning, vec!["9:00 AM"]);
        assert!(slots.afternoon.is_empty());
        assert!(slots.evening.is_empty());
    }
}
