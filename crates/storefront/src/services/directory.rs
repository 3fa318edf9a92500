//! Directory search over doctors and service centers.
//!
//! The directories are small enough to filter in memory after a full fetch,
//! so matching is a plain case-insensitive substring check rather than a
//! database text search. `search` matches who/what (name, specialization,
//! hospital), `location` matches where (address, city).

use crate::models::{Doctor, ServiceCenter};

/// Filter doctors by free-text `search` (name, specialization, hospital)
/// and `location` (address). Empty filters match everything.
#[must_use]
pub fn filter_doctors(doctors: Vec<Doctor>, search: &str, location: &str) -> Vec<Doctor> {
    let search = search.trim().to_lowercase();
    let location = location.trim().to_lowercase();

    doctors
        .into_iter()
        .filter(|d| {
            let search_hit = search.is_empty()
                || contains(&d.name, &search)
                || opt_contains(d.specialization.as_deref(), &search)
                || opt_contains(d.hospital.as_deref(), &search);
            let location_hit =
                location.is_empty() || opt_contains(d.address.as_deref(), &location);
            search_hit && location_hit
        })
        .collect()
}

/// Filter service centers by free-text `search` (name, offered services)
/// and `location` (city, address). Empty filters match everything.
#[must_use]
pub fn filter_centers(
    centers: Vec<ServiceCenter>,
    search: &str,
    location: &str,
) -> Vec<ServiceCenter> {
    let search = search.trim().to_lowercase();
    let location = location.trim().to_lowercase();

    centers
        .into_iter()
        .filter(|c| {
            let search_hit = search.is_empty()
                || contains(&c.name, &search)
                || c.services.iter().any(|s| contains(s, &search));
            let location_hit = location.is_empty()
                || opt_contains(c.city.as_deref(), &location)
                || opt_contains(c.address.as_deref(), &location);
            search_hit && location_hit
        })
        .collect()
}

fn contains(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn opt_contains(haystack: Option<&str>, needle_lower: &str) -> bool {
    haystack.is_some_and(|h| contains(h, needle_lower))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use nivara_core::{DoctorId, ServiceCenterId};

    use crate::models::AppointmentSlots;

    fn doctor(name: &str, specialization: Option<&str>, address: Option<&str>) -> Doctor {
        Doctor {
            doctor_id: DoctorId::generate(),
            name: name.to_string(),
            specialization: specialization.map(str::to_string),
            hospital: None,
            address: address.map(str::to_string),
            phone: None,
            location_lat: None,
            location_long: None,
            website: None,
        }
    }

    fn center(name: &str, city: Option<&str>, services: &[&str]) -> ServiceCenter {
        ServiceCenter {
            id: ServiceCenterId::generate(),
            name: name.to_string(),
            address: None,
            city: city.map(str::to_string),
            phone: None,
            email: None,
            location_lat: None,
            location_long: None,
            services: services.iter().map(|s| (*s).to_string()).collect(),
            operating_hours: None,
            appointment_slots: AppointmentSlots::default(),
        }
    }

    #[test]
    fn test_filter_doctors_empty_filters_match_all() {
        let doctors = vec![
            doctor("Dr. Mehta", None, None),
            doctor("Dr. Iyer", None, None),
        ];
        assert_eq!(filter_doctors(doctors, "  ", "").len(), 2);
    }

    #[test]
    fn test_filter_doctors_by_name_case_insensitive() {
        let doctors = vec![
            doctor("Dr. Mehta", None, None),
            doctor("Dr. Iyer", None, None),
        ];
        let matched = filter_doctors(doctors, "MEHTA", "");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched.first().unwrap().name, "Dr. Mehta");
    }

    #[test]
    fn test_filter_doctors_by_specialization() {
        let doctors = vec![
            doctor("Dr. Mehta", Some("Dermatology"), None),
            doctor("Dr. Iyer", Some("Cardiology"), None),
        ];
        assert_eq!(filter_doctors(doctors, "derma", "").len(), 1);
    }

    #[test]
    fn test_filter_doctors_by_location() {
        let doctors = vec![
            doctor("Dr. Mehta", None, Some("Indiranagar, Bengaluru")),
            doctor("Dr. Iyer", None, Some("Andheri, Mumbai")),
        ];
        let matched = filter_doctors(doctors, "", "bengaluru");
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn test_filter_doctors_combines_search_and_location() {
        let doctors = vec![
            doctor("Dr. Mehta", Some("Dermatology"), Some("Bengaluru")),
            doctor("Dr. Rao", Some("Dermatology"), Some("Mumbai")),
        ];
        let matched = filter_doctors(doctors, "dermatology", "mumbai");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched.first().unwrap().name, "Dr. Rao");
    }

    #[test]
    fn test_filter_centers_by_city() {
        let centers = vec![
            center("Nivara Care Indiranagar", Some("Bengaluru"), &[]),
            center("Nivara Care Andheri", Some("Mumbai"), &[]),
        ];
        let matched = filter_centers(centers, "", "bengaluru");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched.first().unwrap().name, "Nivara Care Indiranagar");
    }

    #[test]
    fn test_filter_centers_by_offered_service() {
        let centers = vec![
            center("Nivara Care Indiranagar", None, &["Skin Scan", "Consultation"]),
            center("Nivara Care Andheri", None, &["Consultation"]),
        ];
        assert_eq!(filter_centers(centers, "skin", "").len(), 1);
    }

    #[test]
    fn test_filter_centers_no_match() {
        let centers = vec![center("Nivara Care Indiranagar", Some("Bengaluru"), &[])];
        assert!(filter_centers(centers, "", "chennai").is_empty());
    }
}
