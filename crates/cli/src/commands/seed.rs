//! Seed the database with demo data.
//!
//! Loads a small device pool, a handful of doctors, and service centers
//! with slot templates. Inserts use `ON CONFLICT DO NOTHING`, so running
//! the command twice is harmless unless `--replace` is passed.

use serde_json::json;
use sqlx::PgPool;
use tracing::info;

use super::{CommandError, connect};

/// Unowned devices added to the assignment pool.
const DEVICE_IDS: &[&str] = &[
    "NIV-2026-00001",
    "NIV-2026-00002",
    "NIV-2026-00003",
    "NIV-2026-00004",
    "NIV-2026-00005",
    "NIV-2026-00006",
    "NIV-2026-00007",
    "NIV-2026-00008",
];

/// Seed demo data.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn run(replace: bool) -> Result<(), CommandError> {
    let pool = connect().await?;

    if replace {
        info!("Clearing existing seed data...");
        sqlx::query("DELETE FROM storefront.devices WHERE user_id IS NULL")
            .execute(&pool)
            .await?;
        sqlx::query("DELETE FROM storefront.doctors").execute(&pool).await?;
        sqlx::query("DELETE FROM storefront.service_centers")
            .execute(&pool)
            .await?;
    }

    seed_devices(&pool).await?;
    seed_doctors(&pool).await?;
    seed_service_centers(&pool).await?;

    info!("Seeding complete!");
    Ok(())
}

async fn seed_devices(pool: &PgPool) -> Result<(), CommandError> {
    for device_id in DEVICE_IDS {
        sqlx::query(
            r"
            INSERT INTO storefront.devices (device_id, status)
            VALUES ($1, 'inactive')
            ON CONFLICT (device_id) DO NOTHING
            ",
        )
        .bind(device_id)
        .execute(pool)
        .await?;
    }

    info!(count = DEVICE_IDS.len(), "Device pool seeded");
    Ok(())
}

async fn seed_doctors(pool: &PgPool) -> Result<(), CommandError> {
    let doctors = [
        (
            "Dr. Priya Mehta",
            "Dermatology",
            "Apollo Clinic",
            "Indiranagar, Bengaluru",
            "+91 80 4111 2222",
            Some("https://apolloclinic.example/mehta"),
        ),
        (
            "Dr. Arjun Iyer",
            "Dermatology",
            "Fortis Hospital",
            "Bannerghatta Road, Bengaluru",
            "+91 80 6621 4444",
            None,
        ),
        (
            "Dr. Kavita Rao",
            "Oncology",
            "Tata Memorial Centre",
            "Parel, Mumbai",
            "+91 22 2417 7000",
            Some("https://tmc.example/rao"),
        ),
        (
            "Dr. Suresh Nair",
            "Dermatology",
            "AIIMS",
            "Ansari Nagar, New Delhi",
            "+91 11 2658 8500",
            None,
        ),
    ];

    for (name, specialization, hospital, address, phone, website) in doctors {
        sqlx::query(
            r"
            INSERT INTO storefront.doctors (name, specialization, hospital, address, phone, website)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT DO NOTHING
            ",
        )
        .bind(name)
        .bind(specialization)
        .bind(hospital)
        .bind(address)
        .bind(phone)
        .bind(website)
        .execute(pool)
        .await?;
    }

    info!("Doctors seeded");
    Ok(())
}

async fn seed_service_centers(pool: &PgPool) -> Result<(), CommandError> {
    let slots = json!({
        "morning": ["9:00 AM", "10:00 AM", "11:00 AM"],
        "afternoon": ["1:00 PM", "2:00 PM", "3:00 PM", "4:00 PM"],
        "evening": ["6:00 PM", "7:00 PM"],
    });
    let hours = json!({
        "weekdays": "9:00 AM - 8:00 PM",
        "saturday": "9:00 AM - 5:00 PM",
        "sunday": "Closed",
    });

    let centers = [
        (
            "Nivara Care Indiranagar",
            "100 Feet Road, Indiranagar",
            "Bengaluru",
            "+91 80 4333 1100",
            "indiranagar@nivara.com",
        ),
        (
            "Nivara Care Andheri",
            "Veera Desai Road, Andheri West",
            "Mumbai",
            "+91 22 2673 4400",
            "andheri@nivara.com",
        ),
        (
            "Nivara Care Anna Nagar",
            "2nd Avenue, Anna Nagar",
            "Chennai",
            "+91 44 2626 8800",
            "annanagar@nivara.com",
        ),
    ];

    for (name, address, city, phone, email) in centers {
        sqlx::query(
            r"
            INSERT INTO storefront.service_centers
                (name, address, city, phone, email, services, operating_hours, appointment_slots)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT DO NOTHING
            ",
        )
        .bind(name)
        .bind(address)
        .bind(city)
        .bind(phone)
        .bind(email)
        .bind(vec![
            "Skin Scan".to_string(),
            "Device Setup".to_string(),
            "Consultation".to_string(),
        ])
        .bind(sqlx::types::Json(&hours))
        .bind(sqlx::types::Json(&slots))
        .execute(pool)
        .await?;
    }

    info!("Service centers seeded");
    Ok(())
}
