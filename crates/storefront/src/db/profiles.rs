//! Profile repository.
//!
//! Profiles are written exclusively through upserts; there is no explicit
//! create or delete path in the storefront.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use nivara_core::{ProfileId, UserId};

use super::RepositoryError;
use crate::models::{Profile, ProfilePatch};

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: ProfileId,
    user_id: UserId,
    name: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    city: Option<String>,
    pincode: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            phone: row.phone,
            address: row.address,
            city: row.city,
            pincode: row.pincode,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for profile database operations.
pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    /// Create a new profile repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the profile for a user, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_user(&self, user_id: UserId) -> Result<Option<Profile>, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r"
            SELECT id, user_id, name, phone, address, city, pincode, created_at, updated_at
            FROM storefront.profiles
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Profile::from))
    }

    /// Upsert the profile for a user.
    ///
    /// `None` fields in the patch keep whatever value is already stored, so
    /// a checkout that only knows shipping details cannot wipe a name set
    /// at sign-up and vice versa.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn upsert(
        &self,
        user_id: UserId,
        patch: &ProfilePatch,
    ) -> Result<Profile, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r"
            INSERT INTO storefront.profiles (user_id, name, phone, address, city, pincode)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id) DO UPDATE SET
                name = COALESCE(EXCLUDED.name, storefront.profiles.name),
                phone = COALESCE(EXCLUDED.phone, storefront.profiles.phone),
                address = COALESCE(EXCLUDED.address, storefront.profiles.address),
                city = COALESCE(EXCLUDED.city, storefront.profiles.city),
                pincode = COALESCE(EXCLUDED.pincode, storefront.profiles.pincode),
                updated_at = now()
            RETURNING id, user_id, name, phone, address, city, pincode, created_at, updated_at
            ",
        )
        .bind(user_id)
        .bind(patch.name.as_deref())
        .bind(patch.phone.as_deref())
        .bind(patch.address.as_deref())
        .bind(patch.city.as_deref())
        .bind(patch.pincode.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok(Profile::from(row))
    }
}
