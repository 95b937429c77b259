use axum::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::maps::Coordinates;

/// Persistence seam for saved locations. Handlers and services take this as a
/// trait object so tests can run against an in-memory store.
#[async_trait]
pub trait LocationStore: Send + Sync {
    async fn list_by_owner(&self, user_id: Uuid) -> sqlx::Result<Vec<Location>>;

    /// Scoped lookup: a missing row and a row owned by someone else are both
    /// `None`, so callers cannot distinguish the two.
    async fn find_for_owner(&self, id: Uuid, user_id: Uuid) -> sqlx::Result<Option<Location>>;

    async fn insert(
        &self,
        user_id: Uuid,
        name: &str,
        address: &str,
        latitude: f64,
        longitude: f64,
    ) -> sqlx::Result<Location>;
}

#[async_trait]
impl LocationStore for PgPool {
    async fn list_by_owner(&self, user_id: Uuid) -> sqlx::Result<Vec<Location>> {
        Location::list_by_owner(self, user_id).await
    }

    async fn find_for_owner(&self, id: Uuid, user_id: Uuid) -> sqlx::Result<Option<Location>> {
        Location::find_for_owner(self, id, user_id).await
    }

    async fn insert(
        &self,
        user_id: Uuid,
        name: &str,
        address: &str,
        latitude: f64,
        longitude: f64,
    ) -> sqlx::Result<Location> {
        Location::insert(self, user_id, name, address, latitude, longitude).await
    }
}

/// A saved, user-owned named address. Immutable after creation; coordinates
/// are present when the address was verified through the geocoder.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Location {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: OffsetDateTime,
}

impl Location {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
            _ => None,
        }
    }

    pub async fn list_by_owner(db: &PgPool, user_id: Uuid) -> sqlx::Result<Vec<Location>> {
        sqlx::query_as::<_, Location>(
            r#"
            SELECT id, user_id, name, address, latitude, longitude, created_at
            FROM locations
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
    }

    pub async fn find_for_owner(
        db: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> sqlx::Result<Option<Location>> {
        sqlx::query_as::<_, Location>(
            r#"
            SELECT id, user_id, name, address, latitude, longitude, created_at
            FROM locations
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await
    }

    pub async fn insert(
        db: &PgPool,
        user_id: Uuid,
        name: &str,
        address: &str,
        latitude: f64,
        longitude: f64,
    ) -> sqlx::Result<Location> {
        sqlx::query_as::<_, Location>(
            r#"
            INSERT INTO locations (user_id, name, address, latitude, longitude)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, name, address, latitude, longitude, created_at
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(address)
        .bind(latitude)
        .bind(longitude)
        .fetch_one(db)
        .await
    }
}

/// In-memory `LocationStore` for exercising service flows without Postgres.
#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub(crate) struct MemoryStore {
        rows: Mutex<Vec<Location>>,
    }

    impl MemoryStore {
        pub(crate) fn with_rows(rows: Vec<Location>) -> Self {
            Self { rows: Mutex::new(rows) }
        }

        pub(crate) fn rows(&self) -> Vec<Location> {
            self.rows.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LocationStore for MemoryStore {
        async fn list_by_owner(&self, user_id: Uuid) -> sqlx::Result<Vec<Location>> {
            let mut rows: Vec<Location> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|l| l.user_id == user_id)
                .cloned()
                .collect();
            rows.sort_by_key(|l| std::cmp::Reverse(l.created_at));
            Ok(rows)
        }

        async fn find_for_owner(&self, id: Uuid, user_id: Uuid) -> sqlx::Result<Option<Location>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|l| l.id == id && l.user_id == user_id)
                .cloned())
        }

        async fn insert(
            &self,
            user_id: Uuid,
            name: &str,
            address: &str,
            latitude: f64,
            longitude: f64,
        ) -> sqlx::Result<Location> {
            let location = Location {
                id: Uuid::new_v4(),
                user_id,
                name: name.to_string(),
                address: address.to_string(),
                latitude: Some(latitude),
                longitude: Some(longitude),
                created_at: OffsetDateTime::now_utc(),
            };
            self.rows.lock().unwrap().push(location.clone());
            Ok(location)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(lat: Option<f64>, lng: Option<f64>) -> Location {
        Location {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Home".into(),
            address: "New York, NY, USA".into(),
            latitude: lat,
            longitude: lng,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn coordinates_require_both_fields() {
        assert!(location(Some(40.7), Some(-74.0)).coordinates().is_some());
        assert!(location(Some(40.7), None).coordinates().is_none());
        assert!(location(None, Some(-74.0)).coordinates().is_none());
        assert!(location(None, None).coordinates().is_none());
    }
}
