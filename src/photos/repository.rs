/// Typed access to the `photos` table
use crate::{
    db::photo::{format_timestamp, parse_photo, Photo, PHOTO_COLUMNS},
    error::PhotoResult,
    photos::models::{NewPhoto, PhotoUpdate},
};
use chrono::{DateTime, Duration, Utc};
use sqlx::{Row, SqlitePool};
use tracing::debug;

/// Photo repository
///
/// Every operation checks a connection out of the pool and hands it back
/// before returning, on the error path as well.
#[derive(Clone)]
pub struct PhotoRepository {
    db: SqlitePool,
}

impl PhotoRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// All photos in ascending id order
    pub async fn list_all(&self) -> PhotoResult<Vec<Photo>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM photos ORDER BY id ASC",
            PHOTO_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(parse_photo).collect()
    }

    /// Number of stored photos
    pub async fn count(&self) -> PhotoResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM photos")
            .fetch_one(&self.db)
            .await?;

        Ok(row.try_get("n")?)
    }

    /// Insert a photo and return it with its assigned id
    pub async fn create(&self, new: NewPhoto) -> PhotoResult<Photo> {
        let now = Utc::now();
        let stamp = format_timestamp(&now);

        let result = sqlx::query(
            r#"
            INSERT INTO photos (name, url, width, height, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new.name)
        .bind(&new.url)
        .bind(new.width)
        .bind(new.height)
        .bind(&stamp)
        .bind(&stamp)
        .execute(&self.db)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id, name = %new.name, "photo created");

        Ok(Photo {
            id,
            name: new.name,
            url: new.url,
            width: new.width,
            height: new.height,
            created_at: now,
            updated_at: now,
        })
    }

    /// Get photo by ID
    pub async fn find_by_id(&self, id: i64) -> PhotoResult<Option<Photo>> {
        let row = sqlx::query(&format!("SELECT {} FROM photos WHERE id = ?", PHOTO_COLUMNS))
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        row.map(parse_photo).transpose()
    }

    /// Apply a partial update; `None` when no photo has this id
    pub async fn update(&self, id: i64, changes: PhotoUpdate) -> PhotoResult<Option<Photo>> {
        // Take the write lock before reading; a deferred transaction that
        // upgrades after another writer commits fails with SQLITE_BUSY_SNAPSHOT
        let mut tx = self.db.begin_with("BEGIN IMMEDIATE").await?;

        let row = sqlx::query(&format!("SELECT {} FROM photos WHERE id = ?", PHOTO_COLUMNS))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        // Dropping the transaction rolls it back
        let Some(row) = row else {
            return Ok(None);
        };

        let mut photo = parse_photo(row)?;
        changes.apply_to(&mut photo);
        photo.updated_at = next_updated_at(photo.updated_at);

        sqlx::query(
            r#"
            UPDATE photos
            SET name = ?,
                url = ?,
                width = ?,
                height = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&photo.name)
        .bind(&photo.url)
        .bind(photo.width)
        .bind(photo.height)
        .bind(format_timestamp(&photo.updated_at))
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!(id, "photo updated");

        Ok(Some(photo))
    }
}

/// `updated_at` must move forward even if the clock has not ticked
fn next_updated_at(previous: DateTime<Utc>) -> DateTime<Utc> {
    Utc::now().max(previous + Duration::nanoseconds(1))
}
