/// Photo row model and row mapping
use crate::error::{PhotoError, PhotoResult};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row};

/// Photo record as stored in the `photos` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Columns selected for every photo query, in `parse_photo` order
pub const PHOTO_COLUMNS: &str = "id, name, url, width, height, created_at, updated_at";

/// Map a `photos` row onto a [`Photo`]
pub fn parse_photo(row: SqliteRow) -> PhotoResult<Photo> {
    let created_at_str: String = row.try_get("created_at")?;
    let updated_at_str: String = row.try_get("updated_at")?;

    Ok(Photo {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        url: row.try_get("url")?,
        width: row.try_get("width")?,
        height: row.try_get("height")?,
        created_at: parse_timestamp(&created_at_str)?,
        updated_at: parse_timestamp(&updated_at_str)?,
    })
}

/// Timestamps are stored as RFC 3339 text with full precision so a
/// stored value reads back equal to the one written
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(s: &str) -> PhotoResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| PhotoError::Internal(format!("Invalid timestamp {:?}: {}", s, e)))
}
