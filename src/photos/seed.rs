/// Sample records inserted into an empty store
use crate::{error::PhotoResult, photos::models::NewPhoto, photos::repository::PhotoRepository};
use tracing::info;

const SEED_PHOTOS: [(&str, &str); 2] = [
    ("Mountain Lake", "https://picsum.photos/seed/mountain-lake/400/300"),
    ("City Skyline", "https://picsum.photos/seed/city-skyline/400/300"),
];

/// Insert the sample photos if the store holds none.
///
/// Returns the number of photos inserted.
pub async fn seed_if_empty(repo: &PhotoRepository) -> PhotoResult<usize> {
    let existing = repo.count().await?;
    if existing > 0 {
        info!(existing, "store already populated, skipping seed");
        return Ok(0);
    }

    for (name, url) in SEED_PHOTOS {
        repo.create(NewPhoto {
            name: name.to_string(),
            url: url.to_string(),
            width: Some(400),
            height: Some(300),
        })
        .await?;
    }

    info!(count = SEED_PHOTOS.len(), "seeded sample photos");
    Ok(SEED_PHOTOS.len())
}
