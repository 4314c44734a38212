/// `/photos` endpoints
use crate::{
    api::extract::{PhotoId, ValidatedJson},
    context::AppContext,
    error::{PhotoError, PhotoResult},
    photos::{NewPhoto, PhotoCreate, PhotoResponse, PhotoUpdate},
};
use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

/// Build photo routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/photos", get(list_photos).post(create_photo))
        .route("/photos/:id", get(show_photo).patch(update_photo))
}

/// List every photo
async fn list_photos(State(ctx): State<AppContext>) -> PhotoResult<Json<Vec<PhotoResponse>>> {
    let photos = ctx.photos.list_all().await?;

    Ok(Json(photos.into_iter().map(PhotoResponse::from).collect()))
}

/// Create a photo
async fn create_photo(
    State(ctx): State<AppContext>,
    ValidatedJson(payload): ValidatedJson<PhotoCreate>,
) -> PhotoResult<(StatusCode, Json<PhotoResponse>)> {
    let new = NewPhoto::try_from(payload)?;
    let photo = ctx.photos.create(new).await?;

    Ok((StatusCode::CREATED, Json(photo.into())))
}

/// Show a single photo
async fn show_photo(
    State(ctx): State<AppContext>,
    PhotoId(id): PhotoId,
) -> PhotoResult<Json<PhotoResponse>> {
    let photo = ctx
        .photos
        .find_by_id(id)
        .await?
        .ok_or(PhotoError::NotFound("Photo"))?;

    Ok(Json(photo.into()))
}

/// Partially update a photo
async fn update_photo(
    State(ctx): State<AppContext>,
    PhotoId(id): PhotoId,
    ValidatedJson(changes): ValidatedJson<PhotoUpdate>,
) -> PhotoResult<Json<PhotoResponse>> {
    let photo = ctx
        .photos
        .update(id, changes)
        .await?
        .ok_or(PhotoError::NotFound("Photo"))?;

    Ok(Json(photo.into()))
}

#[cfg(test)]
mod tests {
    use crate::{
        config::ServerConfig,
        context::AppContext,
        db,
        error::{DetailResponse, ValidationResponse},
        photos::PhotoResponse,
        server::build_router,
    };
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    async fn test_server(seed: bool) -> (TestServer, AppContext) {
        let pool = db::create_memory_pool().await.unwrap();
        let mut config = ServerConfig::for_tests("unused.db".into());
        config.storage.seed = seed;

        let ctx = AppContext::with_pool(config, pool).await.unwrap();
        let app = build_router(ctx.clone()).unwrap();

        (TestServer::new(app).unwrap(), ctx)
    }

    #[tokio::test]
    async fn test_list_empty_then_seeded() {
        let (server, _) = test_server(false).await;
        let response = server.get("/photos").await;
        response.assert_status_ok();
        assert!(response.json::<Vec<PhotoResponse>>().is_empty());

        let (server, _) = test_server(true).await;
        let photos: Vec<PhotoResponse> = server.get("/photos").await.json();
        let names: Vec<&str> = photos.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Mountain Lake", "City Skyline"]);
    }

    #[tokio::test]
    async fn test_create_photo() {
        let (server, _) = test_server(false).await;

        let response = server
            .post("/photos")
            .json(&json!({ "name": "A", "url": "u", "width": 10, "height": 20 }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let photo: PhotoResponse = response.json();
        assert!(photo.id > 0);
        assert_eq!(photo.created_at, photo.updated_at);
        assert_eq!(photo.name, "A");
        assert_eq!(photo.url, "u");
        assert_eq!(photo.width, Some(10));
        assert_eq!(photo.height, Some(20));
    }

    #[tokio::test]
    async fn test_create_missing_name_is_rejected() {
        let (server, ctx) = test_server(false).await;

        let response = server
            .post("/photos")
            .json(&json!({ "url": "u" }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: ValidationResponse = response.json();
        assert_eq!(body.detail[0].loc, vec!["body", "name"]);
        assert_eq!(ctx.photos.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_wrong_type_is_rejected() {
        let (server, ctx) = test_server(false).await;

        let response = server
            .post("/photos")
            .json(&json!({ "name": "A", "url": "u", "width": "wide" }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(ctx.photos.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_show_round_trip_and_not_found() {
        let (server, _) = test_server(false).await;

        let created: PhotoResponse = server
            .post("/photos")
            .json(&json!({ "name": "A", "url": "u" }))
            .await
            .json();

        let shown: PhotoResponse = server.get(&format!("/photos/{}", created.id)).await.json();
        assert_eq!(shown, created);

        let response = server.get("/photos/9999").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: DetailResponse = response.json();
        assert_eq!(body.detail, "Photo not found");
    }

    #[tokio::test]
    async fn test_non_integer_id_is_rejected() {
        let (server, _) = test_server(false).await;

        let response = server.get("/photos/abc").await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: ValidationResponse = response.json();
        assert_eq!(body.detail[0].loc, vec!["path", "id"]);
    }

    #[tokio::test]
    async fn test_patch_updates_only_given_fields() {
        let (server, _) = test_server(false).await;

        let created: PhotoResponse = server
            .post("/photos")
            .json(&json!({ "name": "A", "url": "u", "width": 10, "height": 20 }))
            .await
            .json();

        let response = server
            .patch(&format!("/photos/{}", created.id))
            .json(&json!({ "width": 99 }))
            .await;
        response.assert_status_ok();

        let updated: PhotoResponse = response.json();
        assert_eq!(updated.width, Some(99));
        assert_eq!(updated.name, "A");
        assert_eq!(updated.url, "u");
        assert_eq!(updated.height, Some(20));
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_patch_null_name_is_rejected() {
        let (server, _) = test_server(false).await;

        let created: PhotoResponse = server
            .post("/photos")
            .json(&json!({ "name": "A", "url": "u" }))
            .await
            .json();

        let response = server
            .patch(&format!("/photos/{}", created.id))
            .json(&json!({ "name": null }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let shown: PhotoResponse = server.get(&format!("/photos/{}", created.id)).await.json();
        assert_eq!(shown, created);
    }

    #[tokio::test]
    async fn test_patch_missing_photo() {
        let (server, ctx) = test_server(false).await;

        let response = server
            .patch("/photos/7")
            .json(&json!({ "name": "B" }))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(ctx.photos.count().await.unwrap(), 0);
    }
}
