use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;
use utoipa::OpenApi;

use crate::dto::categories::{CategoryDto, CategoryUpload};
use crate::services::{ServiceError, ServiceResult};

pub mod categories;
pub mod images;

/// OpenAPI description of every route registered by [`configure`].
#[derive(OpenApi)]
#[openapi(
    paths(
        categories::list_categories,
        categories::show_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        images::get_image,
    ),
    components(schemas(CategoryDto, CategoryUpload)),
    tags(
        (name = "categories", description = "Categories and their images"),
        (name = "images", description = "Stored images and thumbnails")
    )
)]
pub struct ApiDoc;

/// Registers every API route under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(categories::list_categories)
            .service(categories::show_category)
            .service(categories::create_category)
            .service(categories::update_category)
            .service(categories::delete_category)
            .service(images::get_image)
            .service(openapi_json),
    );
}

#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Runs a service call on the blocking thread pool.
///
/// Decoding, resizing, disk and database work, and waits on per-category
/// locks all block, so none of them may run on an actix worker.
pub async fn run_blocking<T, F>(f: F) -> Result<T, HttpResponse>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    match web::block(f).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(error_response(err)),
        Err(e) => {
            log::error!("Blocking task failed: {e}");
            Err(HttpResponse::InternalServerError().finish())
        }
    }
}

/// Maps a service failure onto the API's status codes.
pub fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Validation(errors) => HttpResponse::BadRequest().json(errors),
        ServiceError::InvalidImage(message) => {
            log::debug!("Rejected upload: {message}");
            HttpResponse::BadRequest().json(json!({ "image": ["The image must be an image."] }))
        }
        ServiceError::NotFound => {
            HttpResponse::NotFound().json(json!({ "message": "Category not found" }))
        }
        ServiceError::Storage(_) | ServiceError::Internal => HttpResponse::InternalServerError()
            .json(json!({ "message": "Internal server error" })),
    }
}
