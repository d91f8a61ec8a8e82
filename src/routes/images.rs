use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;

use crate::assets::FsAssetStore;
use crate::routes::error_response;
use crate::services::ServiceError;
use crate::services::images::fetch_image;

#[utoipa::path(
    get,
    path = "/api/getImage/{image}",
    tag = "images",
    params(("image" = String, Path, description = "Stored image or thumbnail file name")),
    responses(
        (status = 200, description = "Image bytes with the type of the file extension"),
        (status = 404, description = "Image not found")
    )
)]
#[get("/getImage/{image}")]
pub async fn get_image(image: web::Path<String>, store: web::Data<FsAssetStore>) -> impl Responder {
    let result = web::block(move || fetch_image(&image, store.get_ref())).await;

    match result {
        Ok(Ok(file)) => HttpResponse::Ok()
            .content_type(file.content_type)
            .body(file.bytes),
        Ok(Err(ServiceError::NotFound)) => {
            HttpResponse::NotFound().json(json!({ "error": "Image not found." }))
        }
        Ok(Err(err)) => error_response(err),
        Err(e) => {
            log::error!("Image read task failed: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
