use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, delete, get, post, web};

use crate::assets::FsAssetStore;
use crate::domain::types::CategoryId;
use crate::dto::categories::{CategoryDto, CategoryUpload};
use crate::forms::categories::{CategoryForm, CategoryUploadForm};
use crate::repository::DieselRepository;
use crate::routes::{error_response, run_blocking};
use crate::services::categories::{
    create_category as create_category_service, delete_category as delete_category_service,
    show_categories as show_categories_service, show_category as show_category_service,
    update_category as update_category_service,
};
use crate::services::{CategoryLocks, ServiceError, ServiceResult};

fn read_form(form: CategoryUploadForm) -> ServiceResult<CategoryForm> {
    form.into_form().map_err(|e| {
        log::error!("Failed to read uploaded image: {e}");
        ServiceError::Internal
    })
}

fn parse_id(category_id: web::Path<i32>) -> Result<CategoryId, HttpResponse> {
    CategoryId::new(category_id.into_inner()).map_err(|_| error_response(ServiceError::NotFound))
}

#[utoipa::path(
    get,
    path = "/api/category",
    tag = "categories",
    responses((status = 200, description = "All categories ordered by id", body = [CategoryDto]))
)]
#[get("/category")]
pub async fn list_categories(repo: web::Data<DieselRepository>) -> impl Responder {
    match run_blocking(move || show_categories_service(repo.get_ref())).await {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(response) => response,
    }
}

#[utoipa::path(
    get,
    path = "/api/category/{category_id}",
    tag = "categories",
    params(("category_id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "The category", body = CategoryDto),
        (status = 404, description = "Category not found")
    )
)]
#[get("/category/{category_id}")]
pub async fn show_category(
    category_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = match parse_id(category_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match run_blocking(move || show_category_service(id, repo.get_ref())).await {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(response) => response,
    }
}

#[utoipa::path(
    post,
    path = "/api/category",
    tag = "categories",
    request_body(content = CategoryUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Created category", body = CategoryDto),
        (status = 400, description = "Field errors keyed by field name")
    )
)]
#[post("/category")]
pub async fn create_category(
    repo: web::Data<DieselRepository>,
    store: web::Data<FsAssetStore>,
    MultipartForm(form): MultipartForm<CategoryUploadForm>,
) -> impl Responder {
    let result = run_blocking(move || {
        let form = read_form(form)?;
        create_category_service(form, repo.get_ref(), store.get_ref())
    })
    .await;

    match result {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(response) => response,
    }
}

#[utoipa::path(
    post,
    path = "/api/category/edit/{category_id}",
    tag = "categories",
    params(("category_id" = i32, Path, description = "Category id")),
    request_body(content = CategoryUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Updated category", body = CategoryDto),
        (status = 400, description = "Field errors keyed by field name"),
        (status = 404, description = "Category not found")
    )
)]
#[post("/category/edit/{category_id}")]
pub async fn update_category(
    category_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    store: web::Data<FsAssetStore>,
    locks: web::Data<CategoryLocks>,
    MultipartForm(form): MultipartForm<CategoryUploadForm>,
) -> impl Responder {
    let id = match parse_id(category_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let result = run_blocking(move || {
        let form = read_form(form)?;
        update_category_service(id, form, repo.get_ref(), store.get_ref(), locks.get_ref())
    })
    .await;

    match result {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(response) => response,
    }
}

#[utoipa::path(
    delete,
    path = "/api/category/delete/{category_id}",
    tag = "categories",
    params(("category_id" = i32, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category and its images removed"),
        (status = 404, description = "Category not found")
    )
)]
#[delete("/category/delete/{category_id}")]
pub async fn delete_category(
    category_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    store: web::Data<FsAssetStore>,
    locks: web::Data<CategoryLocks>,
) -> impl Responder {
    let id = match parse_id(category_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let result = run_blocking(move || {
        delete_category_service(id, repo.get_ref(), store.get_ref(), locks.get_ref())
    })
    .await;

    match result {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(response) => response,
    }
}
