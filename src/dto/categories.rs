use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::category::Category;

/// Category as returned to API clients.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Base file name of the image; the thumbnail is `150x150_<image>`.
    pub image: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Multipart body of the create and edit routes, for the API description.
#[derive(ToSchema)]
pub struct CategoryUpload {
    pub name: String,
    pub description: String,
    /// jpg, jpeg, png, gif or svg file.
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            description: value.description.into_inner(),
            image: value.image.map(|image| image.into_inner()),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
