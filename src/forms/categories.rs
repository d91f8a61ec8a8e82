use std::fs;
use std::io;

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use thiserror::Error;
use validator::Validate;

use crate::domain::asset::UploadedImage;
use crate::domain::types::{
    CategoryDescription, CategoryName, ImageExtension, TypeConstraintError,
};
use crate::forms::FieldErrors;

/// Multipart body accepted when creating or editing a category.
///
/// Every field is optional at this level so that missing parts end up as
/// field errors instead of a rejected request.
#[derive(MultipartForm)]
pub struct CategoryUploadForm {
    pub name: Option<Text<String>>,
    pub description: Option<Text<String>>,
    #[multipart(limit = "10MB")]
    pub image: Option<TempFile>,
}

impl CategoryUploadForm {
    /// Reads the uploaded file and flattens the multipart parts.
    pub fn into_form(self) -> io::Result<CategoryForm> {
        let image = match self.image {
            Some(file) if is_submitted(&file) => {
                let bytes = fs::read(file.file.path())?;
                let file_name = file.file_name.unwrap_or_default();
                Some(UploadedImage::from_file_name(bytes, &file_name))
            }
            _ => None,
        };

        Ok(CategoryForm {
            name: self.name.map(Text::into_inner).unwrap_or_default(),
            description: self.description.map(Text::into_inner).unwrap_or_default(),
            image,
        })
    }
}

// Browsers send an empty, unnamed file part when no file was picked.
fn is_submitted(file: &TempFile) -> bool {
    file.size > 0 || file.file_name.as_deref().is_some_and(|name| !name.is_empty())
}

/// Raw category input, before any field has been checked.
#[derive(Debug, Clone, Default, Validate)]
pub struct CategoryForm {
    #[validate(length(min = 1, message = "The name field is required."))]
    pub name: String,
    #[validate(length(min = 1, message = "The description field is required."))]
    pub description: String,
    #[validate(required(message = "The image field is required."))]
    pub image: Option<UploadedImage>,
}

/// Category input that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryPayload {
    pub name: CategoryName,
    pub description: CategoryDescription,
    pub image: UploadedImage,
    pub extension: ImageExtension,
}

#[derive(Debug, Error)]
pub enum CategoryFormError {
    #[error("Category form validation failed: {0}")]
    Validation(FieldErrors),
}

impl TryFrom<CategoryForm> for CategoryPayload {
    type Error = CategoryFormError;

    /// Checks every field and reports all failures together.
    fn try_from(value: CategoryForm) -> Result<Self, Self::Error> {
        let mut errors = match value.validate() {
            Ok(()) => FieldErrors::default(),
            Err(e) => FieldErrors::from(&e),
        };

        let name = check(&mut errors, "name", CategoryName::new(value.name));
        let description = check(
            &mut errors,
            "description",
            CategoryDescription::new(value.description),
        );
        let image = value.image.and_then(|image| {
            let extension = ImageExtension::try_from(image.original_extension.as_str())
                .map_err(|_| TypeConstraintError::UnsupportedImageType(allowed_types_message()));
            check(&mut errors, "image", extension).map(|extension| (image, extension))
        });

        match (name, description, image) {
            (Some(name), Some(description), Some((image, extension))) if errors.is_empty() => {
                Ok(Self {
                    name,
                    description,
                    image,
                    extension,
                })
            }
            _ => Err(CategoryFormError::Validation(errors)),
        }
    }
}

/// Records `result`'s error under `field` unless that field already failed.
fn check<T>(
    errors: &mut FieldErrors,
    field: &str,
    result: Result<T, TypeConstraintError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            if !errors.contains(field) {
                errors.add(field, message_for(field, &e));
            }
            None
        }
    }
}

fn message_for(field: &str, error: &TypeConstraintError) -> String {
    match error {
        TypeConstraintError::EmptyString(_) => format!("The {field} field is required."),
        TypeConstraintError::UnsupportedImageType(allowed) => {
            format!("The {field} must be a file of type: {allowed}.")
        }
        other => other.to_string(),
    }
}

fn allowed_types_message() -> String {
    ImageExtension::ALL
        .iter()
        .map(|ext| ext.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
