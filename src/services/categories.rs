//! Category lifecycle: keeps each record and its image files consistent
//! across create, update and delete.
//!
//! A record with an image owns exactly one [`AssetPair`]. New files are always
//! written before the record that references them, and replaced or removed
//! files are only deleted after the record no longer needs them. A crash
//! between persisting an update and removing the previous pair leaves those
//! old files orphaned on disk; the record itself stays consistent.

use chrono::Utc;

use crate::assets::{AssetStore, generate_name, make_thumbnail};
use crate::domain::asset::{AssetPair, UploadedImage};
use crate::domain::category::{Category, CategoryUpdate, NewCategory};
use crate::domain::types::{CategoryId, ImageExtension};
use crate::dto::categories::CategoryDto;
use crate::forms::categories::{CategoryForm, CategoryPayload};
use crate::repository::{CategoryReader, CategoryWriter};

use super::{CategoryLocks, ServiceError, ServiceResult};

pub fn show_categories<R>(repo: &R) -> ServiceResult<Vec<CategoryDto>>
where
    R: CategoryReader,
{
    match repo.list_categories() {
        Ok(categories) => Ok(categories.into_iter().map(CategoryDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn show_category<R>(id: CategoryId, repo: &R) -> ServiceResult<CategoryDto>
where
    R: CategoryReader,
{
    find_category(id, repo).map(CategoryDto::from)
}

/// Validates `form`, stores the image with its thumbnail and inserts the record.
pub fn create_category<R, S>(
    form: CategoryForm,
    repo: &R,
    store: &S,
) -> ServiceResult<CategoryDto>
where
    R: CategoryWriter,
    S: AssetStore,
{
    let payload = CategoryPayload::try_from(form)?;
    let assets = store_image(&payload.image, payload.extension, store)?;

    let now = Utc::now().naive_utc();
    let new_category = NewCategory {
        name: payload.name,
        description: payload.description,
        image: Some(assets.base.clone()),
        created_at: now,
        updated_at: now,
    };

    match repo.create_category(&new_category) {
        Ok(category) => {
            log::info!("Created category {} with image {}", category.id, assets.base);
            Ok(category.into())
        }
        Err(e) => {
            log::error!("Failed to create category: {e}");
            discard_assets(&assets, store);
            Err(ServiceError::Internal)
        }
    }
}

/// Replaces a category's fields and image.
///
/// The image is mandatory here just like on create. The previous files are
/// removed only once the record points at the new ones; failing to remove
/// them is logged and does not fail the update.
pub fn update_category<R, S>(
    id: CategoryId,
    form: CategoryForm,
    repo: &R,
    store: &S,
    locks: &CategoryLocks,
) -> ServiceResult<CategoryDto>
where
    R: CategoryReader + CategoryWriter,
    S: AssetStore,
{
    locks.with_lock(id, || -> ServiceResult<CategoryDto> {
        let existing = find_category(id, repo)?;
        let payload = CategoryPayload::try_from(form)?;
        let assets = store_image(&payload.image, payload.extension, store)?;

        let update = CategoryUpdate {
            name: payload.name,
            description: payload.description,
            image: Some(assets.base.clone()),
            updated_at: Utc::now().naive_utc(),
        };

        let updated = match repo.update_category(id, &update) {
            Ok(Some(category)) => category,
            Ok(None) => {
                discard_assets(&assets, store);
                return Err(ServiceError::NotFound);
            }
            Err(e) => {
                log::error!("Failed to update category {id}: {e}");
                discard_assets(&assets, store);
                return Err(ServiceError::Internal);
            }
        };

        if let Some(previous) = existing.assets() {
            discard_assets(&previous, store);
        }

        log::info!("Updated category {id} with image {}", assets.base);
        Ok(updated.into())
    })
}

/// Removes a category's files, then the category itself.
///
/// Files that are already gone are skipped. Any other storage failure aborts
/// the deletion and keeps the record.
pub fn delete_category<R, S>(
    id: CategoryId,
    repo: &R,
    store: &S,
    locks: &CategoryLocks,
) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
    S: AssetStore,
{
    locks.with_lock(id, || -> ServiceResult<()> {
        let existing = find_category(id, repo)?;

        if let Some(assets) = existing.assets() {
            for name in assets.names() {
                if !store.exists(name) {
                    log::warn!("Image {name} of category {id} is already missing");
                    continue;
                }
                store.delete(name).map_err(|e| {
                    log::error!("Failed to remove image of category {id}: {e}");
                    ServiceError::from(e)
                })?;
            }
        }

        match repo.delete_category(id) {
            Ok(0) => Err(ServiceError::NotFound),
            Ok(_) => {
                log::info!("Deleted category {id}");
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to delete category {id}: {e}");
                Err(ServiceError::Internal)
            }
        }
    })
}

fn find_category<R>(id: CategoryId, repo: &R) -> ServiceResult<Category>
where
    R: CategoryReader,
{
    match repo.get_category_by_id(id) {
        Ok(Some(category)) => Ok(category),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Writes the thumbnail and the original under a fresh name.
///
/// The thumbnail is rendered before anything touches the store, so an
/// undecodable upload leaves no files behind.
fn store_image<S>(
    image: &UploadedImage,
    extension: ImageExtension,
    store: &S,
) -> ServiceResult<AssetPair>
where
    S: AssetStore,
{
    let thumbnail = make_thumbnail(&image.bytes)?;
    let assets = AssetPair::for_base(generate_name(extension));

    store.write(&assets.thumbnail, &thumbnail).map_err(|e| {
        log::error!("Failed to store thumbnail: {e}");
        ServiceError::from(e)
    })?;

    if let Err(e) = store.write(&assets.base, &image.bytes) {
        log::error!("Failed to store image: {e}");
        discard_assets(&assets, store);
        return Err(e.into());
    }

    Ok(assets)
}

/// Best-effort removal of a pair that no record references any more.
fn discard_assets<S>(assets: &AssetPair, store: &S)
where
    S: AssetStore,
{
    for name in assets.names() {
        if let Err(e) = store.delete(name) {
            log::warn!("Failed to remove unreferenced image {name}: {e}");
        }
    }
}
