use crate::assets::{AssetError, AssetStore};
use crate::domain::types::{AssetName, ImageExtension};

use super::{ServiceError, ServiceResult};

/// Stored image bytes together with the type to serve them as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Reads a stored image or thumbnail by its bare file name.
///
/// Names that could reach outside the storage root are reported as missing.
pub fn fetch_image<S>(file_name: &str, store: &S) -> ServiceResult<ImageFile>
where
    S: AssetStore,
{
    let Ok(name) = AssetName::new(file_name) else {
        return Err(ServiceError::NotFound);
    };

    match store.read(&name) {
        Ok(bytes) => Ok(ImageFile {
            bytes,
            content_type: ImageExtension::of_file_name(name.as_str())
                .map_or("application/octet-stream", ImageExtension::content_type),
        }),
        Err(AssetError::NotFound(_)) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to read image {name}: {e}");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::test::MemoryAssetStore;

    #[test]
    fn serves_stored_files_with_their_type() {
        let store = MemoryAssetStore::with_files(["150x150_a.png"]);

        let image = fetch_image("150x150_a.png", &store).unwrap();
        assert_eq!(image.bytes, b"150x150_a.png");
        assert_eq!(image.content_type, "image/png");
    }

    #[test]
    fn missing_files_are_not_found() {
        let store = MemoryAssetStore::default();
        assert_eq!(
            fetch_image("nope.jpg", &store).unwrap_err(),
            ServiceError::NotFound
        );
    }

    #[test]
    fn path_like_names_are_not_found() {
        let store = MemoryAssetStore::with_files(["a.png"]);
        for name in ["../a.png", "dir/a.png", ".env", ""] {
            assert_eq!(fetch_image(name, &store).unwrap_err(), ServiceError::NotFound);
        }
    }
}
