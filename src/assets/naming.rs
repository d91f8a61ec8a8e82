use uuid::Uuid;

use crate::domain::types::{AssetName, ImageExtension};

pub use crate::domain::asset::thumbnail_name_for;

/// Generates a fresh base file name carrying `extension`.
///
/// The random v4 token makes collisions with already stored names
/// practically impossible, which is what lets concurrent uploads write
/// without locking the store.
pub fn generate_name(extension: ImageExtension) -> AssetName {
    AssetName::new_unchecked(format!("{}.{}", Uuid::new_v4().simple(), extension))
}
