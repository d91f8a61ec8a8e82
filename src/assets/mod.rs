//! Storage of category images: file naming, the filesystem store and
//! thumbnail generation.

pub mod naming;
pub mod store;
pub mod thumbnail;

pub use naming::{generate_name, thumbnail_name_for};
pub use store::{AssetError, AssetResult, AssetStore, FsAssetStore};
pub use thumbnail::{ThumbnailError, make_thumbnail, thumbnail_dimensions};
