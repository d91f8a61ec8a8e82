//! Value types describing uploaded images and the files derived from them.

use serde::{Deserialize, Serialize};

use crate::domain::types::AssetName;

/// Prefix that turns a base file name into its thumbnail file name.
pub const THUMBNAIL_PREFIX: &str = "150x150_";

/// Raw image received from a client, detached from any request object.
///
/// Serializing it (as validation error parameters do) leaves the bytes out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedImage {
    #[serde(skip)]
    pub bytes: Vec<u8>,
    /// Extension of the client-side file name, without the dot.
    pub original_extension: String,
}

impl UploadedImage {
    pub fn new(bytes: Vec<u8>, original_extension: impl Into<String>) -> Self {
        Self {
            bytes,
            original_extension: original_extension.into(),
        }
    }

    /// Builds an upload from a client file name such as `photo.JPG`.
    ///
    /// A name without a dot yields an empty extension, which validation rejects.
    pub fn from_file_name(bytes: Vec<u8>, file_name: &str) -> Self {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or_default();
        Self::new(bytes, extension)
    }
}

/// The two files stored for one category image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetPair {
    pub base: AssetName,
    pub thumbnail: AssetName,
}

impl AssetPair {
    /// Derives the pair from the base file name.
    pub fn for_base(base: AssetName) -> Self {
        let thumbnail = thumbnail_name_for(&base);
        Self { base, thumbnail }
    }

    /// Both names, thumbnail first, in the order they are written.
    pub fn names(&self) -> [&AssetName; 2] {
        [&self.thumbnail, &self.base]
    }
}

/// Name of the thumbnail stored next to `base`.
pub fn thumbnail_name_for(base: &AssetName) -> AssetName {
    base.prefixed(THUMBNAIL_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnail_name_is_prefixed_base() {
        let base = AssetName::new("65a1f.jpg").unwrap();
        assert_eq!(thumbnail_name_for(&base).as_str(), "150x150_65a1f.jpg");
    }

    #[test]
    fn pair_derives_from_base() {
        let pair = AssetPair::for_base(AssetName::new("abc.png").unwrap());
        assert_eq!(pair.base, "abc.png");
        assert_eq!(pair.thumbnail, "150x150_abc.png");
    }

    #[test]
    fn upload_takes_extension_from_last_dot() {
        let upload = UploadedImage::from_file_name(vec![1], "holiday.photo.JPG");
        assert_eq!(upload.original_extension, "JPG");

        let upload = UploadedImage::from_file_name(vec![1], "noextension");
        assert_eq!(upload.original_extension, "");
    }

    #[test]
    fn serialized_upload_omits_the_bytes() {
        let upload = UploadedImage::new(vec![0xff; 1024], "png");
        let value = serde_json::to_value(&upload).unwrap();
        assert_eq!(value, serde_json::json!({ "original_extension": "png" }));
    }
}
