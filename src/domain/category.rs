use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::asset::AssetPair;
use crate::domain::types::{AssetName, CategoryDescription, CategoryId, CategoryName};

/// Canonical category record.
///
/// When `image` is set, both files of the matching [`AssetPair`] are expected
/// to exist in the asset store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub description: CategoryDescription,
    pub image: Option<AssetName>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Category {
    /// Artifact pair owned by this record, if it has an image.
    pub fn assets(&self) -> Option<AssetPair> {
        self.image.clone().map(AssetPair::for_base)
    }
}

/// Data required to insert a new [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub description: CategoryDescription,
    pub image: Option<AssetName>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Replacement values applied to an existing [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryUpdate {
    pub name: CategoryName,
    pub description: CategoryDescription,
    pub image: Option<AssetName>,
    pub updated_at: NaiveDateTime,
}
