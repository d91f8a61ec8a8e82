//! Domain entities and value types shared by every layer.

pub mod asset;
pub mod category;
pub mod types;
