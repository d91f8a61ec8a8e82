pub mod categories;
pub mod errors;
pub mod images;
pub mod locks;

pub use errors::{ServiceError, ServiceResult};
pub use locks::CategoryLocks;
