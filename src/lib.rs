#[cfg(feature = "catalog")]
mod catalog;
mod error;
mod rbtree;

#[cfg(feature = "catalog")]
pub use catalog::Catalog;
#[cfg(feature = "catalog")]
pub use error::CatalogError;
pub use error::InvalidKeyError;
pub use rbtree::{Iter, OrderedKeySet, Violation};
