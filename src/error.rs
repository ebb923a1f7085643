use std::{error::Error, fmt};

/// The empty string marks the sentinel leaf and can not be stored as a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidKeyError;

impl fmt::Display for InvalidKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "the empty key is reserved and can not be inserted")
    }
}

impl Error for InvalidKeyError {}

#[cfg(feature = "catalog")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The title was empty or only whitespace.
    EmptyTitle,
    /// No copy of the title is currently on the shelf.
    NotOnShelf(String),
}

#[cfg(feature = "catalog")]
impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "book title can not be empty"),
            Self::NotOnShelf(title) => write!(f, "{title:?} is not on the shelf"),
        }
    }
}

#[cfg(feature = "catalog")]
impl Error for CatalogError {}

#[cfg(feature = "catalog")]
impl From<InvalidKeyError> for CatalogError {
    fn from(_err: InvalidKeyError) -> Self {
        Self::EmptyTitle
    }
}
