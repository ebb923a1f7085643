use log::{info, warn};

use crate::{error::CatalogError, rbtree::OrderedKeySet};

/// A library shelf backed by the ordered title tree.
///
/// Every title ever added stays in the tree. Borrowing only takes a copy off the shelf, and
/// the shelf is rebuilt from the tree on the next successful [`Catalog::add_book`], which
/// puts borrowed copies back on display.
#[derive(Debug, Default)]
pub struct Catalog {
    titles: OrderedKeySet,
    shelf: Vec<String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a title after trimming surrounding whitespace and returns the trimmed title.
    pub fn add_book<'a>(&mut self, raw: &'a str) -> Result<&'a str, CatalogError> {
        let title = raw.trim();
        if title.is_empty() {
            warn!("rejected empty book title");
            return Err(CatalogError::EmptyTitle);
        }
        self.titles.insert(title)?;
        self.shelf = self.titles.sorted_keys();
        info!("book added: {title}");
        Ok(title)
    }

    /// Takes the first copy of `title` off the shelf.
    pub fn borrow_book(&mut self, title: &str) -> Result<String, CatalogError> {
        let Some(pos) = self.shelf.iter().position(|t| t == title) else {
            warn!("{title:?} is not on the shelf");
            return Err(CatalogError::NotOnShelf(title.to_owned()));
        };
        let book = self.shelf.remove(pos);
        info!("book borrowed: {book}");
        Ok(book)
    }

    /// Titles currently on display, in ascending order.
    pub fn shelf(&self) -> &[String] {
        &self.shelf
    }

    pub fn titles(&self) -> &OrderedKeySet {
        &self.titles
    }
}
