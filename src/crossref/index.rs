use crate::constants::{BOOK_MAPPING, CROSSREF_INDEX};
use crate::error::{BibleError, Result};
use crate::source::{read_json, DataSource};
use crate::types::{BookMapping, CrossRefIndex, UnmappedBooks};
use std::collections::HashMap;
use tracing::{info, warn};

/// Book-id mapping between the cross-reference corpus and the local
/// namespace, plus the catalog of cross-reference files.
#[derive(Debug)]
pub struct CrossRefCatalog {
    mapping: BookMapping,
    index: CrossRefIndex,
    /// Dutch id -> English abbreviation
    reverse: HashMap<String, String>,
    /// English abbreviation -> file name
    files: HashMap<String, String>,
}

impl CrossRefCatalog {
    pub fn load(source: &dyn DataSource) -> Result<Self> {
        let mapping: BookMapping = read_json(source, BOOK_MAPPING)?;
        let index: CrossRefIndex = read_json(source, CROSSREF_INDEX)?;
        let catalog = Self::new(mapping, index)?;
        info!(
            "Loaded {} book mappings and {} cross-reference files",
            catalog.mapping.mappings.len(),
            catalog.files.len()
        );
        Ok(catalog)
    }

    /// Build the reverse map and file lookup. The forward mapping must be
    /// injective and must not map a book it also lists as unmapped.
    pub fn new(mapping: BookMapping, index: CrossRefIndex) -> Result<Self> {
        let mut reverse = HashMap::with_capacity(mapping.mappings.len());
        for (english, dutch) in &mapping.mappings {
            if let Some(previous) = reverse.insert(dutch.clone(), english.clone()) {
                return Err(BibleError::parse(
                    BOOK_MAPPING,
                    format!(
                        "'{}' and '{}' both map to '{}'",
                        previous, english, dutch
                    ),
                ));
            }
        }

        if let Some(both) = mapping
            .unmapped_books
            .books
            .iter()
            .find(|id| reverse.contains_key(id.as_str()))
        {
            return Err(BibleError::parse(
                BOOK_MAPPING,
                format!("'{}' is listed as unmapped but has a mapping", both),
            ));
        }

        let mut files = HashMap::with_capacity(index.books.len());
        for entry in &index.books {
            if files.insert(entry.book.clone(), entry.file.clone()).is_some() {
                return Err(BibleError::parse(
                    CROSSREF_INDEX,
                    format!("duplicate index entry for '{}'", entry.book),
                ));
            }
        }

        if index.total_books != index.books.len() {
            warn!(
                "{} declares {} books but lists {}",
                CROSSREF_INDEX,
                index.total_books,
                index.books.len()
            );
        }

        Ok(Self {
            mapping,
            index,
            reverse,
            files,
        })
    }

    pub fn english_to_dutch(&self, abbr: &str) -> Result<&str> {
        self.mapping
            .mappings
            .get(abbr)
            .map(String::as_str)
            .ok_or_else(|| BibleError::not_found(format!("mapping for book {}", abbr)))
    }

    pub fn dutch_to_english(&self, id: &str) -> Result<&str> {
        self.reverse
            .get(id)
            .map(String::as_str)
            .ok_or_else(|| BibleError::not_found(format!("mapping for Dutch book {}", id)))
    }

    pub fn has_cross_references(&self, id: &str) -> bool {
        self.dutch_to_english(id).is_ok()
    }

    /// File name backing an English abbreviation, as listed in the index
    pub fn resolve_data_file(&self, abbr: &str) -> Result<&str> {
        self.files
            .get(abbr)
            .map(String::as_str)
            .ok_or_else(|| BibleError::not_found(format!("cross-references for book {}", abbr)))
    }

    pub fn mapping(&self) -> &BookMapping {
        &self.mapping
    }

    pub fn index(&self) -> &CrossRefIndex {
        &self.index
    }

    pub fn unmapped_books(&self) -> &UnmappedBooks {
        &self.mapping.unmapped_books
    }
}
