use super::index::CrossRefCatalog;
use crate::cache::BookCache;
use crate::constants::crossref_file;
use crate::error::{BibleError, Result};
use crate::source::{read_json, DataSource};
use crate::types::{BookCrossReferences, CrossReference, VerseRef};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// A cross-reference in the local namespace with a display label for its target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledReference {
    #[serde(flatten)]
    pub reference: CrossReference,
    pub label: String,
}

/// Loads per-book cross-reference files and translates them into the
/// local book-id namespace.
pub struct CrossRefResolver {
    source: Arc<dyn DataSource>,
    catalog: Arc<CrossRefCatalog>,
    cache: BookCache<BookCrossReferences>,
}

impl CrossRefResolver {
    pub fn new(source: Arc<dyn DataSource>, catalog: Arc<CrossRefCatalog>, cache_enabled: bool) -> Self {
        Self {
            source,
            catalog,
            cache: BookCache::new(cache_enabled),
        }
    }

    pub fn catalog(&self) -> &CrossRefCatalog {
        &self.catalog
    }

    /// Every cross-reference stored for a book, unfiltered and untranslated
    pub fn cross_references(&self, dutch_id: &str) -> Result<Arc<BookCrossReferences>> {
        let english = self.catalog.dutch_to_english(dutch_id)?;
        let file = self.catalog.resolve_data_file(english)?;
        self.cache.get_or_load(dutch_id, || {
            let name = crossref_file(file);
            read_json(self.source.as_ref(), &name).map_err(|e| match e {
                BibleError::NotFound(_) => BibleError::not_found(format!(
                    "cross-reference file {} for book {}",
                    file, dutch_id
                )),
                other => other,
            })
        })
    }

    /// References whose source is exactly `chapter:verse`, in storage order
    pub fn cross_references_for_verse(
        &self,
        dutch_id: &str,
        chapter: u32,
        verse: u32,
    ) -> Result<Vec<CrossReference>> {
        let refs = self.cross_references(dutch_id)?;
        Ok(refs
            .cross_references
            .iter()
            .filter(|r| r.from.is_at(chapter, verse))
            .cloned()
            .collect())
    }

    /// References from one chapter, with `from.book` set to `dutch_id` and
    /// targets translated to local ids. Targets without a local id are skipped.
    pub fn cross_references_for_chapter(
        &self,
        dutch_id: &str,
        chapter: u32,
    ) -> Result<Vec<CrossReference>> {
        let refs = self.cross_references(dutch_id)?;
        let mut result = Vec::new();
        for r in refs.cross_references.iter().filter(|r| r.from.chapter == chapter) {
            match self.translate_to_local(r) {
                Ok(mut local) => {
                    local.from.book = Some(dutch_id.to_string());
                    result.push(local);
                }
                Err(e) => debug!("Skipping reference {}: {}", self.format_reference(&r.to, false), e),
            }
        }
        Ok(result)
    }

    /// Like [`cross_references_for_verse`](Self::cross_references_for_verse),
    /// translated to local ids and labelled for display
    pub fn labeled_for_verse(
        &self,
        dutch_id: &str,
        chapter: u32,
        verse: u32,
    ) -> Result<Vec<LabeledReference>> {
        let refs = self.cross_references_for_verse(dutch_id, chapter, verse)?;
        let mut result = Vec::with_capacity(refs.len());
        for r in refs {
            let label = self.format_reference(&r.to, true);
            match self.translate_to_local(&r) {
                Ok(mut local) => {
                    local.from.book = Some(dutch_id.to_string());
                    result.push(LabeledReference {
                        reference: local,
                        label,
                    });
                }
                Err(e) => debug!("Skipping reference {}: {}", label, e),
            }
        }
        Ok(result)
    }

    /// Translate `to.book` and `to.endBook` to local ids. Fails as a whole if
    /// either one has no mapping; `from` is left as is.
    pub fn translate_to_local(&self, reference: &CrossReference) -> Result<CrossReference> {
        let mut to = reference.to.clone();
        if let Some(book) = &reference.to.book {
            to.book = Some(self.catalog.english_to_dutch(book)?.to_string());
        }
        if let Some(end_book) = &reference.to.end_book {
            to.end_book = Some(self.catalog.english_to_dutch(end_book)?.to_string());
        }
        Ok(CrossReference {
            from: reference.from.clone(),
            to,
            votes: reference.votes,
        })
    }

    /// Human-readable rendering of a verse or range. With `use_local_names`,
    /// book names are translated where a mapping exists and kept otherwise.
    pub fn format_reference(&self, r: &VerseRef, use_local_names: bool) -> String {
        let name = |book: &str| -> String {
            if use_local_names {
                if let Ok(local) = self.catalog.english_to_dutch(book) {
                    return local.to_string();
                }
            }
            book.to_string()
        };
        let prefix = r.book.as_deref().map(|b| format!("{} ", name(b))).unwrap_or_default();

        if let Some(end_verse) = r.end_verse.filter(|v| *v > 0) {
            let end_chapter = r.end_chapter.filter(|c| *c > 0).unwrap_or(r.chapter);
            return match r.end_book.as_deref() {
                Some(end_book) if r.book.as_deref() != Some(end_book) => format!(
                    "{}{}:{}-{} {}:{}",
                    prefix,
                    r.chapter,
                    r.verse,
                    name(end_book),
                    end_chapter,
                    end_verse
                ),
                _ if end_chapter != r.chapter => {
                    format!("{}{}:{}-{}:{}", prefix, r.chapter, r.verse, end_chapter, end_verse)
                }
                _ => format!("{}{}:{}-{}", prefix, r.chapter, r.verse, end_verse),
            };
        }

        format!("{}{}:{}", prefix, r.chapter, r.verse)
    }
}
