use crate::cache::BookCache;
use crate::constants::book_file;
use crate::error::{BibleError, Result};
use crate::registry::BookRegistry;
use crate::sanitize::clean;
use crate::source::{read_json, DataSource};
use crate::types::{Book, Chapter, Verse};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// Per-book verse data, read from `books/<id>.json` on first use.
///
/// The cache holds books exactly as stored; verse text is cleaned on the way
/// out, verse by verse.
pub struct ChapterStore {
    source: Arc<dyn DataSource>,
    registry: Arc<BookRegistry>,
    cache: BookCache<Book>,
}

impl ChapterStore {
    pub fn new(source: Arc<dyn DataSource>, registry: Arc<BookRegistry>, cache_enabled: bool) -> Self {
        Self {
            source,
            registry,
            cache: BookCache::new(cache_enabled),
        }
    }

    /// Full book with every verse's text cleaned
    pub fn book(&self, id: &str) -> Result<Book> {
        let raw = self.raw_book(id)?;
        Ok(Book {
            id: raw.id.clone(),
            name: raw.name.clone(),
            chapter_count: raw.chapter_count,
            verse_count: raw.verse_count,
            verses: raw.verses.iter().map(cleaned).collect(),
        })
    }

    /// Verses of one chapter in source order. An unknown chapter number gives
    /// an empty chapter.
    pub fn chapter(&self, id: &str, number: u32) -> Result<Chapter> {
        let raw = self.raw_book(id)?;
        let verses: Vec<Verse> = raw
            .verses
            .iter()
            .filter(|v| v.chapter == number)
            .map(cleaned)
            .collect();
        debug!("{} {}: {} verses", id, number, verses.len());

        Ok(Chapter {
            id: id.to_string(),
            name: raw.name.clone(),
            chapter: number,
            verses,
        })
    }

    /// Distinct chapter numbers present in the verse data
    pub fn chapter_numbers(&self, id: &str) -> Result<Vec<u32>> {
        let raw = self.raw_book(id)?;
        let numbers: BTreeSet<u32> = raw.verses.iter().map(|v| v.chapter).collect();
        Ok(numbers.into_iter().collect())
    }

    fn raw_book(&self, id: &str) -> Result<Arc<Book>> {
        self.registry.book(id)?;
        self.cache.get_or_load(id, || {
            let name = book_file(id);
            read_json(self.source.as_ref(), &name).map_err(|e| match e {
                BibleError::NotFound(_) => {
                    BibleError::not_found(format!("verse data for book {}", id))
                }
                other => other,
            })
        })
    }
}

fn cleaned(verse: &Verse) -> Verse {
    Verse {
        text: clean(&verse.text),
        ..verse.clone()
    }
}
