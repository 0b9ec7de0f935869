use crate::crossref::{CrossRefCatalog, CrossRefResolver};
use crate::constants::book_file;
use crate::error::{BibleError, Result};
use crate::registry::BookRegistry;
use crate::source::{DataSource, DirectorySource};
use crate::store::ChapterStore;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Initialized, read-only view of a data bundle.
///
/// Catalog documents are parsed in [`Library::open`]; per-book files are
/// parsed on first use and cached when `cache_enabled` is set.
pub struct Library {
    registry: Arc<BookRegistry>,
    store: ChapterStore,
    resolver: CrossRefResolver,
}

/// Outcome of [`Library::check`]
#[derive(Debug, Default)]
pub struct CheckReport {
    pub books_checked: usize,
    pub crossref_files_checked: usize,
    pub failures: Vec<String>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Library {
    pub fn open(source: Arc<dyn DataSource>, cache_enabled: bool) -> Result<Self> {
        info!("Opening bundle from {}", source.describe());
        let registry = Arc::new(BookRegistry::load(source.as_ref())?);
        let catalog = Arc::new(CrossRefCatalog::load(source.as_ref())?);

        for id in &catalog.unmapped_books().books {
            if !registry.contains(id) {
                warn!("Unmapped book '{}' is not in the book catalog", id);
            }
        }

        Ok(Self {
            store: ChapterStore::new(source.clone(), registry.clone(), cache_enabled),
            resolver: CrossRefResolver::new(source, catalog, cache_enabled),
            registry,
        })
    }

    pub fn open_dir(dir: impl AsRef<Path>, cache_enabled: bool) -> Result<Self> {
        Self::open(Arc::new(DirectorySource::new(dir.as_ref())), cache_enabled)
    }

    pub fn registry(&self) -> &BookRegistry {
        &self.registry
    }

    pub fn store(&self) -> &ChapterStore {
        &self.store
    }

    pub fn catalog(&self) -> &CrossRefCatalog {
        self.resolver.catalog()
    }

    pub fn resolver(&self) -> &CrossRefResolver {
        &self.resolver
    }

    /// Parse every per-book file once and collect the failures
    pub fn check(&self) -> CheckReport {
        let mut report = CheckReport::default();

        for meta in self.registry.books() {
            report.books_checked += 1;
            if let Err(e) = self.check_book(&meta.id) {
                report.failures.push(format!("{}: {}", meta.id, e));
            }
        }

        for meta in self.registry.books() {
            if !self.catalog().has_cross_references(&meta.id) {
                continue;
            }
            report.crossref_files_checked += 1;
            if let Err(e) = self.resolver.cross_references(&meta.id) {
                report.failures.push(format!("{} cross-references: {}", meta.id, e));
            }
        }

        for abbr in self.catalog().mapping().mappings.keys() {
            if self.catalog().resolve_data_file(abbr).is_err() {
                report
                    .failures
                    .push(format!("{}: mapped but missing from the index", abbr));
            }
        }

        info!(
            "Checked {} books and {} cross-reference files, {} failures",
            report.books_checked,
            report.crossref_files_checked,
            report.failures.len()
        );
        report
    }

    fn check_book(&self, id: &str) -> Result<()> {
        let book = self.store.book(id)?;
        let chapters = self.store.chapter_numbers(id)?;
        match chapters.last() {
            Some(&last) if last > book.chapter_count => Err(BibleError::parse(
                book_file(id),
                format!("chapter {} exceeds the stored count of {}", last, book.chapter_count),
            )),
            _ => Ok(()),
        }
    }
}
