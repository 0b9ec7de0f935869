use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Catalog entry for a single book, as stored in `books.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookMetadata {
    pub id: String,
    pub name: String,
    pub order: u32,
}

/// Whether a verse opens a new paragraph in the source text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Paragraph {
    #[serde(rename = "y")]
    Start,
    #[serde(rename = "n")]
    Continue,
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub paragraph: Paragraph,
    /// Section heading when this verse opens a subsection
    #[serde(default)]
    pub title: String,
}

/// A whole book with its verse data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub name: String,
    #[serde(rename = "chapters")]
    pub chapter_count: u32,
    pub verse_count: u32,
    pub verses: Vec<Verse>,
}

/// A single chapter sliced out of a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub name: String,
    pub chapter: u32,
    pub verses: Vec<Verse>,
}

/// A verse or verse range. Ranges may span verses, chapters or books.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book: Option<String>,
    pub chapter: u32,
    pub verse: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_book: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_chapter: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_verse: Option<u32>,
}

impl VerseRef {
    pub fn verse(book: Option<&str>, chapter: u32, verse: u32) -> Self {
        Self {
            book: book.map(str::to_string),
            chapter,
            verse,
            ..Self::default()
        }
    }

    /// A zero end verse is treated the same as an absent one
    pub fn is_range(&self) -> bool {
        self.end_verse.is_some_and(|v| v > 0)
    }

    pub fn is_at(&self, chapter: u32, verse: u32) -> bool {
        self.chapter == chapter && self.verse == verse
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossReference {
    pub from: VerseRef,
    pub to: VerseRef,
    /// Attestation weight from the source corpus; may be negative
    pub votes: i64,
}

/// Contents of one per-book cross-reference file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookCrossReferences {
    pub book: String,
    pub total_references: usize,
    pub cross_references: Vec<CrossReference>,
}

/// `crossrefs/book-mapping.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookMapping {
    #[serde(default)]
    pub description: String,
    /// English abbreviation -> Dutch book id
    pub mappings: HashMap<String, String>,
    #[serde(default)]
    pub unmapped_books: UnmappedBooks,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmappedBooks {
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub books: Vec<String>,
}

/// `crossrefs/index.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossRefIndex {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub generated_date: String,
    pub total_books: usize,
    pub books: Vec<IndexEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    /// English abbreviation
    pub book: String,
    pub file: String,
    pub reference_count: usize,
}
