/// Bundle layout constants shared by the loaders and the CLI.
/// Paths are relative to the data directory and always use `/` separators.

// Book catalog and per-book verse files
pub const BOOKS_CATALOG: &str = "books.json";
pub const BOOKS_DIR: &str = "books";

// Cross-reference documents
pub const CROSSREFS_DIR: &str = "crossrefs";
pub const BOOK_MAPPING: &str = "crossrefs/book-mapping.json";
pub const CROSSREF_INDEX: &str = "crossrefs/index.json";

/// Service name reported by the health endpoint and the CLI
pub const SERVICE_NAME: &str = "bijbel-api";

/// Path of the verse file for a book id
pub fn book_file(id: &str) -> String {
    format!("{}/{}.json", BOOKS_DIR, id)
}

/// Path of a cross-reference file named in the index
pub fn crossref_file(file_name: &str) -> String {
    format!("{}/{}", CROSSREFS_DIR, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_paths() {
        assert_eq!(book_file("genesis"), "books/genesis.json");
        assert_eq!(crossref_file("gen.json"), "crossrefs/gen.json");
    }
}
