//! Cross-references between verses, keyed by the English abbreviations of
//! the source corpus and served under local book ids.

pub mod index;
pub mod resolver;

pub use index::CrossRefCatalog;
pub use resolver::{CrossRefResolver, LabeledReference};
