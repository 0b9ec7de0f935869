use thiserror::Error;

#[derive(Error, Debug)]
pub enum BibleError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to parse {file}: {reason}")]
    Parse { file: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BibleError {
    pub fn not_found(what: impl Into<String>) -> Self {
        BibleError::NotFound(what.into())
    }

    pub fn parse(file: impl Into<String>, reason: impl ToString) -> Self {
        BibleError::Parse {
            file: file.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, BibleError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, BibleError>;
