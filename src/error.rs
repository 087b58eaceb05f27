use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GendersError {
    #[error("Failed to parse name {field:?}: failed to parse range {range:?}")]
    Range { field: String, range: String },
    #[error("Failed to tokenize query {query:?}: mismatched parentheses")]
    MismatchedParentheses { query: String },
    #[error("Line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<GendersError>,
    },
    #[error("{}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GendersError>;

// Helper conversions
impl From<config::ConfigError> for GendersError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
