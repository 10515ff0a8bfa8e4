use thiserror::Error;

/// Errors raised while loading the idiom dataset or tagger lexicon.
///
/// All of these are fatal at startup; nothing in a running session produces one.
#[derive(Debug, Error)]
pub enum DataError {
    /// Wrapper around IO errors (missing file, permissions, etc.).
    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Wrapper around CSV parse errors.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The header row lacks a column the game needs.
    #[error("idiom source is missing required column '{0}'")]
    MissingColumn(&'static str),

    /// The source parsed but held no usable idiom rows.
    #[error("idiom source {0} contains no idioms")]
    Empty(String),

    /// Lexicon file could not be parsed.
    #[error("invalid lexicon file {path}: {reason}")]
    Lexicon { path: String, reason: String },
}

/// Why an idiom attempt was turned away. Always recoverable: the player is
/// told what went wrong and asked to try again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("phrase does not look like an idiom")]
    NotIdiomLike,

    #[error("phrase must start with '{required}' but starts with '{found}'")]
    WrongStartingLetter { required: char, found: char },

    #[error("phrase was already played this session")]
    AlreadyPlayed,
}
