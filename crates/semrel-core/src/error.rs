//! Error types for semrel-core.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in semrel-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A string could not be read as a semantic version.
    #[error("invalid version '{input}': {reason}")]
    InvalidVersion {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A version range expression could not be compiled.
    #[error("invalid version range '{range}': {reason}")]
    InvalidRange {
        /// The rejected expression.
        range: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Release strategy is not one of `none`, `tag`, `release`.
    #[error("unknown release strategy: {0}")]
    UnknownStrategy(String),

    /// Repository coordinates are not of the form `owner/name`.
    #[error("invalid repository '{0}' - expected OWNER/NAME")]
    InvalidRepository(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
