//! Failure modes of the `config.ron` round-trip.

/// Errors raised while loading or persisting the viewer configuration.
///
/// All variants are recoverable: callers fall back to `Config::default()`
/// rather than refusing to start over a bad config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("could not read config.ron: {0}")]
    ReadError(#[source] std::io::Error),

    /// The config directory or file could not be written.
    #[error("could not write config.ron: {0}")]
    WriteError(#[source] std::io::Error),

    /// The file's contents did not deserialize into a `Config`.
    #[error("config.ron is not valid: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// The in-memory config failed to serialize to RON.
    #[error("could not serialize config to RON: {0}")]
    SerializeError(#[source] ron::Error),
}
