use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A layer could not be read or does not match the config shape.
    #[error("failed to load verdict config: {0}")]
    Figment(#[from] figment::Error),

    /// A key parsed but holds a value verdict cannot use.
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
