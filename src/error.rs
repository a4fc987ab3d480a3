/// A crate-wide result type alias using the custom [`Error`] enum.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building the docs page and its script.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required field of the Firebase web configuration is missing or blank.
    #[error("Firebase config is missing required field `{0}`")]
    MissingConfigField(&'static str),

    /// An option was set to a value the generated script cannot use.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// Embedded settings could not be serialized into the script.
    #[error("failed to serialize script settings: {0}")]
    Serialize(#[from] serde_json::Error),
}
