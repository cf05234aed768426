use thiserror::Error;

/// Sum type representing every way building or sending a message can fail.
#[derive(Error, Debug)]
pub enum DiscordError {
    /// A setter was given a value Discord would reject.
    #[error("Invalid value: {0}")]
    Validation(String),

    /// A field mutator was called before any field was opened.
    #[error("Invalid call order: {0}")]
    Sequence(String),

    #[error("No content is set. Use text() or set_content() to set it.")]
    MissingContent,

    #[error("Client is misconfigured: {0}")]
    Configuration(String),

    #[error("Payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The exchange never completed. Wraps whatever the [Transport] in use
    /// reported.
    ///
    /// [Transport]: super::api::Transport
    #[error("Discord API request failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<reqwest::Error> for DiscordError {
    fn from(e: reqwest::Error) -> Self {
        DiscordError::Transport(Box::new(e))
    }
}

impl DiscordError {
    /// Whether this error was raised synchronously by a setter rejecting its
    /// input. Sequence errors are a kind of validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, DiscordError::Validation(_) | DiscordError::Sequence(_))
    }
}

pub type Result<T, E = DiscordError> = std::result::Result<T, E>;
