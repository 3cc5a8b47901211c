use thiserror::Error;

/// Errors surfaced to the user by a session.
///
/// None of these end the session: the user corrects the input and tries
/// again. The `Display` text is the inline message shown next to the control
/// that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Please provide your API key")]
    MissingCredential,

    /// The service answered 401. The stored key is kept, only re-prompted.
    #[error("Invalid API key. Please check your API key.")]
    InvalidCredential,

    #[error("Please enter a prompt")]
    EmptyPrompt,

    #[error("Please select at least one language")]
    NoLanguageSelected,

    /// Any other rejection or transport failure.
    #[error("{0}")]
    GenerationError(String),

    /// Best effort only, logged and never shown as a blocking error.
    #[error("Failed to copy text: {0}")]
    CopyFailure(String),
}

impl SessionError {
    /// Whether this error was caught locally, before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SessionError::MissingCredential
                | SessionError::EmptyPrompt
                | SessionError::NoLanguageSelected
        )
    }
}
