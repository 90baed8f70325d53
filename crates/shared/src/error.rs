use thiserror::Error;

/// Failure modes of a remote content fetch.
///
/// `Cancelled` marks a superseded request and is never surfaced to the user;
/// every other variant is a genuine fetch failure that transitions the
/// overlay into its error state.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("request was cancelled")]
    Cancelled,
    #[error("page '{path}' was not found")]
    NotFound { path: String },
    #[error("remote returned status {status} for page '{path}': {message}")]
    Remote {
        path: String,
        status: u16,
        message: String,
    },
    #[error("transport failure fetching page '{path}': {message}")]
    Transport { path: String, message: String },
    #[error("failed to decode response for page '{path}': {message}")]
    Decode { path: String, message: String },
}

impl FetchError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// The path the failed request was originally issued for, when known.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Cancelled => None,
            Self::NotFound { path }
            | Self::Remote { path, .. }
            | Self::Transport { path, .. }
            | Self::Decode { path, .. } => Some(path),
        }
    }
}
