use crate::application::ports::identity_provider::IdentityError;
use crate::domain::ValidationError;

/// Outcome of a use case that the HTTP layer needs to tell apart.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("identity provider rejected the request: {0}")]
    IdentityProvider(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(what: &str) -> Self {
        AppError::NotFound(format!("{what} not found"))
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.0)
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl From<IdentityError> for AppError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Rejected { message, .. } => AppError::IdentityProvider(message),
            IdentityError::Transport(e) => AppError::Internal(e),
        }
    }
}
