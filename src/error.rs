use thiserror::Error;

use crate::kernel::calc::CalcError;
use crate::memory::store::StoreError;
use crate::services::http::FetchError;

/// Umbrella error for everything a handler can fail with.
///
/// None of these ever reach the user verbatim: the dispatcher logs them and
/// answers with a friendly message instead.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("network failure: {0}")]
    NetworkFailure(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("invalid expression: {0}")]
    InvalidExpression(String),

    #[error("all {attempted} providers failed")]
    AllProvidersFailed { attempted: usize },

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl From<FetchError> for AssistantError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Network(msg) => AssistantError::NetworkFailure(msg),
            FetchError::Status(code) => AssistantError::NetworkFailure(format!("HTTP {}", code)),
            FetchError::Malformed(msg) => AssistantError::MalformedResponse(msg),
            FetchError::AllProvidersFailed { attempted } => {
                AssistantError::AllProvidersFailed { attempted }
            }
        }
    }
}

impl From<CalcError> for AssistantError {
    fn from(e: CalcError) -> Self {
        AssistantError::InvalidExpression(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AssistantError>;
