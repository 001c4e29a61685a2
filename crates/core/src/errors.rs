use thiserror::Error;

use crate::engine::EngineError;

/// Client-caused request problems. The display strings are the exact messages
/// returned to callers.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Both 'budget' and 'type' parameters are required")]
    MissingParameters,
    #[error("Budget must be greater than 0")]
    NonPositiveBudget,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApplicationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("data unavailable: {0}")]
    DataUnavailable(String),
    #[error(transparent)]
    Computation(#[from] EngineError),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("data unavailable: {message}")]
    DataUnavailable { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

pub const NO_DATA_MESSAGE: &str = "No laptop data available";

impl InterfaceError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest { .. } => 400,
            Self::DataUnavailable { .. } | Self::Internal { .. } => 500,
        }
    }

    /// Message placed in the `error` field of the response body.
    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest { message, .. }
            | Self::DataUnavailable { message, .. }
            | Self::Internal { message, .. } => message,
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::BadRequest { correlation_id, .. }
            | Self::DataUnavailable { correlation_id, .. }
            | Self::Internal { correlation_id, .. } => correlation_id,
        }
    }

    pub fn internal(detail: impl std::fmt::Display, correlation_id: impl Into<String>) -> Self {
        Self::Internal {
            message: format!("Internal server error: {detail}"),
            correlation_id: correlation_id.into(),
        }
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::DataUnavailable { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        match value {
            ApplicationError::Validation(error) => Self::BadRequest {
                message: error.to_string(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::DataUnavailable(_) => Self::DataUnavailable {
                message: NO_DATA_MESSAGE.to_owned(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::Computation(error) => Self::internal(error, "unassigned"),
        }
    }
}
