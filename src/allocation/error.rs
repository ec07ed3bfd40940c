use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationErrorKind {
    InvalidInput,
    Io,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AllocationError {
    pub kind: AllocationErrorKind,
    pub message: String,
}

impl AllocationError {
    pub fn new(kind: AllocationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

pub fn invalid_input(message: impl Into<String>) -> AllocationError {
    AllocationError::new(AllocationErrorKind::InvalidInput, message)
}

pub fn io_error(message: impl Into<String>) -> AllocationError {
    AllocationError::new(AllocationErrorKind::Io, message)
}
