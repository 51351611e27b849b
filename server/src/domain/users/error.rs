//! User analytics error types

use std::fmt;

use thiserror::Error;

use crate::data::DataError;

/// Identifier an input validation failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdField {
    ProjectId,
    UserId,
}

impl IdField {
    pub const fn as_str(&self) -> &'static str {
        match self {
            IdField::ProjectId => "projectId",
            IdField::UserId => "userId",
        }
    }
}

impl fmt::Display for IdField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum UserAnalyticsError {
    /// Malformed input, rejected before any query runs
    #[error("Invalid {field}: {message}")]
    Validation { field: IdField, message: String },

    /// A resolved user is missing from one of the aggregated result sets
    #[error("User {user_id} missing from {source_set} results")]
    Consistency {
        user_id: String,
        source_set: &'static str,
    },

    /// Store failure or timeout in any sub-query
    #[error("Upstream query failed: {0}")]
    Upstream(#[from] DataError),
}

impl UserAnalyticsError {
    pub fn validation(field: IdField, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}
