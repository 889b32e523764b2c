//! Analytics error types.

use finsight_shared::AppError;
use thiserror::Error;

use crate::engine::Axis;
use crate::facts::SourceError;

/// Errors raised by analytics queries and the drill-down resolver.
///
/// Empty results are never errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    /// The data store could not be reached.
    #[error("Query '{query}' could not reach the data store: {message}")]
    Connectivity {
        /// Query identity.
        query: &'static str,
        /// Underlying error.
        message: String,
    },

    /// The store rejected or failed the statement.
    #[error("Query '{query}' failed: {message}")]
    Query {
        /// Query identity.
        query: &'static str,
        /// Underlying error.
        message: String,
    },

    /// The domain has no drill path along the axis.
    #[error("Domain '{domain}' does not support drilling by {axis}")]
    UnsupportedAxis {
        /// Domain name.
        domain: &'static str,
        /// Requested axis.
        axis: Axis,
    },
}

impl AnalyticsError {
    /// Attaches the query identity to a source failure.
    #[must_use]
    pub fn from_source(query: &'static str, err: SourceError) -> Self {
        match err {
            SourceError::Connectivity(message) => Self::Connectivity { query, message },
            SourceError::Query(message) => Self::Query { query, message },
        }
    }

    /// Query identity, when the error came from a query.
    #[must_use]
    pub const fn query(&self) -> Option<&'static str> {
        match self {
            Self::Connectivity { query, .. } | Self::Query { query, .. } => Some(*query),
            Self::UnsupportedAxis { .. } => None,
        }
    }
}

impl From<AnalyticsError> for AppError {
    fn from(err: AnalyticsError) -> Self {
        match &err {
            AnalyticsError::Connectivity { .. } => Self::ServiceUnavailable(err.to_string()),
            AnalyticsError::Query { .. } => Self::Database(err.to_string()),
            AnalyticsError::UnsupportedAxis { .. } => Self::Validation(err.to_string()),
        }
    }
}
