use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item not found: {0}")]
    NotFound(Uuid),

    #[error("Item with id '{0}' already exists")]
    DuplicateId(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid fields: {0}")]
    InvalidFields(#[from] ValidationErrors),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ItemError {
    /// The caller sent something unacceptable (maps to 400).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ItemError::Validation(_) | ItemError::InvalidFields(_) | ItemError::DuplicateId(_)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ItemError::NotFound(_))
    }
}

pub type ItemResult<T> = Result<T, ItemError>;

/// Convert ItemError to AppError for standardized error responses
impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(id) => AppError::NotFound(format!("Item {} not found", id)),
            ItemError::DuplicateId(id) => {
                AppError::BadRequest(format!("Item with id '{}' already exists", id))
            }
            ItemError::Validation(msg) => AppError::BadRequest(msg),
            ItemError::InvalidFields(errors) => AppError::ValidationError(errors),
            ItemError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        // Convert to AppError for the standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use validator::ValidationError;

    #[test]
    fn test_kinds() {
        let id = Uuid::now_v7();

        assert!(ItemError::Validation("bad".into()).is_validation());
        assert!(ItemError::DuplicateId(id).is_validation());
        assert!(ItemError::NotFound(id).is_not_found());
        assert!(!ItemError::NotFound(id).is_validation());
        assert!(!ItemError::Internal("boom".into()).is_validation());
        assert!(!ItemError::Internal("boom".into()).is_not_found());
    }

    #[test]
    fn test_status_mapping() {
        let id = Uuid::now_v7();
        let mut fields = ValidationErrors::new();
        fields.add("name", ValidationError::new("length"));

        let cases = [
            (ItemError::NotFound(id), StatusCode::NOT_FOUND),
            (ItemError::DuplicateId(id), StatusCode::BAD_REQUEST),
            (ItemError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (ItemError::InvalidFields(fields), StatusCode::BAD_REQUEST),
            (
                ItemError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
