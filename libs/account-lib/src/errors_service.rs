use crate::repository::errors::UserRepositoryError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum UserServiceError {
    #[error("login name already used")]
    LoginAlreadyUsed,

    #[error("email is already in use")]
    EmailAlreadyUsed,

    #[error("resource not found")]
    NotFound,

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<UserRepositoryError> for UserServiceError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::LoginAlreadyUsed => UserServiceError::LoginAlreadyUsed,
            UserRepositoryError::EmailAlreadyUsed => UserServiceError::EmailAlreadyUsed,
            UserRepositoryError::NotFound => UserServiceError::NotFound,
            UserRepositoryError::Sqlx(e) => UserServiceError::Internal(e.into()),
        }
    }
}

impl From<validator::ValidationErrors> for UserServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        UserServiceError::Validation(errors.to_string())
    }
}
