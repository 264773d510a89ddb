use anyhow::anyhow;
use std::fmt;
use sunyi_core::AppError;
use thiserror::Error;

/// Account columns that must be unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Username,
    Email,
}

impl UniqueField {
    pub fn message(&self) -> &'static str {
        match self {
            UniqueField::Username => "Username already taken",
            UniqueField::Email => "Email already registered",
        }
    }

    /// Maps a Postgres unique constraint name to the column it guards.
    pub fn from_constraint(name: &str) -> Option<Self> {
        match name {
            "users_username_key" => Some(UniqueField::Username),
            "users_email_key" => Some(UniqueField::Email),
            _ => None,
        }
    }
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniqueField::Username => f.write_str("username"),
            UniqueField::Email => f.write_str("email"),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} is already in use")]
    Conflict(UniqueField),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoreError {
    /// Turns a failed insert into [`StoreError::Conflict`] when a unique
    /// constraint on `users` rejected it.
    pub fn from_insert(err: sqlx::Error) -> Self {
        let field = match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                db.constraint().and_then(UniqueField::from_constraint)
            }
            _ => None,
        };

        match field {
            Some(field) => StoreError::Conflict(field),
            None => StoreError::Database(err),
        }
    }

    pub fn into_app_error(self) -> AppError {
        match self {
            StoreError::Conflict(field) => AppError::conflict(anyhow!(field.message())),
            other => AppError::database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_names() {
        assert_eq!(
            UniqueField::from_constraint("users_username_key"),
            Some(UniqueField::Username)
        );
        assert_eq!(
            UniqueField::from_constraint("users_email_key"),
            Some(UniqueField::Email)
        );
        assert_eq!(UniqueField::from_constraint("gigs_pkey"), None);
    }

    #[test]
    fn test_conflict_is_409_with_field_message() {
        let err = StoreError::Conflict(UniqueField::Email).into_app_error();
        assert_eq!(err.status.as_u16(), 409);
        assert_eq!(err.error.to_string(), "Email already registered");
    }

    #[test]
    fn test_other_errors_are_500() {
        let err = StoreError::Database(sqlx::Error::PoolClosed).into_app_error();
        assert_eq!(err.status.as_u16(), 500);
    }

    #[test]
    fn test_non_database_insert_error_is_not_conflict() {
        let err = StoreError::from_insert(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Database(_)));
    }
}
