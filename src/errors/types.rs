//! Error type definitions for the catalog service

use thiserror::Error;

/// Error returned by catalog and identity operations
///
/// Services return this; the web layer maps each variant to a status code
/// in [`crate::web::responses::handle_error`].
#[derive(Error, Debug)]
pub enum AppError {
    /// Failure surfaced by a repository
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Client sent malformed or missing fields
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        /// Offending field, `None` when the body as a whole is unusable
        field: Option<String>,
    },

    /// Channel, device or user that does not exist
    #[error("Not found: {resource} with id {id}")]
    NotFound { resource: String, id: String },

    /// The caller has no valid session
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// A feature was requested that the running config does not enable
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The identity provider misbehaved or was unreachable
    #[error("External service error: {service} - {message}")]
    ExternalService { service: String, message: String },

    /// Anything else; never shown verbatim to clients
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Errors raised below the service layer
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Database errors from SeaORM
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Unique or foreign key constraint rejected the write
    #[error("Constraint violation: {constraint} - {message}")]
    ConstraintViolation { constraint: String, message: String },

    /// Row addressed by an update did not exist
    #[error("Record not found: {table} with {field} = {value}")]
    RecordNotFound {
        table: String,
        field: String,
        value: String,
    },
}

/// Constructors used across services and handlers
impl AppError {
    /// Create a validation error naming the offending field
    pub fn validation<F: Into<String>, S: Into<String>>(field: F, message: S) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a validation error that is not tied to a single field
    pub fn invalid_body<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    pub fn not_found<R: Into<String>, I: ToString>(resource: R, id: I) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.to_string(),
        }
    }

    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Feature disabled by configuration
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Provider call failed
    pub fn external_service<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::ExternalService {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl RepositoryError {
    pub fn record_not_found<T: Into<String>, F: Into<String>, V: ToString>(
        table: T,
        field: F,
        value: V,
    ) -> Self {
        Self::RecordNotFound {
            table: table.into(),
            field: field.into(),
            value: value.to_string(),
        }
    }

    /// Classify a SeaORM error, pulling unique violations out of the generic bucket
    pub fn from_db(err: sea_orm::DbErr, constraint: &str) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(message)) => Self::ConstraintViolation {
                constraint: constraint.to_string(),
                message,
            },
            _ => Self::Database(err),
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation { .. })
    }
}
