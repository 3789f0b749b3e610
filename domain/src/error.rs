//! Error types for the `domain` layer.
use entity_api::error::{EntityApiErrorKind, Error as EntityApiError};
use sea_orm::DbErr;
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in lower layers. The `source` field is used to hold the original error that caused
/// the domain error. `web` depends on `domain` but never directly on `entity_api`,
/// so every lower-layer error is translated here and `web` only maps `error_kind`s
/// to HTTP status codes.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Internal(InternalErrorKind),
    /// A business rule rejected the request before anything was written.
    Rule(RuleViolation),
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Entity(EntityErrorKind),
    Config,
    Other(String),
}

/// Enum representing the various kinds of entity errors that can bubble up from the "Entity" layer (`entity_api` and `entity`).
/// These errors are translated from the `entity_api` layer to the `domain` layer and reduced to a subset of error kinds
/// that are relevant to the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum EntityErrorKind {
    NotFound,
    Invalid,
    /// A unique or foreign key constraint rejected a write
    Conflict,
    /// Anything that went wrong while a transaction was open, or while opening
    /// or committing it
    DbTransaction,
    Other(String),
}

#[derive(Debug, PartialEq)]
pub enum RuleViolation {
    /// The entities involved are not in a state that allows the operation
    InvalidState(String),
    /// The operation would duplicate or race with an existing record
    Conflict(String),
}

impl Error {
    pub fn not_found(what: &str) -> Self {
        Error {
            source: Some(format!("{what} not found").into()),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
                EntityErrorKind::NotFound,
            )),
        }
    }

    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Rule(RuleViolation::InvalidState(reason.into())),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Rule(RuleViolation::Conflict(reason.into())),
        }
    }

    /// Wraps any failure of a transactional write phase.
    pub fn persistence(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Error {
            source: Some(source.into()),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
                EntityErrorKind::DbTransaction,
            )),
        }
    }

    pub fn is_rule_violation(&self) -> bool {
        matches!(self.error_kind, DomainErrorKind::Rule(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// This is where we translate errors from the `entity_api` layer to the `domain` layer.
impl From<EntityApiError> for Error {
    fn from(err: EntityApiError) -> Self {
        let entity_error_kind = match err.error_kind {
            EntityApiErrorKind::RecordNotFound => EntityErrorKind::NotFound,
            EntityApiErrorKind::InvalidQueryTerm => EntityErrorKind::Invalid,
            EntityApiErrorKind::RecordConflict => EntityErrorKind::Conflict,
            EntityApiErrorKind::SystemError => EntityErrorKind::DbTransaction,
            _ => EntityErrorKind::Other("EntityErrorKind".to_string()),
        };

        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(entity_error_kind)),
        }
    }
}

// Raised directly by `begin()` and `commit()` on a database transaction.
impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        Error::persistence(err)
    }
}
