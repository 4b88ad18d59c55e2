use std::fmt;

use pitch_types::models::EntityKind;
use thiserror::Error;

/// Failure reported by the storage handle itself.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("{0} connection lock poisoned")]
    Poisoned(&'static str),
}

impl StorageError {
    pub fn is_no_rows(&self) -> bool {
        matches!(self, Self::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }
}

/// Where a missing row was noticed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundPhase {
    Lookup,
    AfterUpdate,
}

impl fmt::Display for NotFoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lookup => f.write_str("not found"),
            Self::AfterUpdate => f.write_str("not found after update"),
        }
    }
}

pub type RepoResult<T> = Result<T, RepoError>;

/// Classified repository failure handed to the service layer.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{kind} with id {id} {phase}")]
    NotFound {
        kind: EntityKind,
        id: String,
        phase: NotFoundPhase,
    },

    #[error("error executing statement on {kind}: {source}")]
    WriteFailure {
        kind: EntityKind,
        #[source]
        source: StorageError,
    },

    #[error("error scanning {kind} row: {source}")]
    ReadFailure {
        kind: EntityKind,
        #[source]
        source: StorageError,
    },
}

impl RepoError {
    pub fn not_found(kind: EntityKind, id: &str) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
            phase: NotFoundPhase::Lookup,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The identifier a `NotFound` refers to.
    pub fn missing_id(&self) -> Option<&str> {
        match self {
            Self::NotFound { id, .. } => Some(id),
            _ => None,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::NotFound { kind, .. }
            | Self::WriteFailure { kind, .. }
            | Self::ReadFailure { kind, .. } => *kind,
        }
    }
}

/// Any failure of an INSERT/UPDATE/DELETE, constraint violations included.
pub(crate) fn classify_write(kind: EntityKind, err: StorageError) -> RepoError {
    RepoError::WriteFailure { kind, source: err }
}

/// No rows is a `NotFound` for `id`; anything else failed to decode.
pub(crate) fn classify_read(
    kind: EntityKind,
    id: &str,
    phase: NotFoundPhase,
    err: StorageError,
) -> RepoError {
    if err.is_no_rows() {
        RepoError::NotFound {
            kind,
            id: id.to_string(),
            phase,
        }
    } else {
        RepoError::ReadFailure { kind, source: err }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::types::Type;

    #[test]
    fn no_rows_becomes_not_found() {
        let err = classify_read(
            EntityKind::User,
            "U1",
            NotFoundPhase::Lookup,
            rusqlite::Error::QueryReturnedNoRows.into(),
        );
        assert!(err.is_not_found());
        assert_eq!(err.missing_id(), Some("U1"));
        assert_eq!(err.to_string(), "user with id U1 not found");
    }

    #[test]
    fn no_rows_after_update_keeps_phase() {
        let err = classify_read(
            EntityKind::Challenge,
            "123",
            NotFoundPhase::AfterUpdate,
            rusqlite::Error::QueryReturnedNoRows.into(),
        );
        assert_eq!(err.to_string(), "challenge with id 123 not found after update");
    }

    #[test]
    fn decode_error_becomes_read_failure() {
        let err = classify_read(
            EntityKind::Challenge,
            "123",
            NotFoundPhase::Lookup,
            rusqlite::Error::InvalidColumnType(2, "difficulty".into(), Type::Text).into(),
        );
        assert!(matches!(err, RepoError::ReadFailure { .. }));
        assert_eq!(err.missing_id(), None);
        assert!(err.to_string().starts_with("error scanning challenge row"));
    }

    #[test]
    fn poisoned_lock_on_read_is_read_failure() {
        let err = classify_read(
            EntityKind::Video,
            "v",
            NotFoundPhase::Lookup,
            StorageError::Poisoned("reader"),
        );
        assert!(matches!(err, RepoError::ReadFailure { .. }));
        assert_eq!(err.kind(), EntityKind::Video);
    }

    #[test]
    fn write_errors_are_write_failures() {
        let err = classify_write(EntityKind::Video, StorageError::Poisoned("writer"));
        assert!(matches!(err, RepoError::WriteFailure { .. }));
        assert_eq!(
            err.to_string(),
            "error executing statement on video: writer connection lock poisoned"
        );
    }
}
