//! Uniform operation envelopes.

use crate::{Error, Result};
use serde::{Serialize, Serializer, ser::SerializeStruct};

/// The `{success, data?, error?}` envelope handed to presentation code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreResponse<T> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Payload on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> StoreResponse<T> {
    /// Creates a successful response.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Creates a failed response.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

impl<T> From<Result<T>> for StoreResponse<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::failure(e.to_string()),
        }
    }
}

/// Which trash batch produced a [`BatchOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    /// Restore every trashed ring.
    Restore,
    /// Permanently delete every trashed ring.
    Delete,
}

impl BatchKind {
    /// Name of the success count in serialized outcomes.
    #[must_use]
    pub const fn count_field(self) -> &'static str {
        match self {
            Self::Restore => "restored",
            Self::Delete => "deleted",
        }
    }

    /// Past-tense verb for summaries.
    #[must_use]
    pub const fn past_tense(self) -> &'static str {
        match self {
            Self::Restore => "Restored",
            Self::Delete => "Deleted",
        }
    }
}

/// Result of a sequential batch over the trash.
///
/// Serializes as `{success, restored|deleted, total, errors?}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// The batch that ran.
    pub kind: BatchKind,
    /// True iff at least one item succeeded, or there was nothing to do.
    pub success: bool,
    /// Items that succeeded (restored or deleted).
    pub processed: usize,
    /// Items attempted.
    pub total: usize,
    /// One message per failed item.
    pub errors: Vec<String>,
}

impl Serialize for BatchOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let fields = if self.errors.is_empty() { 3 } else { 4 };
        let mut state = serializer.serialize_struct("BatchOutcome", fields)?;
        state.serialize_field("success", &self.success)?;
        state.serialize_field(self.kind.count_field(), &self.processed)?;
        state.serialize_field("total", &self.total)?;
        if self.errors.is_empty() {
            state.skip_field("errors")?;
        } else {
            state.serialize_field("errors", &self.errors)?;
        }
        state.end()
    }
}

impl BatchOutcome {
    /// Outcome for a batch with no items.
    #[must_use]
    pub const fn empty(kind: BatchKind) -> Self {
        Self {
            kind,
            success: true,
            processed: 0,
            total: 0,
            errors: Vec::new(),
        }
    }

    /// Builds an outcome from per-item counts.
    #[must_use]
    pub const fn from_counts(
        kind: BatchKind,
        processed: usize,
        total: usize,
        errors: Vec<String>,
    ) -> Self {
        Self {
            kind,
            success: total == 0 || processed > 0,
            processed,
            total,
            errors,
        }
    }

    /// Converts any failed item into [`Error::PartialFailure`].
    ///
    /// # Errors
    ///
    /// Returns `PartialFailure` if at least one item failed.
    pub fn ensure_complete(self) -> Result<Self> {
        if self.errors.is_empty() {
            return Ok(self);
        }
        Err(self.into_partial_failure())
    }

    /// Converts a batch where nothing succeeded into [`Error::PartialFailure`].
    ///
    /// # Errors
    ///
    /// Returns `PartialFailure` if `success` is false.
    pub fn ensure_success(self) -> Result<Self> {
        if self.success {
            return Ok(self);
        }
        Err(self.into_partial_failure())
    }

    fn into_partial_failure(self) -> Error {
        Error::PartialFailure {
            succeeded: self.processed,
            total: self.total,
            errors: self.errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_from_result() {
        let ok: StoreResponse<u32> = Ok(7).into();
        assert!(ok.success);
        assert_eq!(ok.data, Some(7));

        let err: StoreResponse<u32> = Err(Error::firebase_not_configured()).into();
        assert!(!err.success);
        assert_eq!(err.error.as_deref(), Some("Firebase not configured"));
    }

    #[test]
    fn test_response_json_omits_absent_fields() {
        let json = serde_json::to_value(StoreResponse::<()>::failure("boom")).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "error": "boom"}));
    }

    #[test]
    fn test_batch_success_rule() {
        assert!(BatchOutcome::empty(BatchKind::Delete).success);
        let errors = || vec!["x".to_string(), "y".to_string()];
        assert!(BatchOutcome::from_counts(BatchKind::Restore, 1, 3, errors()).success);
        assert!(!BatchOutcome::from_counts(BatchKind::Restore, 0, 2, errors()).success);
    }

    #[test]
    fn test_batch_json_names_count_by_kind() {
        let restored = BatchOutcome::from_counts(BatchKind::Restore, 3, 3, vec![]);
        assert_eq!(
            serde_json::to_value(&restored).unwrap(),
            serde_json::json!({"success": true, "restored": 3, "total": 3})
        );

        let deleted = BatchOutcome::from_counts(BatchKind::Delete, 0, 1, vec!["boom".into()]);
        assert_eq!(
            serde_json::to_value(&deleted).unwrap(),
            serde_json::json!({"success": false, "deleted": 0, "total": 1, "errors": ["boom"]})
        );
    }

    #[test]
    fn test_ensure_success_rejects_only_total_failure() {
        let partial = BatchOutcome::from_counts(BatchKind::Restore, 1, 2, vec!["x".into()]);
        assert!(partial.ensure_success().is_ok());

        let err = BatchOutcome::from_counts(BatchKind::Delete, 0, 2, vec!["x".into(), "y".into()])
            .ensure_success()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::PartialFailure {
                succeeded: 0,
                total: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_ensure_complete() {
        let complete = BatchOutcome::from_counts(BatchKind::Restore, 2, 2, vec![]);
        assert!(complete.ensure_complete().is_ok());
        let err = BatchOutcome::from_counts(BatchKind::Restore, 1, 2, vec!["ring_9 failed".into()])
            .ensure_complete()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::PartialFailure {
                succeeded: 1,
                total: 2,
                ..
            }
        ));
    }
}
