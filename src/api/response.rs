//! Response types for the attendance API.
//!
//! This module defines the success bodies, the error body and the mapping
//! from [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::attendance::AttendanceSummary;
use crate::error::EngineError;
use crate::models::{AttendanceRecord, DateRangeAssignment, EmployeeId, RecordState};
use crate::store::BulkAssignmentOutcome;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 with a `VALIDATION_ERROR` body.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::validation_error(message),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

/// The machine-readable code and HTTP status for an engine error.
fn classify(error: &EngineError) -> (StatusCode, &'static str) {
    match error {
        EngineError::ConfigNotFound { .. }
        | EngineError::ConfigParseError { .. }
        | EngineError::InvalidConfig { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
        EngineError::InvalidShiftDefinition { .. } => {
            (StatusCode::BAD_REQUEST, "INVALID_SHIFT_DEFINITION")
        }
        EngineError::ShiftNotFound { .. } => (StatusCode::NOT_FOUND, "SHIFT_NOT_FOUND"),
        EngineError::InactiveShift { .. } => (StatusCode::BAD_REQUEST, "INACTIVE_SHIFT"),
        EngineError::InvalidAssignmentRange { .. } => {
            (StatusCode::BAD_REQUEST, "INVALID_ASSIGNMENT_RANGE")
        }
        EngineError::ConflictingAssignment { .. } => {
            (StatusCode::CONFLICT, "CONFLICTING_ASSIGNMENT")
        }
        EngineError::AssignmentNotFound { .. } => (StatusCode::NOT_FOUND, "ASSIGNMENT_NOT_FOUND"),
        EngineError::EmployeeNotFound { .. } => (StatusCode::NOT_FOUND, "EMPLOYEE_NOT_FOUND"),
        EngineError::DuplicateEntry { .. } => (StatusCode::CONFLICT, "DUPLICATE_ENTRY"),
        EngineError::DuplicateExit { .. } => (StatusCode::CONFLICT, "DUPLICATE_EXIT"),
        EngineError::MissingEntry { .. } => (StatusCode::BAD_REQUEST, "MISSING_ENTRY"),
        EngineError::NoActiveSchedule { .. } => (StatusCode::NOT_FOUND, "NO_ACTIVE_SCHEDULE"),
        EngineError::RecordConflict { .. } => (StatusCode::CONFLICT, "RECORD_CONFLICT"),
        EngineError::RecordNotFound { .. } => (StatusCode::NOT_FOUND, "RECORD_NOT_FOUND"),
    }
}

impl From<EngineError> for ApiError {
    fn from(error: EngineError) -> Self {
        let (_, code) = classify(&error);
        ApiError::new(code, error.to_string())
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let (status, code) = classify(&error);
        let error = match &error {
            EngineError::ConflictingAssignment {
                conflicting_range, ..
            } => ApiError::with_details(code, error.to_string(), conflicting_range.clone()),
            EngineError::DuplicateEntry { existing, .. } | EngineError::DuplicateExit { existing, .. } => {
                ApiError::with_details(code, error.to_string(), format!("recorded at {}", existing))
            }
            _ => ApiError::new(code, error.to_string()),
        };
        ApiErrorResponse { status, error }
    }
}

/// An attendance record with its presentation fields.
#[derive(Debug, Clone, Serialize)]
pub struct RecordResponse {
    /// The stored record.
    #[serde(flatten)]
    pub record: AttendanceRecord,
    /// Lifecycle state.
    pub state: RecordState,
    /// Worked time as `"{h}h {m}m"`.
    pub worked_time: String,
}

impl From<AttendanceRecord> for RecordResponse {
    fn from(record: AttendanceRecord) -> Self {
        Self {
            state: record.state(),
            worked_time: record.worked_time_label(),
            record,
        }
    }
}

/// Body of `GET /attendance`.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceListResponse {
    /// Matching records, by date then employee.
    pub records: Vec<RecordResponse>,
    /// Totals over `records`.
    pub summary: AttendanceSummary,
}

/// One employee a bulk assignment skipped.
#[derive(Debug, Clone, Serialize)]
pub struct BulkAssignmentFailure {
    /// The employee.
    pub employee_id: EmployeeId,
    /// Why the assignment was rejected.
    pub error: ApiError,
}

/// Body of `POST /assignments/bulk`.
#[derive(Debug, Clone, Serialize)]
pub struct BulkAssignmentResponse {
    /// Stored assignments.
    pub created: Vec<DateRangeAssignment>,
    /// Rejected employees.
    pub errors: Vec<BulkAssignmentFailure>,
}

impl From<BulkAssignmentOutcome> for BulkAssignmentResponse {
    fn from(outcome: BulkAssignmentOutcome) -> Self {
        Self {
            created: outcome.created,
            errors: outcome
                .errors
                .into_iter()
                .map(|(employee_id, error)| BulkAssignmentFailure {
                    employee_id,
                    error: error.into(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_clock_event_errors_map_to_conflict_or_bad_request() {
        let date = make_date("2026-01-15");
        let duplicate: ApiErrorResponse = EngineError::DuplicateExit {
            employee: EmployeeId(1),
            date,
            existing: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
        }
        .into();
        assert_eq!(duplicate.status, StatusCode::CONFLICT);
        assert_eq!(duplicate.error.code, "DUPLICATE_EXIT");
        assert_eq!(duplicate.error.details.as_deref(), Some("recorded at 16:00:00"));

        let missing: ApiErrorResponse = EngineError::MissingEntry {
            employee: EmployeeId(1),
            date,
        }
        .into();
        assert_eq!(missing.status, StatusCode::BAD_REQUEST);
        assert_eq!(missing.error.code, "MISSING_ENTRY");
    }

    #[test]
    fn test_no_active_schedule_is_not_found() {
        let response: ApiErrorResponse = EngineError::NoActiveSchedule {
            employee: EmployeeId(1),
            date: make_date("2026-01-15"),
        }
        .into();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.error.code, "NO_ACTIVE_SCHEDULE");
    }

    #[test]
    fn test_record_response_flattens_record() {
        let mut record = AttendanceRecord::new(EmployeeId(3), make_date("2026-01-15"));
        record.worked_hours = 7.5;
        let json = serde_json::to_value(RecordResponse::from(record)).unwrap();
        assert_eq!(json["employee"], 3);
        assert_eq!(json["worked_time"], "7h 30m");
        assert_eq!(json["state"], "no_entry");
    }
}
