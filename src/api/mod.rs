//! HTTP API module for the attendance engine.
//!
//! This module provides the REST endpoints for clock events, schedule
//! lookups, assignments, overrides, roster views and attendance reads.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AssignmentRequest, AttendanceQuery, BulkAssignmentRequest, ClockEventRequest, OverrideRequest,
    RosterQuery, UnscheduledQuery,
};
pub use response::{
    ApiError, ApiErrorResponse, AttendanceListResponse, BulkAssignmentFailure,
    BulkAssignmentResponse, RecordResponse,
};
pub use state::AppState;
