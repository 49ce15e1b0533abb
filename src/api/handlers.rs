//! HTTP request handlers for the attendance API.
//!
//! This module contains the handler functions for all API endpoints. Every
//! request gets a correlation id that is attached to its log events.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    routing::{get, post, put},
};
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::attendance::AttendanceSummary;
use crate::models::{
    ClockEventKind, DailyOverride, DateRangeAssignment, EffectiveSchedule, Employee, EmployeeId,
};
use crate::schedule::RosterDayView;

use super::request::{
    AssignmentRequest, AttendanceQuery, BulkAssignmentRequest, ClockEventRequest, OverrideRequest,
    RosterQuery, UnscheduledQuery,
};
use super::response::{
    ApiError, ApiErrorResponse, AttendanceListResponse, BulkAssignmentResponse, RecordResponse,
};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/attendance", get(list_attendance_handler))
        .route("/attendance/entry", post(entry_handler))
        .route("/attendance/exit", post(exit_handler))
        .route("/schedule/:employee_id/:date", get(schedule_handler))
        .route("/assignments", post(create_assignment_handler))
        .route("/assignments/bulk", post(bulk_assignment_handler))
        .route("/overrides", put(override_handler))
        .route("/employees", put(employee_handler))
        .route("/roster", get(roster_handler))
        .route("/roster/unscheduled", get(unscheduled_handler))
        .with_state(state)
}

/// Unwraps a JSON body, turning serde failures into a 400.
fn json_body<T>(correlation_id: Uuid, payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem.
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    })
}

fn query_params<T>(correlation_id: Uuid, query: Result<Query<T>, QueryRejection>) -> ApiResult<T> {
    query.map(|Query(q)| q).map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection, "Invalid query string");
        ApiErrorResponse::bad_request(rejection.body_text())
    })
}

fn engine_error(correlation_id: Uuid, error: crate::error::EngineError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %error, "Request rejected");
    error.into()
}

async fn entry_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockEventRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RecordResponse>)> {
    clock_event(state, payload, ClockEventKind::Entry)
}

async fn exit_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockEventRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RecordResponse>)> {
    clock_event(state, payload, ClockEventKind::Exit)
}

/// Shared body of the entry and exit handlers.
fn clock_event(
    state: AppState,
    payload: Result<Json<ClockEventRequest>, JsonRejection>,
    kind: ClockEventKind,
) -> ApiResult<(StatusCode, Json<RecordResponse>)> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(correlation_id, payload)?;
    info!(
        correlation_id = %correlation_id,
        employee = %request.employee_id,
        kind = %kind,
        "Processing clock event"
    );

    let engine = state.engine();
    let result = match request.timestamp {
        Some(at) => engine.record_clock_event(request.employee_id, &at, kind),
        None => engine.record_clock_event(request.employee_id, &Utc::now(), kind),
    };
    let record = result.map_err(|err| engine_error(correlation_id, err))?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

async fn list_attendance_handler(
    State(state): State<AppState>,
    query: Result<Query<AttendanceQuery>, QueryRejection>,
) -> ApiResult<Json<AttendanceListResponse>> {
    let correlation_id = Uuid::new_v4();
    let query = query_params(correlation_id, query)?;
    if query.end < query.start {
        return Err(ApiErrorResponse::bad_request("end must not be before start"));
    }

    let records = state
        .engine()
        .attendance()
        .range(query.employee_id, query.start, query.end);
    let summary = AttendanceSummary::from_records(&records);
    info!(
        correlation_id = %correlation_id,
        records = records.len(),
        "Attendance range read"
    );
    Ok(Json(AttendanceListResponse {
        records: records.into_iter().map(Into::into).collect(),
        summary,
    }))
}

async fn schedule_handler(
    State(state): State<AppState>,
    path: Result<Path<(EmployeeId, NaiveDate)>, PathRejection>,
) -> ApiResult<Json<EffectiveSchedule>> {
    let correlation_id = Uuid::new_v4();
    let Path((employee, date)) = path.map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection, "Invalid path");
        ApiErrorResponse::bad_request(rejection.body_text())
    })?;

    state
        .engine()
        .resolver()
        .require_schedule(employee, date)
        .map(Json)
        .map_err(|err| engine_error(correlation_id, err))
}

async fn create_assignment_handler(
    State(state): State<AppState>,
    payload: Result<Json<AssignmentRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DateRangeAssignment>)> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(correlation_id, payload)?;
    let assignment = state
        .engine()
        .assign(request.into())
        .map_err(|err| engine_error(correlation_id, err))?;
    info!(correlation_id = %correlation_id, assignment_id = %assignment.id, "Assignment created");
    Ok((StatusCode::CREATED, Json(assignment)))
}

async fn bulk_assignment_handler(
    State(state): State<AppState>,
    payload: Result<Json<BulkAssignmentRequest>, JsonRejection>,
) -> ApiResult<Json<BulkAssignmentResponse>> {
    let correlation_id = Uuid::new_v4();
    let (employees, bulk) = json_body(correlation_id, payload)?.into_parts();
    let outcome = state
        .engine()
        .assign_bulk(&employees, bulk)
        .map_err(|err| engine_error(correlation_id, err))?;
    info!(
        correlation_id = %correlation_id,
        created = outcome.created.len(),
        failed = outcome.errors.len(),
        "Bulk assignment processed"
    );
    Ok(Json(outcome.into()))
}

async fn override_handler(
    State(state): State<AppState>,
    payload: Result<Json<OverrideRequest>, JsonRejection>,
) -> ApiResult<Json<DailyOverride>> {
    let correlation_id = Uuid::new_v4();
    let entry = json_body(correlation_id, payload)?
        .into_override()
        .map_err(ApiErrorResponse::bad_request)?;
    state
        .engine()
        .set_override(entry.clone())
        .map_err(|err| engine_error(correlation_id, err))?;
    Ok(Json(entry))
}

async fn employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<Employee>, JsonRejection>,
) -> ApiResult<Json<Employee>> {
    let correlation_id = Uuid::new_v4();
    let employee = json_body(correlation_id, payload)?;
    state.engine().register_employee(employee.clone());
    info!(correlation_id = %correlation_id, employee = %employee.id, "Employee registered");
    Ok(Json(employee))
}

async fn roster_handler(
    State(state): State<AppState>,
    query: Result<Query<RosterQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<RosterDayView>>> {
    let correlation_id = Uuid::new_v4();
    let query = query_params(correlation_id, query)?;
    if query.end < query.start {
        return Err(ApiErrorResponse::bad_request("end must not be before start"));
    }
    Ok(Json(state.engine().weekly_roster(
        query.start,
        query.end,
        query.department.as_deref(),
    )))
}

async fn unscheduled_handler(
    State(state): State<AppState>,
    query: Result<Query<UnscheduledQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Employee>>> {
    let correlation_id = Uuid::new_v4();
    let query = query_params(correlation_id, query)?;
    Ok(Json(
        state
            .engine()
            .unscheduled_on(query.date, query.department.as_deref()),
    ))
}
