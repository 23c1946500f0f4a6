use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use common::types::ApiResponse;
use models::student::Student;
use service::student::{CreateStudentInput, UpdateStudentInput};
use tracing::info;

use crate::{errors::ApiError, routes::AppState};

/// Ids that do not parse as integers cannot name a student.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| ApiError::NotFound)
}

#[utoipa::path(
    get, path = "/students", tag = "students",
    responses(
        (status = 200, description = "All students", body = crate::openapi::StudentListResponseDoc),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Student>>>, ApiError> {
    let students = state.students.list().await?;
    info!(count = students.len(), "list students");
    Ok(Json(ApiResponse::list(students)))
}

#[utoipa::path(
    get, path = "/students/{id}", tag = "students",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::StudentResponseDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<ApiResponse<Student>>, ApiError> {
    let id = parse_id(&id)?;
    let student = state.students.get(id).await?;
    Ok(Json(ApiResponse::ok(student)))
}

#[utoipa::path(
    post, path = "/students", tag = "students",
    request_body = crate::openapi::CreateStudentDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::StudentResponseDoc),
        (status = 400, description = "Validation error or duplicate email", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateStudentInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Student>>), ApiError> {
    let Json(input) = payload?;
    let created = state.students.create(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created))))
}

#[utoipa::path(
    put, path = "/students/{id}", tag = "students",
    params(("id" = i64, Path, description = "Student id")),
    request_body = crate::openapi::UpdateStudentDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::StudentResponseDoc),
        (status = 400, description = "Validation error or duplicate email", body = crate::openapi::ErrorResponseDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStudentInput>, JsonRejection>,
) -> Result<Json<ApiResponse<Student>>, ApiError> {
    let id = parse_id(&id)?;
    // unknown ids win over malformed bodies
    state.students.get(id).await?;
    let Json(input) = payload?;
    let updated = state.students.update(id, input).await?;
    Ok(Json(ApiResponse::ok(updated)))
}

#[utoipa::path(
    delete, path = "/students/{id}", tag = "students",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.students.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
