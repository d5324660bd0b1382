//! Application API endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use super::{error, require_gender, success, ApiResult};
use crate::errors::AppError;
use crate::inventory;
use crate::models::{
    Application, ApplicationStatus, CreateApplicationRequest, ReviewApplicationRequest,
};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ApplicationQuery {
    #[serde(default)]
    pub status: Option<String>,
}

/// Decode a submission body, reporting a bad `gender` as `INVALID_GENDER`
/// rather than a generic decode failure.
fn parse_submission(body: Value) -> Result<CreateApplicationRequest, AppError> {
    require_gender(body.get("gender").and_then(Value::as_str))?;
    Ok(serde_json::from_value(body)?)
}

/// Field checks that need neither the catalog nor the database.
fn validate_submission(request: &CreateApplicationRequest) -> Result<(), AppError> {
    if request.student_name.trim().is_empty() {
        return Err(AppError::Validation("Student name is required".to_string()));
    }
    // Student matric numbers look like 21/8477
    if !request.matric_number.contains('/') {
        return Err(AppError::Validation(
            "Student matric number should use format: 21/8477".to_string(),
        ));
    }
    if !request.agree_terms {
        return Err(AppError::Validation(
            "Please agree to the terms and conditions".to_string(),
        ));
    }
    if request.room_id.trim().is_empty() {
        return Err(AppError::Validation("Please select a room".to_string()));
    }
    Ok(())
}

/// POST /api/applications - Submit an application for a bed.
pub async fn submit_application(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Application> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let request = match payload
        .map_err(AppError::from)
        .and_then(|Json(body)| parse_submission(body))
    {
        Ok(request) => request,
        Err(e) => return error(e, revision_id),
    };

    if let Err(e) = validate_submission(&request) {
        return error(e, revision_id);
    }

    let Some(hostel) = inventory::find_hostel(&request.hostel_id) else {
        return error(AppError::unknown_hostel(&request.hostel_id), revision_id);
    };

    if hostel.gender != request.gender {
        return error(
            AppError::Validation(format!(
                "{} is reserved for {} students",
                hostel.name,
                hostel.gender.as_str()
            )),
            revision_id,
        );
    }

    match state.repo.create_application(hostel, &request).await {
        Ok(application) => {
            tracing::info!(
                application = %application.id,
                room = %application.room_id,
                "Application submitted"
            );
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(application, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/applications/:id - Get a single application.
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Application> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.get_application(&id).await {
        Ok(Some(application)) => success(application, revision_id),
        Ok(None) => error(
            AppError::NotFound(format!("Application {} not found", id)),
            revision_id,
        ),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/admin/applications - List applications, optionally by status.
pub async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<ApplicationQuery>,
) -> ApiResult<Vec<Application>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let status = match query.status.as_deref().filter(|s| !s.is_empty()) {
        None => None,
        Some(value) => match ApplicationStatus::from_str(value) {
            Some(status) => Some(status),
            None => {
                return error(
                    AppError::Validation(format!("Unknown status '{}'", value)),
                    revision_id,
                )
            }
        },
    };

    match state.repo.list_applications(status).await {
        Ok(applications) => success(applications, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// PUT /api/admin/applications/:id/status - Approve or reject an application.
pub async fn review_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ReviewApplicationRequest>, JsonRejection>,
) -> ApiResult<Application> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return error(rejection.into(), revision_id),
    };

    match state.repo.review_application(&id, &request).await {
        Ok(application) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(application, new_revision)
        }
        Err(e) => {
            tracing::warn!(application = %id, "Review failed: {}", e);
            error(e, revision_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn request() -> CreateApplicationRequest {
        CreateApplicationRequest {
            student_name: "Ada Obi".to_string(),
            matric_number: "21/8477".to_string(),
            department: None,
            gender: Gender::Female,
            hostel_id: "mary".to_string(),
            room_id: "mary-1".to_string(),
            room_type_preference: None,
            special_requests: None,
            medical_conditions: None,
            emergency_contact: None,
            emergency_phone: None,
            agree_terms: true,
        }
    }

    #[test]
    fn test_valid_submission() {
        assert!(validate_submission(&request()).is_ok());
    }

    #[test]
    fn test_requires_terms() {
        let mut r = request();
        r.agree_terms = false;
        assert!(matches!(
            validate_submission(&r),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_admin_style_matric_number() {
        let mut r = request();
        r.matric_number = "21-8282".to_string();
        assert!(validate_submission(&r).is_err());
    }

    #[test]
    fn test_parse_submission_reports_invalid_gender() {
        let body = serde_json::json!({
            "studentName": "Ada Obi",
            "matricNumber": "21/8477",
            "gender": "other",
            "hostelId": "mary",
            "roomId": "mary-1",
            "agreeTerms": true
        });
        assert!(matches!(
            parse_submission(body),
            Err(AppError::InvalidGender(_))
        ));
    }

    #[test]
    fn test_parse_submission_reports_bad_fields() {
        let body = serde_json::json!({
            "studentName": "Ada Obi",
            "matricNumber": "21/8477",
            "gender": "female",
            "hostelId": "mary",
            "roomId": "mary-1",
            "agreeTerms": "yes"
        });
        assert!(matches!(parse_submission(body), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_parse_submission_accepts_department() {
        let body = serde_json::json!({
            "studentName": "Ada Obi",
            "matricNumber": "21/8477",
            "department": "Accounting",
            "gender": "female",
            "hostelId": "mary",
            "roomId": "mary-1",
            "agreeTerms": true
        });
        let request = parse_submission(body).unwrap();
        assert_eq!(request.gender, Gender::Female);
        assert_eq!(request.department.as_deref(), Some("Accounting"));
    }

    #[test]
    fn test_rejects_blank_name() {
        let mut r = request();
        r.student_name = "   ".to_string();
        assert!(validate_submission(&r).is_err());
    }
}
