use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::EvaluationService;
use crate::models::{ApiResponse, evaluations::requests::UpdateEvaluationRequest};
use crate::utils::validate::validate_not_blank;

pub async fn update_evaluation(
    service: &EvaluationService,
    evaluation_id: i64,
    mut update_data: UpdateEvaluationRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(semester) = &update_data.semester {
        if let Err(msg) = validate_not_blank(semester, "semester") {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(msg)));
        }
        update_data.semester = Some(semester.trim().to_string());
    }

    let storage = service.get_storage(request);

    match storage.update_evaluation(evaluation_id, update_data).await {
        Ok(Some(evaluation)) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(evaluation, "Data updated successfully"))),
        Ok(None) => {
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty("Data not found")))
        }
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict()
            .json(ApiResponse::error_empty("Each question can only be answered once"))),
        Err(e) => {
            error!("Evaluation update failed: {e}");
            Ok(HttpResponse::InternalServerError().json(ApiResponse::internal_error(e)))
        }
    }
}
