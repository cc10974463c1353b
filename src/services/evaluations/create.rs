use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::EvaluationService;
use crate::models::{ApiResponse, evaluations::requests::CreateEvaluationRequest};
use crate::utils::validate::validate_not_blank;

pub async fn create_evaluation(
    service: &EvaluationService,
    mut evaluation_data: CreateEvaluationRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_not_blank(&evaluation_data.semester, "semester") {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(msg)));
    }
    evaluation_data.semester = evaluation_data.semester.trim().to_string();

    let storage = service.get_storage(request);

    match storage.create_evaluation(evaluation_data).await {
        Ok(evaluation) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(evaluation, "Data created successfully"))),
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict()
            .json(ApiResponse::error_empty("Each question can only be answered once"))),
        Err(e) => {
            error!("Evaluation creation failed: {e}");
            Ok(HttpResponse::InternalServerError().json(ApiResponse::internal_error(e)))
        }
    }
}
