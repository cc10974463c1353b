use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::EvaluationService;
use crate::models::{ApiResponse, evaluations::requests::EvaluationMajorQuery};

pub async fn list_evaluations_by_major(
    service: &EvaluationService,
    query: EvaluationMajorQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(major_id) = query.major_id else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty("major_id is required")));
    };

    let storage = service.get_storage(request);

    match storage.list_evaluations_by_major(major_id).await {
        Ok(evaluations) if evaluations.is_empty() => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty("No evaluations found for the specified major"),
        )),
        Ok(evaluations) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            evaluations,
            "Evaluations fetched successfully",
        ))),
        Err(e) => {
            error!("Failed to list evaluations of major {major_id}: {e}");
            Ok(HttpResponse::InternalServerError().json(ApiResponse::internal_error(e)))
        }
    }
}
