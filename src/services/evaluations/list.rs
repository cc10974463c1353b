use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::EvaluationService;
use crate::models::ApiResponse;

pub async fn list_evaluations(
    service: &EvaluationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_evaluations().await {
        Ok(evaluations) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            evaluations,
            "Data fetched successfully",
        ))),
        Err(e) => {
            error!("Failed to list evaluations: {e}");
            Ok(HttpResponse::InternalServerError().json(ApiResponse::internal_error(e)))
        }
    }
}
