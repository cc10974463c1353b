use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::EvaluationService;
use crate::models::ApiResponse;

pub async fn list_evaluation_overviews(
    service: &EvaluationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_evaluation_overviews().await {
        Ok(overviews) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            overviews,
            "Data fetched successfully",
        ))),
        Err(e) => {
            error!("Failed to list evaluation overviews: {e}");
            Ok(HttpResponse::InternalServerError().json(ApiResponse::internal_error(e)))
        }
    }
}
