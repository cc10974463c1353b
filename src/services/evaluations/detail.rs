use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::EvaluationService;
use crate::models::ApiResponse;

pub async fn get_evaluation_detail(
    service: &EvaluationService,
    evaluation_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_evaluation_report(evaluation_id).await {
        Ok(Some(report)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(report, "Data fetched successfully")))
        }
        Ok(None) => {
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty("Data not found")))
        }
        Err(e) => {
            error!("Failed to assemble evaluation report {evaluation_id}: {e}");
            Ok(HttpResponse::InternalServerError().json(ApiResponse::internal_error(e)))
        }
    }
}
