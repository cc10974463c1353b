use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{debug, error};

use super::EvaluationService;
use crate::models::{ApiResponse, evaluations::requests::CheckEvaluationRequest};
use crate::utils::validate::validate_not_blank;

pub async fn check_evaluation(
    service: &EvaluationService,
    mut check_data: CheckEvaluationRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(major_ids) = check_data.major_ids() else {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty("majorIds must be a non-empty array.")));
    };
    if let Err(msg) = validate_not_blank(&check_data.semester, "semester") {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(msg)));
    }
    // 与创建时保存的值保持一致
    check_data.semester = check_data.semester.trim().to_string();

    let storage = service.get_storage(request);

    match storage
        .evaluation_exists(
            check_data.setup_id,
            &major_ids,
            &check_data.semester,
            check_data.end_date,
        )
        .await
    {
        Ok(true) => {
            debug!(
                "Duplicate evaluation for setup {} in {}",
                check_data.setup_id, check_data.semester
            );
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                "An evaluation with the exact same content already exists.",
            )))
        }
        Ok(false) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            false,
            "Data existence check completed successfully",
        ))),
        Err(e) => {
            error!("Evaluation existence check failed: {e}");
            Ok(HttpResponse::InternalServerError().json(ApiResponse::internal_error(e)))
        }
    }
}
