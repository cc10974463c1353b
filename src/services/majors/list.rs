use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::MajorService;
use crate::models::ApiResponse;

pub async fn list_majors(
    service: &MajorService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_majors().await {
        Ok(majors) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            majors,
            "Data fetched successfully",
        ))),
        Err(e) => {
            error!("Failed to list majors: {e}");
            Ok(HttpResponse::InternalServerError().json(ApiResponse::internal_error(e)))
        }
    }
}
