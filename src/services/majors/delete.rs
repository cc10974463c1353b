use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::MajorService;
use crate::models::ApiResponse;

pub async fn delete_major(
    service: &MajorService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_major(id).await {
        Ok(true) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Data deleted successfully")))
        }
        Ok(false) => {
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty("Data not found")))
        }
        Err(e) => {
            error!("Major deletion failed: {e}");
            Ok(HttpResponse::InternalServerError().json(ApiResponse::internal_error(e)))
        }
    }
}
