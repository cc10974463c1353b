use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::UserService;
use crate::models::ApiResponse;

pub async fn list_users_by_major(
    service: &UserService,
    major_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_users_by_major(major_id).await {
        Ok(users) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(users, "Data fetched successfully")))
        }
        Err(e) => {
            error!("Failed to list users of major {major_id}: {e}");
            Ok(HttpResponse::InternalServerError().json(ApiResponse::internal_error(e)))
        }
    }
}
