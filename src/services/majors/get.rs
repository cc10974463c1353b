use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::MajorService;
use crate::errors::Result;
use crate::models::{ApiResponse, majors::entities::Major};

fn respond(result: Result<Option<Major>>) -> HttpResponse {
    match result {
        Ok(Some(major)) => {
            HttpResponse::Ok().json(ApiResponse::success(major, "Data fetched successfully"))
        }
        Ok(None) => HttpResponse::NotFound().json(ApiResponse::error_empty("Data not found")),
        Err(e) => {
            error!("Failed to get major: {e}");
            HttpResponse::InternalServerError().json(ApiResponse::internal_error(e))
        }
    }
}

pub async fn get_major(
    service: &MajorService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    Ok(respond(storage.get_major_by_id(id).await))
}

pub async fn get_major_by_slug(
    service: &MajorService,
    slug: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    Ok(respond(storage.get_major_by_slug(slug.trim()).await))
}
