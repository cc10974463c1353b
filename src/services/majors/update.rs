use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::MajorService;
use crate::models::{ApiResponse, majors::requests::UpdateMajorRequest};
use crate::utils::validate::{validate_emails, validate_not_blank, validate_slug};

pub async fn update_major(
    service: &MajorService,
    id: i64,
    mut update_data: UpdateMajorRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(name) = &update_data.name {
        if let Err(msg) = validate_not_blank(name, "name") {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(msg)));
        }
        update_data.name = Some(name.trim().to_string());
    }

    if let Some(slug) = &update_data.slug
        && let Err(msg) = validate_slug(slug)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(msg)));
    }

    if let Some(emails) = &update_data.emails
        && let Err(msg) = validate_emails(emails)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(msg)));
    }

    let storage = service.get_storage(request);

    match storage.update_major(id, update_data).await {
        Ok(Some(major)) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(major, "Data updated successfully"))),
        Ok(None) => {
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty("Data not found")))
        }
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict()
            .json(ApiResponse::error_empty("Major slug already exists"))),
        Err(e) => {
            error!("Major update failed: {e}");
            Ok(HttpResponse::InternalServerError().json(ApiResponse::internal_error(e)))
        }
    }
}
