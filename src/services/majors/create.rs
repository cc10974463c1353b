use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::MajorService;
use crate::models::{ApiResponse, majors::requests::CreateMajorRequest};
use crate::utils::validate::{validate_emails, validate_not_blank, validate_slug};

pub async fn create_major(
    service: &MajorService,
    mut major_data: CreateMajorRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 验证名称
    if let Err(msg) = validate_not_blank(&major_data.name, "name") {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(msg)));
    }
    major_data.name = major_data.name.trim().to_string();

    // 验证 slug
    if let Err(msg) = validate_slug(&major_data.slug) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(msg)));
    }

    // 验证邮箱
    if let Some(emails) = &major_data.emails
        && let Err(msg) = validate_emails(emails)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(msg)));
    }

    let storage = service.get_storage(request);

    match storage.create_major(major_data).await {
        Ok(major) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(major, "Data created successfully"))),
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict()
            .json(ApiResponse::error_empty("Major slug already exists"))),
        Err(e) => {
            error!("Major creation failed: {e}");
            Ok(HttpResponse::InternalServerError().json(ApiResponse::internal_error(e)))
        }
    }
}
