use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::error;

use super::UserService;
use crate::config::AppConfig;
use crate::models::{ApiResponse, users::requests::UpdateUserRequest};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_username};

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    mut update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(email) = &update_data.email
        && let Err(msg) = validate_email(email)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(msg)));
    }

    if let Some(username) = &update_data.username
        && let Err(msg) = validate_username(username)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(msg)));
    }

    // 校验并哈希新密码
    if let Some(password) = update_data.password.take() {
        if let Err(msg) = validate_password_simple(&password) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(msg)));
        }
        // 哈希密码（放入阻塞线程池）
        let argon2 = AppConfig::get().argon2.clone();
        match web::block(move || hash_password(&password, &argon2)).await {
            Ok(Ok(hash)) => update_data.password = Some(hash),
            Ok(Err(e)) => {
                error!("Password hashing failed: {e}");
                return Ok(HttpResponse::InternalServerError().json(ApiResponse::internal_error(e)));
            }
            Err(e) => {
                error!("Password hashing task failed: {e}");
                return Ok(HttpResponse::InternalServerError().json(ApiResponse::internal_error(e)));
            }
        }
    }

    let storage = service.get_storage(request);

    match storage.update_user(user_id, update_data).await {
        Ok(Some(user)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(user, "Data updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty("User not found"))),
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict()
            .json(ApiResponse::error_empty("Username or email already exists"))),
        Err(e) => {
            error!("User update failed: {e}");
            Ok(HttpResponse::InternalServerError().json(ApiResponse::internal_error(e)))
        }
    }
}
