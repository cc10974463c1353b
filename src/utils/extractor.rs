//! 安全的路径参数提取器
//!
//! 解析失败时直接返回统一格式的 400 响应。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use std::future::{Ready, ready};

use crate::models::ApiResponse;

fn bad_path_param(message: String) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(message.clone()));
    InternalError::from_response(message, response).into()
}

fn parse_i64_param(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    let raw = req
        .match_info()
        .get(name)
        .ok_or_else(|| bad_path_param(format!("{name} is required")))?;

    raw.trim()
        .parse::<i64>()
        .map_err(|_| bad_path_param(format!("Invalid {name}: {raw}")))
}

macro_rules! define_safe_i64_extractor {
    ($(
        $(#[$meta:meta])*
        $name:ident => $param:literal
    ),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(parse_i64_param(req, $param).map($name))
                }
            }
        )*
    };
}

define_safe_i64_extractor! {
    /// 路径中的 `{id}`
    SafeIDI64 => "id",
    /// 路径中的 `{major_id}`
    SafeMajorIdI64 => "major_id",
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test, web};

    async fn echo(id: SafeIDI64) -> HttpResponse {
        HttpResponse::Ok().body(id.0.to_string())
    }

    #[actix_web::test]
    async fn test_valid_id() {
        let app = test::init_service(App::new().route("/items/{id}", web::get().to(echo))).await;
        let req = test::TestRequest::get().uri("/items/42").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, web::Bytes::from_static(b"42"));
    }

    #[actix_web::test]
    async fn test_invalid_id_returns_envelope() {
        let app = test::init_service(App::new().route("/items/{id}", web::get().to(echo))).await;
        let req = test::TestRequest::get().uri("/items/abc").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["response"]["status"], "error");
        assert_eq!(body["response"]["message"], "Invalid id: abc");
        assert!(body["data"].is_null());
    }
}
