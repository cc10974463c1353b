use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::majors::requests::{CreateMajorRequest, UpdateMajorRequest};
use crate::services::MajorService;
use crate::utils::SafeIDI64;

// 懒加载的全局 MajorService 实例
static MAJOR_SERVICE: Lazy<MajorService> = Lazy::new(MajorService::new_lazy);

// HTTP处理程序
pub async fn list_majors(req: HttpRequest) -> ActixResult<HttpResponse> {
    MAJOR_SERVICE.list_majors(&req).await
}

pub async fn get_major(req: HttpRequest, major_id: SafeIDI64) -> ActixResult<HttpResponse> {
    MAJOR_SERVICE.get_major(major_id.0, &req).await
}

pub async fn get_major_by_slug(
    req: HttpRequest,
    slug: web::Path<String>,
) -> ActixResult<HttpResponse> {
    MAJOR_SERVICE
        .get_major_by_slug(slug.into_inner(), &req)
        .await
}

pub async fn create_major(
    req: HttpRequest,
    major_data: web::Json<CreateMajorRequest>,
) -> ActixResult<HttpResponse> {
    MAJOR_SERVICE
        .create_major(major_data.into_inner(), &req)
        .await
}

pub async fn update_major(
    req: HttpRequest,
    major_id: SafeIDI64,
    update_data: web::Json<UpdateMajorRequest>,
) -> ActixResult<HttpResponse> {
    MAJOR_SERVICE
        .update_major(major_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_major(req: HttpRequest, major_id: SafeIDI64) -> ActixResult<HttpResponse> {
    MAJOR_SERVICE.delete_major(major_id.0, &req).await
}

// 配置路由
pub fn configure_major_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/majors")
            .route("", web::get().to(list_majors))
            .route("", web::post().to(create_major))
            .route("/slug/{slug}", web::get().to(get_major_by_slug))
            .route("/{id}", web::get().to(get_major))
            .route("/{id}", web::put().to(update_major))
            .route("/{id}", web::delete().to(delete_major)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::testing::memory_storage;
    use actix_web::{http::StatusCode, test};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn test_create_major_returns_submitted_fields() {
        let storage = memory_storage().await;
        let app = init_test_app!(storage, configure_major_routes);

        let req = test::TestRequest::post()
            .uri("/majors")
            .set_json(json!({
                "name": "Informatics",
                "slug": "informatics",
                "emails": [" kaprodi@if.ac.id ", "sekretariat@if.ac.id"]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["response"]["status"], "success");
        assert_eq!(body["data"]["name"], "Informatics");
        assert_eq!(body["data"]["slug"], "informatics");
        assert_eq!(
            body["data"]["emails"],
            json!(["kaprodi@if.ac.id", "sekretariat@if.ac.id"])
        );
    }

    #[actix_web::test]
    async fn test_create_major_accepts_joined_emails() {
        let storage = memory_storage().await;
        let app = init_test_app!(storage, configure_major_routes);

        let req = test::TestRequest::post()
            .uri("/majors")
            .set_json(json!({
                "name": "Physics",
                "slug": "physics",
                "emails": "a@phys.ac.id, b@phys.ac.id"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["emails"], json!(["a@phys.ac.id", "b@phys.ac.id"]));
    }

    #[actix_web::test]
    async fn test_create_major_rejects_invalid_input() {
        let storage = memory_storage().await;
        let app = init_test_app!(storage, configure_major_routes);

        for payload in [
            json!({ "name": "  ", "slug": "blank-name" }),
            json!({ "name": "Biology", "slug": "Not A Slug" }),
            json!({ "name": "Biology", "slug": "biology", "emails": ["not-an-email"] }),
        ] {
            let req = test::TestRequest::post()
                .uri("/majors")
                .set_json(payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["response"]["status"], "error");
            assert!(body["data"].is_null());
        }
    }

    #[actix_web::test]
    async fn test_create_major_malformed_json() {
        let storage = memory_storage().await;
        let app = init_test_app!(storage, configure_major_routes);

        let req = test::TestRequest::post()
            .uri("/majors")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{\"name\": ")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_create_major_duplicate_slug_conflicts() {
        let storage = memory_storage().await;
        storage.seed_major("Informatics", "informatics", None).await;
        let app = init_test_app!(storage, configure_major_routes);

        let req = test::TestRequest::post()
            .uri("/majors")
            .set_json(json!({ "name": "Informatics 2", "slug": "informatics" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_list_majors_splits_emails() {
        let storage = memory_storage().await;
        storage.seed_major("No Mail", "no-mail", None).await;
        storage.seed_major("Single", "single", Some("one@ac.id")).await;
        storage
            .seed_major("Many", "many", Some(" a@ac.id ,b@ac.id,, "))
            .await;
        let app = init_test_app!(storage, configure_major_routes);

        let req = test::TestRequest::get().uri("/majors").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        let majors = body["data"].as_array().unwrap();
        assert_eq!(majors.len(), 3);
        assert_eq!(majors[0]["emails"], json!([]));
        assert_eq!(majors[1]["emails"], json!(["one@ac.id"]));
        assert_eq!(majors[2]["emails"], json!(["a@ac.id", "b@ac.id"]));
    }

    #[actix_web::test]
    async fn test_get_major_by_id_and_slug() {
        let storage = memory_storage().await;
        let id = storage
            .seed_major("Informatics", "informatics", Some("if@ac.id"))
            .await;
        let app = init_test_app!(storage, configure_major_routes);

        let req = test::TestRequest::get()
            .uri(&format!("/majors/{id}"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["slug"], "informatics");

        let req = test::TestRequest::get()
            .uri("/majors/slug/informatics")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["id"], id);
        assert_eq!(body["data"]["emails"], json!(["if@ac.id"]));

        let req = test::TestRequest::get()
            .uri("/majors/slug/unknown")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_missing_major_is_not_found() {
        let storage = memory_storage().await;
        let app = init_test_app!(storage, configure_major_routes);

        let requests = [
            test::TestRequest::get().uri("/majors/999").to_request(),
            test::TestRequest::put()
                .uri("/majors/999")
                .set_json(json!({ "name": "Ghost" }))
                .to_request(),
            test::TestRequest::delete().uri("/majors/999").to_request(),
        ];

        for req in requests {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
            let body: Value = test::read_body_json(resp).await;
            assert!(body["data"].is_null());
        }
    }

    #[actix_web::test]
    async fn test_invalid_major_id_is_bad_request() {
        let storage = memory_storage().await;
        let app = init_test_app!(storage, configure_major_routes);

        let req = test::TestRequest::get().uri("/majors/abc").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_update_major_keeps_omitted_fields() {
        let storage = memory_storage().await;
        let id = storage
            .seed_major("Informatics", "informatics", Some("if@ac.id"))
            .await;
        let app = init_test_app!(storage, configure_major_routes);

        let req = test::TestRequest::put()
            .uri(&format!("/majors/{id}"))
            .set_json(json!({ "name": "Computer Science" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["name"], "Computer Science");
        assert_eq!(body["data"]["slug"], "informatics");
        assert_eq!(body["data"]["emails"], json!(["if@ac.id"]));
    }

    #[actix_web::test]
    async fn test_delete_major() {
        let storage = memory_storage().await;
        let id = storage.seed_major("Informatics", "informatics", None).await;
        let app = init_test_app!(storage, configure_major_routes);

        let req = test::TestRequest::delete()
            .uri(&format!("/majors/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["data"].is_null());

        let req = test::TestRequest::get()
            .uri(&format!("/majors/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
