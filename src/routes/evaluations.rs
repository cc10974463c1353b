use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::evaluations::requests::{
    CheckEvaluationRequest, CreateEvaluationRequest, EvaluationMajorQuery,
    UpdateEvaluationRequest,
};
use crate::services::EvaluationService;
use crate::utils::SafeIDI64;

// 懒加载的全局 EvaluationService 实例
static EVALUATION_SERVICE: Lazy<EvaluationService> = Lazy::new(EvaluationService::new_lazy);

// HTTP处理程序
pub async fn list_evaluations(req: HttpRequest) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.list_evaluations(&req).await
}

pub async fn get_evaluation(
    req: HttpRequest,
    evaluation_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .get_evaluation(evaluation_id.0, &req)
        .await
}

pub async fn create_evaluation(
    req: HttpRequest,
    evaluation_data: web::Json<CreateEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .create_evaluation(evaluation_data.into_inner(), &req)
        .await
}

pub async fn update_evaluation(
    req: HttpRequest,
    evaluation_id: SafeIDI64,
    update_data: web::Json<UpdateEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .update_evaluation(evaluation_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_evaluation(
    req: HttpRequest,
    evaluation_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .delete_evaluation(evaluation_id.0, &req)
        .await
}

pub async fn check_evaluation(
    req: HttpRequest,
    check_data: web::Json<CheckEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .check_evaluation(check_data.into_inner(), &req)
        .await
}

pub async fn list_evaluation_overviews(req: HttpRequest) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.list_evaluation_overviews(&req).await
}

pub async fn list_evaluations_by_major(
    req: HttpRequest,
    query: web::Query<EvaluationMajorQuery>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .list_evaluations_by_major(query.into_inner(), &req)
        .await
}

pub async fn get_evaluation_detail(
    req: HttpRequest,
    evaluation_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .get_evaluation_detail(evaluation_id.0, &req)
        .await
}

pub async fn download_evaluation_report(
    req: HttpRequest,
    evaluation_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .download_evaluation_report(evaluation_id.0, &req)
        .await
}

// 配置路由
pub fn configure_evaluation_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/evaluations")
            .route("", web::get().to(list_evaluations))
            .route("", web::post().to(create_evaluation))
            .route("/data", web::get().to(list_evaluation_overviews))
            .route("/major", web::get().to(list_evaluations_by_major))
            .route("/check", web::post().to(check_evaluation))
            .route("/check/{id}", web::get().to(get_evaluation_detail))
            .route("/download/{id}", web::get().to(download_evaluation_report))
            .route("/id/{id}", web::get().to(get_evaluation))
            .route("/{id}", web::put().to(update_evaluation))
            .route("/{id}", web::delete().to(delete_evaluation)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::answers::{Column as AnswerColumn, Entity as Answers};
    use crate::models::evaluations::entities::AnswerInput;
    use crate::storage::sea_orm_storage::{SeaOrmStorage, testing::memory_storage};
    use crate::storage::Storage;
    use actix_web::{http::StatusCode, http::header, test};
    use chrono::NaiveDate;
    use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
    use serde_json::{Value, json};

    struct Fixture {
        storage: SeaOrmStorage,
        major_id: i64,
        setup_id: i64,
        question_ids: Vec<i64>,
    }

    async fn fixture() -> Fixture {
        let storage = memory_storage().await;
        let major_id = storage
            .seed_major("Informatics", "informatics", Some("kaprodi@if.ac.id, tu@if.ac.id"))
            .await;
        // 章节故意逆序插入
        let layout: [(i32, &str, &[&str]); 2] = [
            (2, "Facilities", &["Is the lab equipment sufficient?"]),
            (
                1,
                "Learning Outcomes",
                &["Are outcomes measurable?", "Are outcomes published?"],
            ),
        ];
        let (setup_id, question_ids) = storage.seed_setup("Curriculum Review", &layout).await;
        Fixture {
            storage,
            major_id,
            setup_id,
            question_ids,
        }
    }

    async fn seed_evaluation(
        fixture: &Fixture,
        semester: &str,
        end_date: &str,
        answers: Option<Vec<AnswerInput>>,
    ) -> i64 {
        fixture
            .storage
            .shared()
            .create_evaluation(CreateEvaluationRequest {
                semester: semester.to_string(),
                end_date: NaiveDate::parse_from_str(end_date, "%Y-%m-%d").unwrap(),
                major_id: fixture.major_id,
                setup_id: fixture.setup_id,
                answers,
            })
            .await
            .unwrap()
            .id
    }

    async fn answer_count(storage: &SeaOrmStorage, evaluation_id: i64) -> u64 {
        Answers::find()
            .filter(AnswerColumn::EvaluationId.eq(evaluation_id))
            .count(&storage.db)
            .await
            .unwrap()
    }

    #[actix_web::test]
    async fn test_create_evaluation_returns_submitted_fields() {
        let fx = fixture().await;
        let app = init_test_app!(fx.storage, configure_evaluation_routes);

        let req = test::TestRequest::post()
            .uri("/evaluations")
            .set_json(json!({
                "semester": "2024/2025 Ganjil",
                "end_date": "2025-01-31",
                "major_id": fx.major_id,
                "setup_id": fx.setup_id,
                "answers": [
                    { "question_id": fx.question_ids[0], "answer": "Yes", "score": 4.0 }
                ]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["semester"], "2024/2025 Ganjil");
        assert_eq!(body["data"]["end_date"], "2025-01-31");
        assert_eq!(body["data"]["major_id"], fx.major_id);
        assert_eq!(body["data"]["setup_id"], fx.setup_id);
    }

    #[actix_web::test]
    async fn test_create_evaluation_rejects_blank_semester() {
        let fx = fixture().await;
        let app = init_test_app!(fx.storage, configure_evaluation_routes);

        let req = test::TestRequest::post()
            .uri("/evaluations")
            .set_json(json!({
                "semester": "   ",
                "end_date": "2025-01-31",
                "major_id": fx.major_id,
                "setup_id": fx.setup_id
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_create_evaluation_storage_failure_is_internal_error() {
        let fx = fixture().await;
        let app = init_test_app!(fx.storage, configure_evaluation_routes);

        // 不存在的专业触发外键约束失败
        let req = test::TestRequest::post()
            .uri("/evaluations")
            .set_json(json!({
                "semester": "2024/2025 Ganjil",
                "end_date": "2025-01-31",
                "major_id": 99999,
                "setup_id": fx.setup_id
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["response"]["status"], "error");
        assert_eq!(body["response"]["message"], "Internal server error");
        let details = body["response"]["details"].as_str().unwrap();
        assert!(!details.is_empty());
        assert!(body["data"].is_null());
    }

    #[actix_web::test]
    async fn test_create_evaluation_accepts_timestamp_end_date() {
        let fx = fixture().await;
        let app = init_test_app!(fx.storage, configure_evaluation_routes);

        let req = test::TestRequest::post()
            .uri("/evaluations")
            .set_json(json!({
                "semester": "2024/2025 Ganjil",
                "end_date": "2025-01-31T00:00:00.000Z",
                "major_id": fx.major_id,
                "setup_id": fx.setup_id
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["end_date"], "2025-01-31");
    }

    #[actix_web::test]
    async fn test_get_and_list_evaluations() {
        let fx = fixture().await;
        let id = seed_evaluation(&fx, "2024/2025 Ganjil", "2025-01-31", None).await;
        let app = init_test_app!(fx.storage, configure_evaluation_routes);

        let req = test::TestRequest::get()
            .uri(&format!("/evaluations/id/{id}"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["id"], id);

        let req = test::TestRequest::get().uri("/evaluations").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_missing_evaluation_is_not_found() {
        let fx = fixture().await;
        let app = init_test_app!(fx.storage, configure_evaluation_routes);

        let requests = [
            test::TestRequest::get().uri("/evaluations/id/404").to_request(),
            test::TestRequest::put()
                .uri("/evaluations/404")
                .set_json(json!({ "semester": "2025/2026 Genap" }))
                .to_request(),
            test::TestRequest::delete().uri("/evaluations/404").to_request(),
            test::TestRequest::get().uri("/evaluations/check/404").to_request(),
        ];

        for req in requests {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
            let body: Value = test::read_body_json(resp).await;
            assert!(body["data"].is_null());
        }
    }

    #[actix_web::test]
    async fn test_update_evaluation_keeps_omitted_fields() {
        let fx = fixture().await;
        let id = seed_evaluation(&fx, "2024/2025 Ganjil", "2025-01-31", None).await;
        let app = init_test_app!(fx.storage, configure_evaluation_routes);

        let req = test::TestRequest::put()
            .uri(&format!("/evaluations/{id}"))
            .set_json(json!({ "end_date": "2025-02-28" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["end_date"], "2025-02-28");
        assert_eq!(body["data"]["semester"], "2024/2025 Ganjil");
        assert_eq!(body["data"]["major_id"], fx.major_id);
    }

    #[actix_web::test]
    async fn test_update_evaluation_replaces_answers() {
        let fx = fixture().await;
        let id = seed_evaluation(
            &fx,
            "2024/2025 Ganjil",
            "2025-01-31",
            Some(vec![AnswerInput {
                question_id: fx.question_ids[0],
                answer: Some("Old".to_string()),
                score: Some(1.0),
            }]),
        )
        .await;
        let app = init_test_app!(fx.storage, configure_evaluation_routes);

        let req = test::TestRequest::put()
            .uri(&format!("/evaluations/{id}"))
            .set_json(json!({
                "answers": [
                    { "question_id": fx.question_ids[1], "answer": "New", "score": 3.0 }
                ]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let report = fx
            .storage
            .shared()
            .get_evaluation_report(id)
            .await
            .unwrap()
            .unwrap();
        let answered: Vec<_> = report
            .sections
            .iter()
            .flat_map(|s| s.questions.iter())
            .filter(|q| q.answer.is_some())
            .collect();
        assert_eq!(answered.len(), 1);
        assert_eq!(answered[0].question_id, fx.question_ids[1]);
        assert_eq!(answered[0].answer.as_deref(), Some("New"));
    }

    #[actix_web::test]
    async fn test_update_evaluation_setup_change_clears_answers() {
        let fx = fixture().await;
        let answers = Some(vec![AnswerInput {
            question_id: fx.question_ids[0],
            answer: Some("Yes".to_string()),
            score: Some(4.0),
        }]);
        let id = seed_evaluation(&fx, "2024/2025 Ganjil", "2025-01-31", answers).await;
        let layout: [(i32, &str, &[&str]); 1] = [(1, "General", &["Is the syllabus current?"])];
        let (other_setup_id, _) = fx.storage.seed_setup("Accreditation", &layout).await;
        let app = init_test_app!(fx.storage, configure_evaluation_routes);

        // 模板未变时保留答案
        let req = test::TestRequest::put()
            .uri(&format!("/evaluations/{id}"))
            .set_json(json!({ "setup_id": fx.setup_id, "semester": "2024/2025 Genap" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(answer_count(&fx.storage, id).await, 1);

        let req = test::TestRequest::put()
            .uri(&format!("/evaluations/{id}"))
            .set_json(json!({ "setup_id": other_setup_id }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["setup_id"], other_setup_id);
        assert_eq!(answer_count(&fx.storage, id).await, 0);
    }

    #[actix_web::test]
    async fn test_delete_evaluation() {
        let fx = fixture().await;
        let id = seed_evaluation(&fx, "2024/2025 Ganjil", "2025-01-31", None).await;
        let app = init_test_app!(fx.storage, configure_evaluation_routes);

        let req = test::TestRequest::delete()
            .uri(&format!("/evaluations/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["data"].is_null());
    }

    #[actix_web::test]
    async fn test_check_rejects_bad_major_ids() {
        let fx = fixture().await;
        let app = init_test_app!(fx.storage, configure_evaluation_routes);

        for major_ids in [json!([]), json!(3), json!("1,2"), json!(["a"])] {
            let req = test::TestRequest::post()
                .uri("/evaluations/check")
                .set_json(json!({
                    "setupId": fx.setup_id,
                    "majorIds": major_ids,
                    "semester": "2024/2025 Ganjil",
                    "endDate": "2025-01-31"
                }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(
                body["response"]["message"],
                "majorIds must be a non-empty array."
            );
        }
    }

    #[actix_web::test]
    async fn test_check_detects_duplicates() {
        let fx = fixture().await;
        seed_evaluation(&fx, "2024/2025 Ganjil", "2025-01-31", None).await;
        let app = init_test_app!(fx.storage, configure_evaluation_routes);

        let check = |semester: &str, major_ids: Value| {
            test::TestRequest::post()
                .uri("/evaluations/check")
                .set_json(json!({
                    "setupId": fx.setup_id,
                    "majorIds": major_ids,
                    "semester": semester,
                    "endDate": "2025-01-31"
                }))
                .to_request()
        };

        let req = check("2024/2025 Ganjil", json!([999, fx.major_id]));
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["response"]["message"],
            "An evaluation with the exact same content already exists."
        );

        let req = check("2024/2025 Genap", json!([fx.major_id]));
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"], false);

        let req = check("2024/2025 Ganjil", json!([999]));
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_check_normalizes_semester_and_end_date() {
        let fx = fixture().await;
        seed_evaluation(&fx, "2024/2025 Ganjil", "2025-01-31", None).await;
        let app = init_test_app!(fx.storage, configure_evaluation_routes);

        let check = |semester: &str| {
            test::TestRequest::post()
                .uri("/evaluations/check")
                .set_json(json!({
                    "setupId": fx.setup_id,
                    "majorIds": [fx.major_id],
                    "semester": semester,
                    "endDate": "2025-01-31T00:00:00.000Z"
                }))
                .to_request()
        };

        let resp = test::call_service(&app, check("2024/2025 Ganjil ")).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = test::call_service(&app, check("  2024/2025 Ganjil")).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = test::call_service(&app, check("   ")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["response"]["message"], "semester must not be empty");
    }

    #[actix_web::test]
    async fn test_overview_includes_names() {
        let fx = fixture().await;
        seed_evaluation(&fx, "2024/2025 Ganjil", "2025-01-31", None).await;
        let app = init_test_app!(fx.storage, configure_evaluation_routes);

        let req = test::TestRequest::get().uri("/evaluations/data").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"][0]["setup_name"], "Curriculum Review");
        assert_eq!(body["data"][0]["major_name"], "Informatics");
    }

    #[actix_web::test]
    async fn test_evaluations_by_major() {
        let fx = fixture().await;
        let id = seed_evaluation(&fx, "2024/2025 Ganjil", "2025-01-31", None).await;
        let app = init_test_app!(fx.storage, configure_evaluation_routes);

        let req = test::TestRequest::get()
            .uri(&format!("/evaluations/major?major_id={}", fx.major_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        let row = &body["data"][0];
        assert_eq!(row["evaluation_id"], id);
        assert_eq!(row["setup_name"], "Curriculum Review");
        assert_eq!(row["major_name"], "Informatics");
        assert_eq!(row["emails"], json!(["kaprodi@if.ac.id", "tu@if.ac.id"]));

        let req = test::TestRequest::get().uri("/evaluations/major").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri("/evaluations/major?major_id=999")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri("/evaluations/major?major_id=abc")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_detail_orders_sections_and_questions() {
        let fx = fixture().await;
        let id = seed_evaluation(
            &fx,
            "2024/2025 Ganjil",
            "2025-01-31",
            Some(vec![AnswerInput {
                question_id: fx.question_ids[2],
                answer: Some("Published on the website".to_string()),
                score: Some(4.5),
            }]),
        )
        .await;
        let app = init_test_app!(fx.storage, configure_evaluation_routes);

        let req = test::TestRequest::get()
            .uri(&format!("/evaluations/check/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        let sections = body["data"]["sections"].as_array().unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0]["name"], "Learning Outcomes");
        assert_eq!(sections[1]["name"], "Facilities");

        let questions = sections[0]["questions"].as_array().unwrap();
        assert_eq!(questions[0]["text"], "Are outcomes measurable?");
        assert!(questions[0]["answer"].is_null());
        assert_eq!(questions[1]["answer"], "Published on the website");
        assert_eq!(questions[1]["score"], 4.5);
    }

    #[actix_web::test]
    async fn test_download_returns_pdf() {
        let fx = fixture().await;
        let id = seed_evaluation(&fx, "2024/2025 Ganjil", "2025-01-31", None).await;
        let app = init_test_app!(fx.storage, configure_evaluation_routes);

        let req = test::TestRequest::get()
            .uri(&format!("/evaluations/download/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/pdf"
        );
        let disposition = resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains(&format!("evaluation_{id}.pdf")));

        let body = test::read_body(resp).await;
        assert!(body.starts_with(b"%PDF"));
    }

    #[actix_web::test]
    async fn test_download_missing_evaluation_is_json_not_found() {
        let fx = fixture().await;
        let app = init_test_app!(fx.storage, configure_evaluation_routes);

        let req = test::TestRequest::get()
            .uri("/evaluations/download/404")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["response"]["status"], "error");
    }
}
