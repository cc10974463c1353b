use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header, web};
use tracing::{debug, error};

use super::EvaluationService;
use super::report::render_evaluation_report;
use crate::config::AppConfig;
use crate::errors::EvalSystemError;
use crate::models::ApiResponse;

pub async fn download_evaluation_report(
    service: &EvaluationService,
    evaluation_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let report = match storage.get_evaluation_report(evaluation_id).await {
        Ok(Some(report)) => report,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty("Data not found")));
        }
        Err(e) => {
            error!("Failed to assemble evaluation report {evaluation_id}: {e}");
            return Ok(HttpResponse::InternalServerError().json(ApiResponse::internal_error(e)));
        }
    };

    let title = AppConfig::get().report.title.clone();

    // 在阻塞线程池中完整渲染后再返回
    let rendered = web::block(move || render_evaluation_report(&report, &title))
        .await
        .map_err(|e| EvalSystemError::report_render(format!("渲染任务中断: {e}")))
        .and_then(|result| result);

    let bytes = match rendered {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Failed to render evaluation report {evaluation_id}: {e}");
            return Ok(HttpResponse::InternalServerError().json(ApiResponse::internal_error(e)));
        }
    };

    debug!(
        "Rendered evaluation report {evaluation_id} ({} bytes)",
        bytes.len()
    );

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "application/pdf"))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"evaluation_{evaluation_id}.pdf\""),
        ))
        .body(bytes))
}
