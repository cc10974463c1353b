pub mod by_major;
pub mod check;
pub mod create;
pub mod delete;
pub mod detail;
pub mod download;
pub mod get;
pub mod list;
pub mod overview;
pub mod report;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::evaluations::requests::{
    CheckEvaluationRequest, CreateEvaluationRequest, EvaluationMajorQuery,
    UpdateEvaluationRequest,
};
use crate::storage::Storage;

pub struct EvaluationService {
    storage: Option<Arc<dyn Storage>>,
}

impl EvaluationService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 获取评估列表
    pub async fn list_evaluations(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_evaluations(self, request).await
    }

    // 根据ID获取评估
    pub async fn get_evaluation(
        &self,
        evaluation_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_evaluation(self, evaluation_id, request).await
    }

    // 创建评估
    pub async fn create_evaluation(
        &self,
        evaluation_data: CreateEvaluationRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_evaluation(self, evaluation_data, request).await
    }

    // 更新评估
    pub async fn update_evaluation(
        &self,
        evaluation_id: i64,
        update_data: UpdateEvaluationRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_evaluation(self, evaluation_id, update_data, request).await
    }

    // 删除评估
    pub async fn delete_evaluation(
        &self,
        evaluation_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_evaluation(self, evaluation_id, request).await
    }

    // 评估查重
    pub async fn check_evaluation(
        &self,
        check_data: CheckEvaluationRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        check::check_evaluation(self, check_data, request).await
    }

    // 评估概览
    pub async fn list_evaluation_overviews(
        &self,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        overview::list_evaluation_overviews(self, request).await
    }

    // 按专业获取评估
    pub async fn list_evaluations_by_major(
        &self,
        query: EvaluationMajorQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        by_major::list_evaluations_by_major(self, query, request).await
    }

    // 评估报告详情
    pub async fn get_evaluation_detail(
        &self,
        evaluation_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        detail::get_evaluation_detail(self, evaluation_id, request).await
    }

    // 下载评估报告 PDF
    pub async fn download_evaluation_report(
        &self,
        evaluation_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        download::download_evaluation_report(self, evaluation_id, request).await
    }
}
