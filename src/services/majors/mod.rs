pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::majors::requests::{CreateMajorRequest, UpdateMajorRequest};
use crate::storage::Storage;

pub struct MajorService {
    storage: Option<Arc<dyn Storage>>,
}

impl MajorService {
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

    // 获取专业列表
    pub async fn list_majors(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_majors(self, request).await
    }

    // 根据ID获取专业
    pub async fn get_major(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_major(self, id, request).await
    }

    // 根据 slug 获取专业
    pub async fn get_major_by_slug(
        &self,
        slug: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_major_by_slug(self, slug, request).await
    }

    // 创建专业
    pub async fn create_major(
        &self,
        major_data: CreateMajorRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_major(self, major_data, request).await
    }

    // 更新专业
    pub async fn update_major(
        &self,
        id: i64,
        update_data: UpdateMajorRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_major(self, id, update_data, request).await
    }

    // 删除专业
    pub async fn delete_major(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_major(self, id, request).await
    }
}
