//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod evaluations;
mod majors;
mod reports;
mod users;

#[cfg(test)]
pub(crate) mod testing;

use crate::config::DatabaseConfig;
use crate::errors::{EvalSystemError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 根据数据库配置建立连接并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| EvalSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size.max(1))
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| EvalSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| EvalSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(EvalSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    evaluations::{
        entities::Evaluation,
        requests::{CreateEvaluationRequest, UpdateEvaluationRequest},
        responses::{EvaluationOverview, EvaluationReport, MajorEvaluation},
    },
    majors::{
        entities::Major,
        requests::{CreateMajorRequest, UpdateMajorRequest},
    },
    users::{entities::User, requests::UpdateUserRequest, responses::DeletedUser},
};
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 专业模块
    async fn list_majors(&self) -> Result<Vec<Major>> {
        self.list_majors_impl().await
    }

    async fn get_major_by_id(&self, id: i64) -> Result<Option<Major>> {
        self.get_major_by_id_impl(id).await
    }

    async fn get_major_by_slug(&self, slug: &str) -> Result<Option<Major>> {
        self.get_major_by_slug_impl(slug).await
    }

    async fn create_major(&self, major: CreateMajorRequest) -> Result<Major> {
        self.create_major_impl(major).await
    }

    async fn update_major(&self, id: i64, update: UpdateMajorRequest) -> Result<Option<Major>> {
        self.update_major_impl(id, update).await
    }

    async fn delete_major(&self, id: i64) -> Result<bool> {
        self.delete_major_impl(id).await
    }

    // 用户模块
    async fn list_users(&self) -> Result<Vec<User>> {
        self.list_users_impl().await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn list_users_by_major(&self, major_id: i64) -> Result<Vec<User>> {
        self.list_users_by_major_impl(major_id).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<Option<DeletedUser>> {
        self.delete_user_impl(id).await
    }

    // 评估模块
    async fn list_evaluations(&self) -> Result<Vec<Evaluation>> {
        self.list_evaluations_impl().await
    }

    async fn get_evaluation_by_id(&self, id: i64) -> Result<Option<Evaluation>> {
        self.get_evaluation_by_id_impl(id).await
    }

    async fn create_evaluation(&self, evaluation: CreateEvaluationRequest) -> Result<Evaluation> {
        self.create_evaluation_impl(evaluation).await
    }

    async fn update_evaluation(
        &self,
        id: i64,
        update: UpdateEvaluationRequest,
    ) -> Result<Option<Evaluation>> {
        self.update_evaluation_impl(id, update).await
    }

    async fn delete_evaluation(&self, id: i64) -> Result<bool> {
        self.delete_evaluation_impl(id).await
    }

    async fn evaluation_exists(
        &self,
        setup_id: i64,
        major_ids: &[i64],
        semester: &str,
        end_date: NaiveDate,
    ) -> Result<bool> {
        self.evaluation_exists_impl(setup_id, major_ids, semester, end_date)
            .await
    }

    async fn list_evaluation_overviews(&self) -> Result<Vec<EvaluationOverview>> {
        self.list_evaluation_overviews_impl().await
    }

    async fn list_evaluations_by_major(&self, major_id: i64) -> Result<Vec<MajorEvaluation>> {
        self.list_evaluations_by_major_impl(major_id).await
    }

    async fn get_evaluation_report(&self, id: i64) -> Result<Option<EvaluationReport>> {
        self.get_evaluation_report_impl(id).await
    }

    async fn close(&self) -> Result<()> {
        self.db
            .clone()
            .close()
            .await
            .map_err(|e| EvalSystemError::database_connection(format!("关闭数据库连接失败: {e}")))
    }
}
