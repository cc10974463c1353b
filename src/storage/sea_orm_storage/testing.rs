//! 测试用的内存数据库与种子数据

use std::sync::Arc;

use sea_orm::{ActiveModelTrait, Set};

use super::SeaOrmStorage;
use crate::config::DatabaseConfig;
use crate::entity::{majors, questions, sections, setups, users};
use crate::storage::Storage;

/// 已迁移的内存 SQLite 存储
pub(crate) async fn memory_storage() -> SeaOrmStorage {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    SeaOrmStorage::connect(&config)
        .await
        .expect("in-memory storage should start")
}

impl SeaOrmStorage {
    pub(crate) fn shared(&self) -> Arc<dyn Storage> {
        Arc::new(self.clone())
    }

    pub(crate) async fn seed_major(&self, name: &str, slug: &str, emails: Option<&str>) -> i64 {
        majors::ActiveModel {
            name: Set(name.to_string()),
            slug: Set(slug.to_string()),
            emails: Set(emails.map(str::to_string)),
            created_at: Set(0),
            updated_at: Set(0),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("seed major")
        .id
    }

    pub(crate) async fn seed_user(
        &self,
        email: &str,
        username: &str,
        major_id: Option<i64>,
        is_admin: bool,
    ) -> i64 {
        users::ActiveModel {
            email: Set(email.to_string()),
            username: Set(username.to_string()),
            major_id: Set(major_id),
            is_admin: Set(is_admin),
            password_hash: Set("$argon2id$seed".to_string()),
            created_at: Set(0),
            updated_at: Set(0),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("seed user")
        .id
    }

    /// 创建模板，返回模板 ID 与按插入顺序排列的题目 ID
    pub(crate) async fn seed_setup(
        &self,
        name: &str,
        layout: &[(i32, &str, &[&str])],
    ) -> (i64, Vec<i64>) {
        let setup_id = setups::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("seed setup")
        .id;

        let mut question_ids = Vec::new();
        for (sequence, section_name, texts) in layout {
            let section_id = sections::ActiveModel {
                setup_id: Set(setup_id),
                sequence: Set(*sequence),
                name: Set(section_name.to_string()),
                ..Default::default()
            }
            .insert(&self.db)
            .await
            .expect("seed section")
            .id;

            for (index, text) in texts.iter().enumerate() {
                let question = questions::ActiveModel {
                    section_id: Set(section_id),
                    position: Set(index as i32 + 1),
                    text: Set(text.to_string()),
                    ..Default::default()
                }
                .insert(&self.db)
                .await
                .expect("seed question");
                question_ids.push(question.id);
            }
        }

        (setup_id, question_ids)
    }
}
