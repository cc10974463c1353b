//! 评估存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::answers::{
    ActiveModel as AnswerActiveModel, Column as AnswerColumn, Entity as Answers,
};
use crate::entity::evaluations::{ActiveModel, Column, Entity as Evaluations};
use crate::entity::majors::{Column as MajorColumn, Entity as Majors};
use crate::entity::setups::Entity as Setups;
use crate::errors::{EvalSystemError, Result};
use crate::models::{
    evaluations::{
        entities::{AnswerInput, Evaluation},
        requests::{CreateEvaluationRequest, UpdateEvaluationRequest},
        responses::{EvaluationOverview, MajorEvaluation},
    },
    majors::entities::split_emails,
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// 用新的答案集合替换评估的全部答案
async fn replace_answers<C: ConnectionTrait>(
    conn: &C,
    evaluation_id: i64,
    answers: Vec<AnswerInput>,
) -> Result<()> {
    Answers::delete_many()
        .filter(AnswerColumn::EvaluationId.eq(evaluation_id))
        .exec(conn)
        .await
        .map_err(|e| EvalSystemError::database_operation(format!("清除评估答案失败: {e}")))?;

    if answers.is_empty() {
        return Ok(());
    }

    let models: Vec<AnswerActiveModel> = answers
        .into_iter()
        .map(|answer| AnswerActiveModel {
            evaluation_id: Set(evaluation_id),
            question_id: Set(answer.question_id),
            answer: Set(answer.answer),
            score: Set(answer.score),
            ..Default::default()
        })
        .collect();

    Answers::insert_many(models)
        .exec(conn)
        .await
        .map_err(|e| EvalSystemError::database_operation(format!("写入评估答案失败: {e}")))?;

    Ok(())
}

impl SeaOrmStorage {
    /// 列出全部评估
    pub async fn list_evaluations_impl(&self) -> Result<Vec<Evaluation>> {
        let evaluations = Evaluations::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询评估列表失败: {e}")))?;

        Ok(evaluations
            .into_iter()
            .map(|m| m.into_evaluation())
            .collect())
    }

    /// 通过 ID 获取评估
    pub async fn get_evaluation_by_id_impl(&self, id: i64) -> Result<Option<Evaluation>> {
        let result = Evaluations::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询评估失败: {e}")))?;

        Ok(result.map(|m| m.into_evaluation()))
    }

    /// 创建评估（可同时写入答案）
    pub async fn create_evaluation_impl(&self, req: CreateEvaluationRequest) -> Result<Evaluation> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            semester: Set(req.semester),
            end_date: Set(req.end_date),
            major_id: Set(req.major_id),
            setup_id: Set(req.setup_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("创建评估失败: {e}")))?;

        if let Some(answers) = req.answers {
            replace_answers(&txn, result.id, answers).await?;
        }

        txn.commit()
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.into_evaluation())
    }

    /// 更新评估，未提供的字段保持原值
    pub async fn update_evaluation_impl(
        &self,
        id: i64,
        update: UpdateEvaluationRequest,
    ) -> Result<Option<Evaluation>> {
        // 先检查评估是否存在
        let Some(existing) = self.get_evaluation_by_id_impl(id).await? else {
            return Ok(None);
        };
        let setup_changed = update
            .setup_id
            .is_some_and(|setup_id| setup_id != existing.setup_id);

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(semester) = update.semester {
            model.semester = Set(semester);
        }

        if let Some(end_date) = update.end_date {
            model.end_date = Set(end_date);
        }

        if let Some(major_id) = update.major_id {
            model.major_id = Set(major_id);
        }

        if let Some(setup_id) = update.setup_id {
            model.setup_id = Set(setup_id);
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("开启事务失败: {e}")))?;

        model
            .update(&txn)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("更新评估失败: {e}")))?;

        // 旧答案对应旧模板的题目，换模板且未提交新答案时一并清除
        match update.answers {
            Some(answers) => replace_answers(&txn, id, answers).await?,
            None if setup_changed => replace_answers(&txn, id, Vec::new()).await?,
            None => {}
        }

        txn.commit()
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_evaluation_by_id_impl(id).await
    }

    /// 删除评估（答案随外键级联删除）
    pub async fn delete_evaluation_impl(&self, id: i64) -> Result<bool> {
        let result = Evaluations::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("删除评估失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 查重：任一专业已存在同模板、同学期、同截止日期的评估
    pub async fn evaluation_exists_impl(
        &self,
        setup_id: i64,
        major_ids: &[i64],
        semester: &str,
        end_date: NaiveDate,
    ) -> Result<bool> {
        if major_ids.is_empty() {
            return Ok(false);
        }

        let count = Evaluations::find()
            .filter(Column::SetupId.eq(setup_id))
            .filter(Column::MajorId.is_in(major_ids.iter().copied()))
            .filter(Column::Semester.eq(semester))
            .filter(Column::EndDate.eq(end_date))
            .count(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("评估查重失败: {e}")))?;

        Ok(count > 0)
    }

    /// 列出评估概览（附带模板与专业名称）
    pub async fn list_evaluation_overviews_impl(&self) -> Result<Vec<EvaluationOverview>> {
        let rows = Evaluations::find()
            .find_also_related(Setups)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询评估概览失败: {e}")))?;

        let mut major_ids: Vec<i64> = rows.iter().map(|(e, _)| e.major_id).collect();
        major_ids.sort_unstable();
        major_ids.dedup();

        let major_names: HashMap<i64, String> = if major_ids.is_empty() {
            HashMap::new()
        } else {
            Majors::find()
                .filter(MajorColumn::Id.is_in(major_ids))
                .all(&self.db)
                .await
                .map_err(|e| EvalSystemError::database_operation(format!("查询专业失败: {e}")))?
                .into_iter()
                .map(|m| (m.id, m.name))
                .collect()
        };

        Ok(rows
            .into_iter()
            .map(|(evaluation, setup)| EvaluationOverview {
                id: evaluation.id,
                major_name: major_names.get(&evaluation.major_id).cloned(),
                major_id: evaluation.major_id,
                setup_id: evaluation.setup_id,
                setup_name: setup.map(|s| s.name),
                semester: evaluation.semester,
                end_date: evaluation.end_date,
            })
            .collect())
    }

    /// 列出某专业的评估，附带专业通知邮箱
    pub async fn list_evaluations_by_major_impl(
        &self,
        major_id: i64,
    ) -> Result<Vec<MajorEvaluation>> {
        let major = Majors::find_by_id(major_id)
            .one(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询专业失败: {e}")))?;

        let Some(major) = major else {
            return Ok(Vec::new());
        };

        let rows = Evaluations::find()
            .filter(Column::MajorId.eq(major_id))
            .find_also_related(Setups)
            .order_by_asc(Column::EndDate)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询专业评估失败: {e}")))?;

        let emails = split_emails(major.emails.as_deref());

        Ok(rows
            .into_iter()
            .map(|(evaluation, setup)| MajorEvaluation {
                evaluation_id: evaluation.id,
                setup_name: setup.map(|s| s.name),
                major_id: major.id,
                major_name: major.name.clone(),
                emails: emails.clone(),
                semester: evaluation.semester,
                end_date: evaluation.end_date,
            })
            .collect())
    }
}
