//! 评估报告组装

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::answers::{Column as AnswerColumn, Entity as Answers};
use crate::entity::evaluations::Entity as Evaluations;
use crate::entity::majors::Entity as Majors;
use crate::entity::questions::{Column as QuestionColumn, Entity as Questions};
use crate::entity::sections::{Column as SectionColumn, Entity as Sections};
use crate::entity::setups::Entity as Setups;
use crate::errors::{EvalSystemError, Result};
use crate::models::evaluations::responses::{EvaluationReport, ReportQuestion, ReportSection};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

impl SeaOrmStorage {
    /// 组装评估报告：头部信息 + 按顺序排列的章节与题目 + 本次评估的答案
    pub async fn get_evaluation_report_impl(&self, id: i64) -> Result<Option<EvaluationReport>> {
        let evaluation = Evaluations::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询评估失败: {e}")))?;

        let Some(evaluation) = evaluation else {
            return Ok(None);
        };

        let major = Majors::find_by_id(evaluation.major_id)
            .one(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询专业失败: {e}")))?;

        let setup = Setups::find_by_id(evaluation.setup_id)
            .one(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询评估模板失败: {e}")))?;

        let sections = Sections::find()
            .filter(SectionColumn::SetupId.eq(evaluation.setup_id))
            .order_by_asc(SectionColumn::Sequence)
            .order_by_asc(SectionColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询模板章节失败: {e}")))?;

        let section_ids: Vec<i64> = sections.iter().map(|s| s.id).collect();

        let questions = if section_ids.is_empty() {
            Vec::new()
        } else {
            Questions::find()
                .filter(QuestionColumn::SectionId.is_in(section_ids))
                .order_by_asc(QuestionColumn::Position)
                .order_by_asc(QuestionColumn::Id)
                .all(&self.db)
                .await
                .map_err(|e| EvalSystemError::database_operation(format!("查询题目失败: {e}")))?
        };

        let mut answers: HashMap<i64, (Option<String>, Option<f64>)> = Answers::find()
            .filter(AnswerColumn::EvaluationId.eq(id))
            .all(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询评估答案失败: {e}")))?
            .into_iter()
            .map(|a| (a.question_id, (a.answer, a.score)))
            .collect();

        // 题目已按 position 排序，按章节分组后顺序保持不变
        let mut grouped: HashMap<i64, Vec<ReportQuestion>> = HashMap::new();
        for question in questions {
            let (answer, score) = answers.remove(&question.id).unwrap_or((None, None));
            grouped
                .entry(question.section_id)
                .or_default()
                .push(ReportQuestion {
                    question_id: question.id,
                    position: question.position,
                    text: question.text,
                    answer,
                    score,
                });
        }

        let sections = sections
            .into_iter()
            .map(|section| ReportSection {
                questions: grouped.remove(&section.id).unwrap_or_default(),
                sequence: section.sequence,
                name: section.name,
            })
            .collect();

        Ok(Some(EvaluationReport {
            id: evaluation.id,
            semester: evaluation.semester,
            end_date: evaluation.end_date,
            major_id: evaluation.major_id,
            major_name: major.map(|m| m.name),
            setup_id: evaluation.setup_id,
            setup_name: setup.map(|s| s.name),
            sections,
        }))
    }
}
