//! 预导入模块，方便使用

pub use super::answers::{ActiveModel as AnswerActiveModel, Entity as Answers, Model as AnswerModel};
pub use super::evaluations::{
    ActiveModel as EvaluationActiveModel, Entity as Evaluations, Model as EvaluationModel,
};
pub use super::majors::{ActiveModel as MajorActiveModel, Entity as Majors, Model as MajorModel};
pub use super::questions::{
    ActiveModel as QuestionActiveModel, Entity as Questions, Model as QuestionModel,
};
pub use super::sections::{
    ActiveModel as SectionActiveModel, Entity as Sections, Model as SectionModel,
};
pub use super::setups::{ActiveModel as SetupActiveModel, Entity as Setups, Model as SetupModel};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
