use scoring::types::OptionRow;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};

/// Quiz option model representing the `quiz_options` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quiz_options")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub question_id: i64,
    pub option_key: String,
    pub label: String,
    pub score_value: i64,
    pub map_result_code: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quiz_question::Entity",
        from = "Column::QuestionId",
        to = "super::quiz_question::Column::Id"
    )]
    Question,
}

impl Related<super::quiz_question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        question_id: i64,
        option_key: &str,
        score_value: i64,
        map_result_code: Option<&str>,
    ) -> Result<Self, DbErr> {
        let active = ActiveModel {
            question_id: Set(question_id),
            option_key: Set(option_key.to_string()),
            label: Set(option_key.to_string()),
            score_value: Set(score_value),
            map_result_code: Set(map_result_code.map(str::to_string)),
            ..Default::default()
        };
        active.insert(db).await
    }

    /// All options of the given questions.
    pub async fn get_by_question_ids(
        db: &DatabaseConnection,
        question_ids: &[i64],
    ) -> Result<Vec<Self>, DbErr> {
        if question_ids.is_empty() {
            return Ok(Vec::new());
        }
        Entity::find()
            .filter(Column::QuestionId.is_in(question_ids.iter().copied()))
            .all(db)
            .await
    }

    pub fn to_row(&self) -> OptionRow {
        OptionRow {
            id: self.id,
            question_id: self.question_id,
            option_key: self.option_key.clone(),
            score_value: self.score_value,
            map_result_code: self.map_result_code.clone(),
        }
    }
}
