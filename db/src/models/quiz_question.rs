use scoring::keys::QuestionPosition;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};

/// Quiz question model representing the `quiz_questions` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quiz_questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub test_id: i64,
    pub prompt: String,
    pub sort_order: Option<i32>,
    pub order_number: Option<i32>,
    pub display_order: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quiz_test::Entity",
        from = "Column::TestId",
        to = "super::quiz_test::Column::Id"
    )]
    Test,
    #[sea_orm(has_many = "super::quiz_option::Entity")]
    Options,
}

impl Related<super::quiz_test::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Test.def()
    }
}

impl Related<super::quiz_option::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Options.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Create a question ordered by `sort_order`.
    pub async fn create(
        db: &DatabaseConnection,
        test_id: i64,
        prompt: &str,
        sort_order: Option<i32>,
    ) -> Result<Self, DbErr> {
        let active = ActiveModel {
            test_id: Set(test_id),
            prompt: Set(prompt.to_string()),
            sort_order: Set(sort_order),
            ..Default::default()
        };
        active.insert(db).await
    }

    /// All questions of a test, in storage order.
    pub async fn get_by_test_id(
        db: &DatabaseConnection,
        test_id: i64,
    ) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::TestId.eq(test_id))
            .all(db)
            .await
    }

    pub fn position(&self) -> QuestionPosition {
        QuestionPosition {
            id: self.id,
            sort_order: self.sort_order.map(i64::from),
            order_number: self.order_number.map(i64::from),
            display_order: self.display_order.map(i64::from),
        }
    }
}
