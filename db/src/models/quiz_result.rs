use scoring::types::ResultRecord;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};

/// Quiz result (outcome) model representing the `quiz_results` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quiz_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub test_id: i64,
    pub code: String,
    pub title: String,
    pub description: String,
    pub min_score: i64,
    pub max_score: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quiz_test::Entity",
        from = "Column::TestId",
        to = "super::quiz_test::Column::Id"
    )]
    Test,
}

impl Related<super::quiz_test::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Test.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        test_id: i64,
        code: &str,
        title: &str,
        min_score: i64,
        max_score: i64,
    ) -> Result<Self, DbErr> {
        let active = ActiveModel {
            test_id: Set(test_id),
            code: Set(code.to_string()),
            title: Set(title.to_string()),
            description: Set(String::new()),
            min_score: Set(min_score),
            max_score: Set(max_score),
            ..Default::default()
        };
        active.insert(db).await
    }

    pub async fn get_by_test_id(
        db: &DatabaseConnection,
        test_id: i64,
    ) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::TestId.eq(test_id))
            .all(db)
            .await
    }

    pub fn to_record(&self) -> ResultRecord {
        ResultRecord {
            id: self.id,
            test_id: self.test_id,
            code: self.code.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            min_score: self.min_score,
            max_score: self.max_score,
        }
    }
}
