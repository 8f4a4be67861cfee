use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202601150002_create_quiz_questions"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("quiz_questions"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("test_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("prompt")).text().not_null())
                    // Any of the three ordering columns may be used; the first populated one wins.
                    .col(ColumnDef::new(Alias::new("sort_order")).integer().null())
                    .col(ColumnDef::new(Alias::new("order_number")).integer().null())
                    .col(ColumnDef::new(Alias::new("display_order")).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("quiz_questions"), Alias::new("test_id"))
                            .to(Alias::new("quiz_tests"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("quiz_questions")).to_owned())
            .await
    }
}
