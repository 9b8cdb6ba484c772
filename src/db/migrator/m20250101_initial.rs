use crate::entities::prelude::*;
use crate::entities::users;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Seed credentials for the single built-in admin account. Inserted
/// if absent only: removing the row later does not bring it back.
const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "123";
const ADMIN_ROLE: &str = "admin";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        // The first schema version had no image column; it arrives in a
        // follow-up migration, mirroring how deployed databases evolved.
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Products::Brand).string().not_null().default(""))
                    .col(ColumnDef::new(Products::Name).string().not_null().default(""))
                    .col(ColumnDef::new(Products::Origin).string().not_null().default(""))
                    .col(ColumnDef::new(Products::Type).string().not_null().default(""))
                    .col(ColumnDef::new(Products::Tar).string().not_null().default(""))
                    .col(ColumnDef::new(Products::Price).string().not_null().default(""))
                    .col(ColumnDef::new(Products::Stock).integer().not_null().default(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Users)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        let insert = Query::insert()
            .into_table(Users)
            .columns([
                users::Column::Username,
                users::Column::Password,
                users::Column::Role,
            ])
            .values_panic([
                ADMIN_USERNAME.into(),
                ADMIN_PASSWORD.into(),
                ADMIN_ROLE.into(),
            ])
            .on_conflict(
                OnConflict::column(users::Column::Username)
                    .do_nothing()
                    .to_owned(),
            )
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Brand,
    Name,
    Origin,
    Type,
    Tar,
    Price,
    Stock,
}
