use sea_orm_migration::prelude::*;

use crate::m20240601_083015_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Post::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Post::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Post::Title).string().not_null())
                    .col(ColumnDef::new(Post::Slug).string().not_null())
                    .col(ColumnDef::new(Post::Excerpt).text().not_null())
                    .col(ColumnDef::new(Post::Content).text().not_null())
                    .col(ColumnDef::new(Post::CoverImage).string())
                    .col(ColumnDef::new(Post::AuthorId).integer().not_null())
                    .col(
                        ColumnDef::new(Post::Tags)
                            .json_binary()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Post::PublishedAt).date_time().not_null())
                    .col(ColumnDef::new(Post::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKeyCreateStatement::new()
                            .name("fk_author_id")
                            .from(Post::Table, Post::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Post::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Post {
    Table,
    Id,
    Title,
    Slug,
    Excerpt,
    Content,
    CoverImage,
    AuthorId,
    Tags,
    PublishedAt,
    UpdatedAt,
}
