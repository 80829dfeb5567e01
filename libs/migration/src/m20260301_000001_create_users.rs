use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Column-level UNIQUE gets the default names users_email_key and
        // users_phone_key, which the users repository maps to field errors.
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        timestamp_with_time_zone(Users::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Users::FirstName).text().null())
                    .col(ColumnDef::new(Users::LastName).text().null())
                    .col(ColumnDef::new(Users::Email).text().null().unique_key())
                    .col(ColumnDef::new(Users::Phone).text().null().unique_key())
                    .col(text(Users::PasswordHash))
                    .col(integer(Users::Version).default(1))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    Id,
    CreatedAt,
    FirstName,
    LastName,
    Email,
    Phone,
    PasswordHash,
    Version,
}
