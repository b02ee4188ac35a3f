use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create user table
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string_len(User::Email, 120).unique_key())
                    .col(string_len(User::Password, 80))
                    .col(boolean(User::IsActive))
                    .to_owned(),
            )
            .await?;

        // Create planet table
        manager
            .create_table(
                Table::create()
                    .table(Planet::Table)
                    .if_not_exists()
                    .col(pk_auto(Planet::Id))
                    .col(string_len(Planet::Name, 120).unique_key())
                    .col(string_len_null(Planet::Description, 240))
                    .col(big_integer_null(Planet::Population))
                    .to_owned(),
            )
            .await?;

        // Create character table
        manager
            .create_table(
                Table::create()
                    .table(Character::Table)
                    .if_not_exists()
                    .col(pk_auto(Character::Id))
                    .col(string_len(Character::Name, 120))
                    .col(string_len_null(Character::Gender, 120))
                    .col(string_len_null(Character::Description, 240))
                    .to_owned(),
            )
            .await?;

        // Create favorite table; exactly one of planet_id/character_id is set
        manager
            .create_table(
                Table::create()
                    .table(Favorite::Table)
                    .if_not_exists()
                    .col(pk_auto(Favorite::Id))
                    .col(integer(Favorite::UserId))
                    .col(integer_null(Favorite::PlanetId))
                    .col(integer_null(Favorite::CharacterId))
                    .check(Expr::cust(
                        "(\"planet_id\" IS NULL) <> (\"character_id\" IS NULL)",
                    ))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorite_user")
                            .from(Favorite::Table, Favorite::UserId)
                            .to(User::Table, User::Id)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorite_planet")
                            .from(Favorite::Table, Favorite::PlanetId)
                            .to(Planet::Table, Planet::Id)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorite_character")
                            .from(Favorite::Table, Favorite::CharacterId)
                            .to(Character::Table, Character::Id)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop favorites first, they reference the other three tables
        manager
            .drop_table(Table::drop().table(Favorite::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Character::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Planet::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    Email,
    Password,
    IsActive,
}

#[derive(DeriveIden)]
enum Planet {
    Table,
    Id,
    Name,
    Description,
    Population,
}

#[derive(DeriveIden)]
enum Character {
    Table,
    Id,
    Name,
    Gender,
    Description,
}

#[derive(DeriveIden)]
enum Favorite {
    Table,
    Id,
    UserId,
    PlanetId,
    CharacterId,
}
