//! Root of the SeaORM entity modules.
//! Users, planets and characters are independent root entities; favorites
//! link a user to exactly one planet or character.

pub mod character;
pub mod favorite;
pub mod planet;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::character::Entity as Character;
    pub use super::favorite::Entity as Favorite;
    pub use super::planet::Entity as Planet;
    pub use super::user::Entity as User;
}

#[cfg(test)]
mod test {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr,
        EntityTrait, QueryFilter, Set,
    };

    use super::*;
    use prelude::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        let db = Database::connect("sqlite::memory:").await?;

        // Enable foreign keys
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    #[tokio::test]
    async fn test_entity_integration() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let luke = user::ActiveModel {
            email: Set("luke@rebellion.org".to_string()),
            password: Set("x-wing".to_string()),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let tatooine = planet::ActiveModel {
            name: Set("Tatooine".to_string()),
            description: Set(Some("Desert world with two suns".to_string())),
            population: Set(Some(200_000)),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let leia = character::ActiveModel {
            name: Set("Leia Organa".to_string()),
            gender: Set(Some("female".to_string())),
            description: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let planet_favorite =
            favorite::ActiveModel::for_target(luke.id, favorite::FavoriteTarget::Planet(tatooine.id))
                .insert(&db)
                .await?;
        let character_favorite = favorite::ActiveModel::for_target(
            luke.id,
            favorite::FavoriteTarget::Character(leia.id),
        )
        .insert(&db)
        .await?;

        assert_eq!(
            planet_favorite.target(),
            Some(favorite::FavoriteTarget::Planet(tatooine.id))
        );
        assert_eq!(
            character_favorite.target(),
            Some(favorite::FavoriteTarget::Character(leia.id))
        );

        // Read back through relations
        let luke_favorites = Favorite::find()
            .filter(favorite::Column::UserId.eq(luke.id))
            .all(&db)
            .await?;
        assert_eq!(luke_favorites.len(), 2);

        let (_, related_planet) = Favorite::find_by_id(planet_favorite.id)
            .find_also_related(Planet)
            .one(&db)
            .await?
            .expect("favorite exists");
        assert_eq!(related_planet, Some(tatooine));

        assert_eq!(User::find().all(&db).await?.len(), 1);
        assert_eq!(Character::find().all(&db).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_planet_name_is_unique() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let hoth = || planet::ActiveModel {
            name: Set("Hoth".to_string()),
            description: Set(None),
            population: Set(None),
            ..Default::default()
        };

        hoth().insert(&db).await?;
        assert!(hoth().insert(&db).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_favorite_requires_exactly_one_target() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let user = user::ActiveModel {
            email: Set("han@falcon.space".to_string()),
            password: Set("kessel".to_string()),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let orphan = favorite::ActiveModel {
            user_id: Set(user.id),
            planet_id: Set(None),
            character_id: Set(None),
            ..Default::default()
        };
        assert!(orphan.insert(&db).await.is_err());
        Ok(())
    }
}
