//! Store operations over the catalog entities.
//!
//! Every operation is a single statement (or a read-only batch of selects);
//! no transaction spans more than one entity.

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityName, EntityTrait, Iterable,
    PrimaryKeyToColumn, PrimaryKeyTrait, QueryFilter, QueryOrder, Set,
};
use thiserror::Error;
use tracing::{debug, instrument, trace};

use crate::entities::favorite::FavoriteTarget;
use crate::entities::{character, favorite, planet, user};

/// Errors returned by store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// A referenced row does not exist
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// A stored favorite references both or neither of planet/character
    #[error("Favorite {0} has an invalid target")]
    InvalidFavorite(i32),

    /// Error from the database layer, including constraint violations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Type alias for Result with StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// A favorite together with the entity it points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FavoriteWithTarget {
    pub favorite: favorite::Model,
    pub planet: Option<planet::Model>,
    pub character: Option<character::Model>,
}

/// Every row of `E`, ordered by primary key.
pub async fn list_all<E, C>(db: &C) -> Result<Vec<E::Model>>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let mut query = E::find();
    for key in E::PrimaryKey::iter() {
        query = query.order_by_asc(key.into_column());
    }
    let rows = query.all(db).await?;
    trace!("Loaded {} rows from {}", rows.len(), E::default().table_name());
    Ok(rows)
}

/// Single row of `E` by id, or `None` when absent.
pub async fn get_by_id<E, C>(db: &C, id: i32) -> Result<Option<E::Model>>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
    C: ConnectionTrait,
{
    Ok(E::find_by_id(id).one(db).await?)
}

/// Remove a row of `E` by id. Returns whether a row was removed.
pub async fn delete_by_id<E, C>(db: &C, id: i32) -> Result<bool>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
    C: ConnectionTrait,
{
    let result = E::delete_by_id(id).exec(db).await?;
    debug!(
        "Delete on {} id {} affected {} rows",
        E::default().table_name(),
        id,
        result.rows_affected
    );
    Ok(result.rows_affected > 0)
}

#[instrument(skip(db, password))]
pub async fn create_user<C: ConnectionTrait>(
    db: &C,
    email: &str,
    password: &str,
    is_active: bool,
) -> Result<user::Model> {
    let row = user::ActiveModel {
        email: Set(email.to_string()),
        password: Set(password.to_string()),
        is_active: Set(is_active),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(row)
}

#[instrument(skip(db))]
pub async fn create_planet<C: ConnectionTrait>(
    db: &C,
    name: &str,
    description: Option<String>,
    population: Option<i64>,
) -> Result<planet::Model> {
    let row = planet::ActiveModel {
        name: Set(name.to_string()),
        description: Set(description),
        population: Set(population),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(row)
}

#[instrument(skip(db))]
pub async fn create_character<C: ConnectionTrait>(
    db: &C,
    name: &str,
    gender: Option<String>,
    description: Option<String>,
) -> Result<character::Model> {
    let row = character::ActiveModel {
        name: Set(name.to_string()),
        gender: Set(gender),
        description: Set(description),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(row)
}

/// Persist a favorite for `user_id` and return it with its resolved target.
///
/// Fails with [`StoreError::NotFound`] when the user or the target row is
/// missing, so a favorite never points at nothing.
#[instrument(skip(db))]
pub async fn create_favorite<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    target: FavoriteTarget,
) -> Result<FavoriteWithTarget> {
    if get_by_id::<user::Entity, _>(db, user_id).await?.is_none() {
        return Err(StoreError::NotFound {
            entity: "User",
            id: user_id,
        });
    }

    let (planet, character) = match target {
        FavoriteTarget::Planet(id) => (Some(get_by_id::<planet::Entity, _>(db, id).await?), None),
        FavoriteTarget::Character(id) => {
            (None, Some(get_by_id::<character::Entity, _>(db, id).await?))
        }
    };
    if matches!(planet, Some(None)) || matches!(character, Some(None)) {
        return Err(StoreError::NotFound {
            entity: target.kind(),
            id: target.id(),
        });
    }

    let favorite = favorite::ActiveModel::for_target(user_id, target)
        .insert(db)
        .await?;
    debug!("Created favorite {} for user {}", favorite.id, user_id);

    Ok(FavoriteWithTarget {
        favorite,
        planet: planet.flatten(),
        character: character.flatten(),
    })
}

/// Every favorite with its planet or character loaded.
///
/// Targets are fetched with one `IN` query per entity kind rather than one
/// query per favorite.
#[instrument(skip(db))]
pub async fn list_favorites<C: ConnectionTrait>(db: &C) -> Result<Vec<FavoriteWithTarget>> {
    let favorites = list_all::<favorite::Entity, _>(db).await?;

    let mut planet_ids = Vec::new();
    let mut character_ids = Vec::new();
    for favorite in &favorites {
        match favorite.target() {
            Some(FavoriteTarget::Planet(id)) => planet_ids.push(id),
            Some(FavoriteTarget::Character(id)) => character_ids.push(id),
            None => return Err(StoreError::InvalidFavorite(favorite.id)),
        }
    }

    let planets: HashMap<i32, planet::Model> = planet::Entity::find()
        .filter(planet::Column::Id.is_in(planet_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();
    let characters: HashMap<i32, character::Model> = character::Entity::find()
        .filter(character::Column::Id.is_in(character_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    Ok(favorites
        .into_iter()
        .map(|favorite| {
            let planet = favorite.planet_id.and_then(|id| planets.get(&id).cloned());
            let character = favorite
                .character_id
                .and_then(|id| characters.get(&id).cloned());
            FavoriteWithTarget {
                favorite,
                planet,
                character,
            }
        })
        .collect())
}

/// Remove a favorite by its own id. Returns whether a row was removed.
pub async fn delete_favorite<C: ConnectionTrait>(db: &C, favorite_id: i32) -> Result<bool> {
    delete_by_id::<favorite::Entity, _>(db, favorite_id).await
}

/// Insert a planet unless one with the same name already exists.
/// Returns `None` when the row was skipped.
pub async fn insert_planet_if_absent<C: ConnectionTrait>(
    db: &C,
    name: &str,
    description: Option<String>,
    population: Option<i64>,
) -> Result<Option<planet::Model>> {
    let existing = planet::Entity::find()
        .filter(planet::Column::Name.eq(name))
        .one(db)
        .await?;
    if existing.is_some() {
        debug!("Planet '{}' already present, skipping", name);
        return Ok(None);
    }
    Ok(Some(create_planet(db, name, description, population).await?))
}
