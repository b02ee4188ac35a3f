use sea_orm::Set;
use sea_orm::entity::prelude::*;

/// What a favorite points at. A favorite always references exactly one
/// planet or exactly one character, never both and never neither.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FavoriteTarget {
    Planet(i32),
    Character(i32),
}

impl FavoriteTarget {
    /// Name of the referenced entity kind, as used in log and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FavoriteTarget::Planet(_) => "Planet",
            FavoriteTarget::Character(_) => "Character",
        }
    }

    pub fn id(&self) -> i32 {
        match self {
            FavoriteTarget::Planet(id) | FavoriteTarget::Character(id) => *id,
        }
    }
}

/// Link between a user and one planet or one character.
///
/// The two nullable columns are the storage form of [`FavoriteTarget`]; the
/// table carries a CHECK constraint so exactly one of them is set.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "favorite")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub planet_id: Option<i32>,
    pub character_id: Option<i32>,
}

impl Model {
    /// Decode the stored columns. Returns `None` for a row that has both or
    /// neither target column set.
    pub fn target(&self) -> Option<FavoriteTarget> {
        match (self.planet_id, self.character_id) {
            (Some(planet_id), None) => Some(FavoriteTarget::Planet(planet_id)),
            (None, Some(character_id)) => Some(FavoriteTarget::Character(character_id)),
            _ => None,
        }
    }
}

impl ActiveModel {
    /// Build an unsaved favorite for `user_id` pointing at `target`.
    pub fn for_target(user_id: i32, target: FavoriteTarget) -> Self {
        let (planet_id, character_id) = match target {
            FavoriteTarget::Planet(id) => (Some(id), None),
            FavoriteTarget::Character(id) => (None, Some(id)),
        };
        Self {
            user_id: Set(user_id),
            planet_id: Set(planet_id),
            character_id: Set(character_id),
            ..Default::default()
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::planet::Entity",
        from = "Column::PlanetId",
        to = "super::planet::Column::Id"
    )]
    Planet,
    #[sea_orm(
        belongs_to = "super::character::Entity",
        from = "Column::CharacterId",
        to = "super::character::Column::Id"
    )]
    Character,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::planet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Planet.def()
    }
}

impl Related<super::character::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Character.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(planet_id: Option<i32>, character_id: Option<i32>) -> Model {
        Model {
            id: 1,
            user_id: 1,
            planet_id,
            character_id,
        }
    }

    #[test]
    fn test_target_decodes_single_reference() {
        assert_eq!(row(Some(3), None).target(), Some(FavoriteTarget::Planet(3)));
        assert_eq!(row(None, Some(7)).target(), Some(FavoriteTarget::Character(7)));
    }

    #[test]
    fn test_target_rejects_ambiguous_rows() {
        assert_eq!(row(Some(3), Some(7)).target(), None);
        assert_eq!(row(None, None).target(), None);
    }

    #[test]
    fn test_for_target_sets_exactly_one_column() {
        let active = ActiveModel::for_target(2, FavoriteTarget::Character(5));
        assert_eq!(active.user_id, Set(2));
        assert_eq!(active.planet_id, Set(None));
        assert_eq!(active.character_id, Set(Some(5)));
    }
}
