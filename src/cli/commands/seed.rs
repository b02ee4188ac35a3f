use anyhow::{Context, Result};
use model::entities::user;
use model::store;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use tracing::{debug, info, instrument, trace};

use crate::config::connect_and_migrate;

/// Fixture file layout
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Fixture {
    pub users: Vec<UserFixture>,
    pub planets: Vec<PlanetFixture>,
    pub characters: Vec<CharacterFixture>,
}

#[derive(Debug, Deserialize)]
pub struct UserFixture {
    pub email: String,
    pub password: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct PlanetFixture {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub population: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CharacterFixture {
    pub name: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Rows written by a seed run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub planets: usize,
    pub characters: usize,
    pub skipped: usize,
}

pub fn load_fixture(json_path: &str) -> Result<Fixture> {
    let file = File::open(json_path)
        .with_context(|| format!("Failed to open fixture file '{}'", json_path))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse fixture file '{}'", json_path))
}

/// Write the fixture rows. Users with a known email and planets with a known
/// name are left untouched.
pub async fn apply_fixture(db: &DatabaseConnection, fixture: Fixture) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    for entry in fixture.users {
        let existing = user::Entity::find()
            .filter(user::Column::Email.eq(entry.email.as_str()))
            .one(db)
            .await?;
        if existing.is_some() {
            debug!("User '{}' already present, skipping", entry.email);
            summary.skipped += 1;
            continue;
        }
        store::create_user(db, &entry.email, &entry.password, entry.is_active)
            .await
            .with_context(|| format!("Failed to insert user '{}'", entry.email))?;
        summary.users += 1;
    }

    for entry in fixture.planets {
        let inserted =
            store::insert_planet_if_absent(db, &entry.name, entry.description, entry.population)
                .await
                .with_context(|| format!("Failed to insert planet '{}'", entry.name))?;
        match inserted {
            Some(_) => summary.planets += 1,
            None => summary.skipped += 1,
        }
    }

    for entry in fixture.characters {
        store::create_character(db, &entry.name, entry.gender, entry.description)
            .await
            .with_context(|| format!("Failed to insert character '{}'", entry.name))?;
        summary.characters += 1;
    }

    Ok(summary)
}

#[instrument]
pub async fn seed(json_path: &str, database_url: &str) -> Result<()> {
    trace!("Entering seed function");
    info!("Seeding database from {}", json_path);

    let fixture = load_fixture(json_path)?;
    let db = connect_and_migrate(database_url).await?;
    let summary = apply_fixture(&db, fixture).await?;

    info!(
        "Seed completed: {} users, {} planets, {} characters inserted, {} skipped",
        summary.users, summary.planets, summary.characters, summary.skipped
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::entities::{character, planet};
    use std::io::Write;

    const FIXTURE: &str = r#"{
        "users": [{"email": "luke@rebellion.org", "password": "x-wing"}],
        "planets": [
            {"name": "Tatooine", "description": "Desert world", "population": 200000},
            {"name": "Tatooine"}
        ],
        "characters": [{"name": "Luke Skywalker", "gender": "male"}]
    }"#;

    #[test]
    fn test_load_fixture_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();

        let fixture = load_fixture(file.path().to_str().unwrap()).unwrap();
        assert_eq!(fixture.users.len(), 1);
        assert!(fixture.users[0].is_active);
        assert_eq!(fixture.planets.len(), 2);
        assert_eq!(fixture.characters[0].description, None);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let fixture: Fixture = serde_json::from_str(r#"{"planets": []}"#).unwrap();
        assert!(fixture.users.is_empty());
        assert!(fixture.characters.is_empty());
    }

    #[tokio::test]
    async fn test_apply_fixture_is_idempotent_for_unique_rows() {
        let db = connect_and_migrate("sqlite::memory:").await.unwrap();

        let first = apply_fixture(&db, serde_json::from_str(FIXTURE).unwrap())
            .await
            .unwrap();
        assert_eq!(
            first,
            SeedSummary {
                users: 1,
                planets: 1,
                characters: 1,
                skipped: 1,
            }
        );

        let second = apply_fixture(&db, serde_json::from_str(FIXTURE).unwrap())
            .await
            .unwrap();
        assert_eq!(second.users, 0);
        assert_eq!(second.planets, 0);
        assert_eq!(second.skipped, 3);

        assert_eq!(store::list_all::<planet::Entity, _>(&db).await.unwrap().len(), 1);
        assert_eq!(store::list_all::<character::Entity, _>(&db).await.unwrap().len(), 2);
    }
}
