use crate::router::create_router;
use crate::schemas::AppState;
use axum::Router;
use axum_test::TestServer;
use migration::{Migrator, MigratorTrait};
use model::entities::{character, planet, user};
use model::store;
use sea_orm::{Database, DatabaseConnection};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Rows inserted by [`setup_test_app`]
pub struct Fixtures {
    pub user: user::Model,
    pub tatooine: planet::Model,
    pub alderaan: planet::Model,
    pub luke: character::Model,
    pub leia: character::Model,
}

/// Create an in-memory SQLite database for testing
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

async fn insert_fixtures(db: &DatabaseConnection) -> Fixtures {
    let user = store::create_user(db, "luke@rebellion.org", "x-wing", true)
        .await
        .expect("Failed to create test user");
    let tatooine = store::create_planet(
        db,
        "Tatooine",
        Some("Desert world with two suns".to_string()),
        Some(200_000),
    )
    .await
    .expect("Failed to create Tatooine");
    let alderaan = store::create_planet(db, "Alderaan", None, Some(2_000_000_000))
        .await
        .expect("Failed to create Alderaan");
    let luke = store::create_character(
        db,
        "Luke Skywalker",
        Some("male".to_string()),
        Some("Farm boy from Tatooine".to_string()),
    )
    .await
    .expect("Failed to create Luke");
    let leia = store::create_character(db, "Leia Organa", Some("female".to_string()), None)
        .await
        .expect("Failed to create Leia");

    Fixtures {
        user,
        tatooine,
        alderaan,
        luke,
        leia,
    }
}

/// Install a global tracing subscriber for tests, writing through the test
/// harness so output is captured per test.
///
/// The log level comes from RUST_LOG, defaulting to WARN. Later calls are
/// no-ops.
fn init_test_tracing() {
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| level.parse::<Level>().ok())
        .unwrap_or(Level::WARN);

    let _ = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_test_writer()
        .try_init();
}

/// Create axum app over a seeded in-memory database
pub async fn setup_test_app() -> (Router, Fixtures) {
    init_test_tracing();

    let db = setup_test_db().await;
    let fixtures = insert_fixtures(&db).await;
    let state = AppState {
        db,
        default_user_id: fixtures.user.id,
    };
    (create_router(state), fixtures)
}

/// Test server plus the rows it was seeded with
pub async fn setup_test_server() -> (TestServer, Fixtures) {
    let (app, fixtures) = setup_test_app().await;
    let server = TestServer::new(app).expect("Failed to start test server");
    (server, fixtures)
}
