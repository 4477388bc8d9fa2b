//! This module sets up the PostgreSQL database for integration tests
//!
//! The integration test uses the same PostgreSQL container as the development environment.
//! But, it creates a separate test database for each test case.
//! The test database is named in the format `test_reset_password_db_<uuid>`,
//! where `<uuid>` is the UUID with hyphens replaced by underscores.
//!
//! [NOTICE]
//!
//! A test database is created for each test run, so you must drop the test databases
//! whose names start with `test_reset_password_db_` manually.
use std::path::Path;

use secrecy::SecretString;
use sqlx::{Connection as _, Executor as _, PgConnection, PgPool};

use app::load_app_settings;
use infra::{password::LegacyCredentialHasher, postgres::repositories::PgCredentialStore};
use settings::{AppSettings, DatabaseSettings};
use use_case::credential::ResetCredentialUseCase;

pub const TEST_DATABASE_PREFIX: &str = "test_reset_password_db_";

pub fn load_app_settings_for_testing() -> AppSettings {
    let dir = std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set");
    let path = Path::new(&dir).join("..").join("app_settings.toml");
    let mut app_settings = load_app_settings(path.to_str()).unwrap();
    app_settings.database.name =
        format!("{}{}", TEST_DATABASE_PREFIX, uuid::Uuid::new_v4()).replace('-', "_");
    app_settings
}

/// Test case for integration tests against PostgreSQL
pub struct TestCase {
    pub app_settings: AppSettings,
    pub pool: PgPool,
}

impl TestCase {
    pub async fn begin(app_settings: AppSettings) -> Self {
        let pool = setup_database(&app_settings.database).await;
        Self { app_settings, pool }
    }

    pub async fn end(self) {
        self.pool.close().await;
    }

    pub fn use_case(&self) -> ResetCredentialUseCase<PgCredentialStore, LegacyCredentialHasher> {
        ResetCredentialUseCase::new(
            PgCredentialStore::new(self.pool.clone()),
            LegacyCredentialHasher::new(&self.app_settings.password).unwrap(),
        )
    }

    pub async fn insert_account(&self, email: &str, password_hash: &str, updated_at: i64) {
        sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .unwrap();
    }

    pub async fn account(&self, email: &str) -> Option<(String, Option<i64>)> {
        sqlx::query_as::<_, (String, Option<i64>)>(
            "SELECT password_hash, updated_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .unwrap()
    }

    pub async fn number_of_accounts(&self) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

pub fn secret(value: &str) -> SecretString {
    SecretString::from(value.to_string())
}

/// Sets up the PostgreSQL database for testing
async fn setup_database(settings: &DatabaseSettings) -> PgPool {
    // Connect to the **postgres** database
    let postgres_settings = DatabaseSettings {
        name: String::from("postgres"),
        ..settings.clone()
    };
    let mut conn = PgConnection::connect_with(&postgres_settings.connect_options())
        .await
        .unwrap();

    // Create the test database
    conn.execute(format!("CREATE DATABASE {};", settings.name).as_str())
        .await
        .unwrap();

    // Migrate the database
    let pool = PgPool::connect_with(settings.connect_options())
        .await
        .unwrap();
    sqlx::migrate!("../migrations").run(&pool).await.unwrap();

    pool
}
