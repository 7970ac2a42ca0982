use crate::models::{College, FieldOfStudy, Profile, Requester, SeekingCode};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when reading from the directory store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// PostgreSQL-backed record store for the member directory.
///
/// The store is read-only from this service's point of view: profiles,
/// accounts, colleges, fields of study and visibility preferences are owned
/// and mutated elsewhere. Every search works off one joined snapshot read.
pub struct DirectoryStore {
    pool: PgPool,
}

impl DirectoryStore {
    /// Create a new store client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL directory store");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Load the baseline-valid candidate pool as one joined snapshot,
    /// newest profile first.
    ///
    /// Both the search predicate and the exclusion set are evaluated against
    /// this single read, so the two stay snapshot-consistent.
    pub async fn load_candidates(&self) -> Result<Vec<Profile>, StoreError> {
        let query = r#"
            SELECT p.id, p.account_id, p.date_of_birth, p.seeking,
                   p.field_of_study_id, f.name AS field_of_study,
                   p.published, p.deactivated, p.created_at,
                   a.is_active, a.is_verified,
                   c.country, c.state, c.name,
                   COALESCE(v.restrict_same_college, FALSE) AS restrict_same_college,
                   COALESCE(v.restrict_major, FALSE) AS restrict_major,
                   COALESCE(v.restrict_other_colleges, FALSE) AS restrict_other_colleges
            FROM profiles p
            JOIN accounts a ON a.id = p.account_id
            JOIN colleges c ON c.id = a.college_id
            LEFT JOIN visibility_preferences v ON v.account_id = a.id
            LEFT JOIN fields_of_study f ON f.id = p.field_of_study_id
            WHERE a.is_active AND a.is_verified AND p.published AND NOT p.deactivated
            ORDER BY p.created_at DESC, p.id DESC
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let mut profiles = Vec::with_capacity(rows.len());
        for row in &rows {
            let seeking_code: String = row.try_get("seeking")?;
            let seeking = SeekingCode::from_str(&seeking_code)
                .map_err(StoreError::InvalidRecord)?;

            profiles.push(Profile {
                id: row.try_get("id")?,
                account_id: row.try_get("account_id")?,
                date_of_birth: row.try_get("date_of_birth")?,
                seeking,
                college: College {
                    country: row.try_get("country")?,
                    state: row.try_get("state")?,
                    name: row.try_get("name")?,
                },
                field_of_study_id: row.try_get("field_of_study_id")?,
                field_of_study: row.try_get("field_of_study")?,
                published: row.try_get("published")?,
                deactivated: row.try_get("deactivated")?,
                account_active: row.try_get("is_active")?,
                account_verified: row.try_get("is_verified")?,
                visibility: crate::models::VisibilityPreference {
                    restrict_same_college: row.try_get("restrict_same_college")?,
                    restrict_major: row.try_get("restrict_major")?,
                    restrict_other_colleges: row.try_get("restrict_other_colleges")?,
                },
                created_at: row.try_get("created_at")?,
            });
        }

        tracing::debug!("Loaded {} candidate profiles", profiles.len());

        Ok(profiles)
    }

    /// Resolve the requester context for an account: affiliation, the
    /// approved profile's field of study, and the elevated flag.
    ///
    /// A missing account is the one caller-contract error; an account with
    /// no college or no approved profile resolves to `None` values.
    pub async fn load_requester(&self, account_id: &str) -> Result<Requester, StoreError> {
        let query = r#"
            SELECT a.id, a.is_staff,
                   c.country, c.state, c.name,
                   p.field_of_study_id
            FROM accounts a
            LEFT JOIN colleges c ON c.id = a.college_id
            LEFT JOIN LATERAL (
                SELECT field_of_study_id
                FROM profiles
                WHERE account_id = a.id AND published AND NOT deactivated
                ORDER BY created_at DESC
                LIMIT 1
            ) p ON TRUE
            WHERE a.id = $1
        "#;

        let row = sqlx::query(query)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::AccountNotFound(account_id.to_string()))?;

        let country: Option<String> = row.try_get("country")?;
        let state: Option<String> = row.try_get("state")?;
        let name: Option<String> = row.try_get("name")?;
        let college = match (country, state, name) {
            (Some(country), Some(state), Some(name)) => Some(College { country, state, name }),
            _ => None,
        };

        Ok(Requester {
            account_id: row.try_get("id")?,
            college,
            field_of_study_id: row.try_get("field_of_study_id")?,
            elevated: row.try_get("is_staff")?,
        })
    }

    /// The canonical field-of-study reference set the normalizer resolves
    /// free-text criteria against.
    pub async fn list_fields_of_study(&self) -> Result<Vec<FieldOfStudy>, StoreError> {
        let rows = sqlx::query("SELECT id, name FROM fields_of_study ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        let mut fields = Vec::with_capacity(rows.len());
        for row in &rows {
            fields.push(FieldOfStudy {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
            });
        }

        Ok(fields)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
