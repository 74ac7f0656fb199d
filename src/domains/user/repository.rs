use crate::domains::user::types::{NewUser, User, UserRow};
use crate::errors::{DbError, DomainError, DomainResult};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{query_as, SqlitePool};
use uuid::Uuid;

/// User store. The service only ever looks users up by email and creates
/// new records; updates and deletes are out of scope for this core.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email. Emails are compared case-sensitively.
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Create a new user. `new_user.password` must already be hashed.
    async fn create(&self, new_user: NewUser) -> DomainResult<User>;
}

/// SQLite implementation of UserRepository
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository instance
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let row = query_as::<_, UserRow>(
            "SELECT * FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Database(DbError::from(e)))?;

        row.map(UserRow::into_entity).transpose()
    }

    async fn create(&self, new_user: NewUser) -> DomainResult<User> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO users (id, email, name, password_hash, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(&new_user.email)
        .bind(&new_user.name)
        .bind(&new_user.password)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            // A lost race on the UNIQUE(email) constraint
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                DomainError::Database(DbError::Conflict(format!(
                    "user with email {} already exists",
                    new_user.email
                )))
            }
            _ => DomainError::Database(DbError::from(e)),
        })?;

        Ok(User {
            id,
            email: new_user.email,
            name: new_user.name,
            password_hash: new_user.password,
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_repo() -> SqliteUserRepository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        db::run_migrations(&pool).await.unwrap();
        SqliteUserRepository::new(pool)
    }

    fn sample_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            name: "Sample".to_string(),
            password: "$2b$10$notarealhashbutgoodenough".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_by_email() {
        let repo = test_repo().await;

        let created = repo.create(sample_user("a@x.com")).await.unwrap();
        assert_eq!(created.email, "a@x.com");

        let found = repo.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.name, "Sample");
        assert_eq!(found.password_hash, created.password_hash);

        assert!(repo.find_by_email("missing@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_sensitive() {
        let repo = test_repo().await;
        repo.create(sample_user("Case@X.com")).await.unwrap();

        assert!(repo.find_by_email("case@x.com").await.unwrap().is_none());
        assert!(repo.find_by_email("Case@X.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_a_conflict() {
        let repo = test_repo().await;
        repo.create(sample_user("dup@x.com")).await.unwrap();

        let err = repo.create(sample_user("dup@x.com")).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Database(DbError::Conflict(_))
        ));
    }
}
