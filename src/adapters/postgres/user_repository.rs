//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{ConflictField, DomainError, ErrorCode, Role, Timestamp, UserId};
use crate::domain::user::{NewUser, User, UserPatch};
use crate::ports::UserRepository;

use super::map_sqlx_error;

const COLUMNS: &str = "id, username, email, password_hash, role, scopes, created_at, updated_at";

/// PostgreSQL implementation of UserRepository.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM users WHERE {column} = $1"))
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to fetch user"))?;

        row.map(row_to_user).transpose()
    }
}

fn not_found(id: &UserId) -> DomainError {
    DomainError::new(ErrorCode::UserNotFound, "User not found").with_detail("id", id.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM users WHERE id = $1"))
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to fetch user"))?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.find_one("username", username).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_one("email", email).await
    }

    async fn find_identity_conflict(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        excluding: Option<&UserId>,
    ) -> Result<Option<ConflictField>, DomainError> {
        let row: Option<(bool, bool)> = sqlx::query_as(
            r#"
            SELECT COALESCE(bool_or(username = $1), FALSE),
                   COALESCE(bool_or(email = $2), FALSE)
            FROM users
            WHERE ($1::text IS NOT NULL OR $2::text IS NOT NULL)
              AND ($3::bigint IS NULL OR id <> $3)
              AND (username = $1 OR email = $2)
            HAVING COUNT(*) > 0
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(excluding.map(UserId::as_i64))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "Failed to check user uniqueness"))?;

        Ok(match row {
            Some((true, _)) => Some(ConflictField::Username),
            Some((_, true)) => Some(ConflictField::Email),
            _ => None,
        })
    }

    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(&format!("SELECT {COLUMNS} FROM users ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to list users"))?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to count users"))?;

        Ok(count.max(0) as u64)
    }

    async fn insert(&self, user: &NewUser) -> Result<User, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO users (username, email, password_hash, role, scopes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.credential_hash)
        .bind(user.role.as_str())
        .bind(&user.scopes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "Failed to insert user"))?;

        row_to_user(row)
    }

    async fn update(&self, id: &UserId, patch: &UserPatch) -> Result<User, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE users SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                role = COALESCE($5, role),
                scopes = COALESCE($6, scopes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id.as_i64())
        .bind(patch.username.as_deref())
        .bind(patch.email.as_deref())
        .bind(patch.credential_hash.as_deref())
        .bind(patch.role.map(|r| r.as_str()))
        .bind(patch.scopes.clone())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "Failed to update user"))?;

        match row {
            Some(row) => row_to_user(row),
            None => Err(not_found(id)),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to delete user"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

fn row_to_user(row: PgRow) -> Result<User, DomainError> {
    let decode = |e: sqlx::Error| map_sqlx_error(e, "Failed to decode user row");

    let role: String = row.try_get("role").map_err(decode)?;
    let role: Role = role.parse().map_err(|_| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid role in database: {}", role))
    })?;

    Ok(User {
        id: UserId::new(row.try_get("id").map_err(decode)?),
        username: row.try_get("username").map_err(decode)?,
        email: row.try_get("email").map_err(decode)?,
        credential_hash: row.try_get("password_hash").map_err(decode)?,
        role,
        scopes: row.try_get("scopes").map_err(decode)?,
        created_at: Timestamp::from_datetime(row.try_get("created_at").map_err(decode)?),
        updated_at: Timestamp::from_datetime(row.try_get("updated_at").map_err(decode)?),
    })
}
