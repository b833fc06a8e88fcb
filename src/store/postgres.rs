use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{StudentStore, UserStore, DUPLICATE_STUDENT_EMAIL, DUPLICATE_USER_EMAIL};
use crate::error::{AppError, DatabaseError};
use crate::models::{NewStudent, NewUser, Student, User};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: Option<String>,
    email: String,
    password_hash: String,
    token_version: i32,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            token_version: row.token_version,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct StudentRow {
    id: Uuid,
    name: String,
    email: String,
    course: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<StudentRow> for Student {
    type Error = AppError;

    fn try_from(row: StudentRow) -> Result<Self, Self::Error> {
        let status = row.status.parse().map_err(|_| {
            AppError::Database(DatabaseError::UnexpectedError(format!(
                "unknown student status '{}' for {}",
                row.status, row.id
            )))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            email: row.email,
            course: row.course,
            status,
            created_at: row.created_at,
        })
    }
}

/// Replaces the generic duplicate message with one the caller can show.
fn with_conflict_message(err: sqlx::Error, message: &str) -> AppError {
    match AppError::from(err) {
        AppError::Database(DatabaseError::UniqueConstraintViolation(_)) => AppError::Database(
            DatabaseError::UniqueConstraintViolation(message.to_string()),
        ),
        other => other,
    }
}

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, name, email, password_hash, token_version, created_at)
            VALUES ($1, $2, $3, $4, 1, $5)
            RETURNING id, name, email, password_hash, token_version, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| with_conflict_message(e, DUPLICATE_USER_EMAIL))?;

        Ok(row.into())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, password_hash, token_version, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, password_hash, token_version, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn bump_token_version(&self, id: Uuid) -> Result<i32, AppError> {
        let version = sqlx::query_scalar::<_, i32>(
            "UPDATE users SET token_version = token_version + 1 WHERE id = $1 RETURNING token_version",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::Database(DatabaseError::NotFound("user".to_string())))?;

        Ok(version)
    }
}

pub struct PgStudentStore {
    pool: PgPool,
}

impl PgStudentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentStore for PgStudentStore {
    async fn list(&self) -> Result<Vec<Student>, AppError> {
        sqlx::query_as::<_, StudentRow>(
            "SELECT id, name, email, course, status, created_at FROM students ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(Student::try_from)
        .collect()
    }

    async fn insert(&self, student: NewStudent) -> Result<Student, AppError> {
        let row = sqlx::query_as::<_, StudentRow>(
            r#"
            INSERT INTO students (id, name, email, course, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, email, course, status, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&student.name)
        .bind(&student.email)
        .bind(&student.course)
        .bind(student.status.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| with_conflict_message(e, DUPLICATE_STUDENT_EMAIL))?;

        row.try_into()
    }
}
