/// Persistence for users and students.
///
/// Handlers only see the traits; `postgres` backs them with sqlx and
/// `memory` keeps everything in process (local runs and tests).

mod memory;
mod postgres;

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewStudent, NewUser, Student, User};

pub use memory::{InMemoryStudentStore, InMemoryUserStore};
pub use postgres::{PgStudentStore, PgUserStore};

pub const DUPLICATE_USER_EMAIL: &str = "Email already registered";
pub const DUPLICATE_STUDENT_EMAIL: &str = "A student with this email already exists";

/// Credential store
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with a unique-constraint error when the email is taken.
    async fn insert(&self, user: NewUser) -> Result<User, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Invalidates every token issued so far; returns the new version.
    async fn bump_token_version(&self, id: Uuid) -> Result<i32, AppError>;
}

/// Student store
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// All students in insertion order.
    async fn list(&self) -> Result<Vec<Student>, AppError>;

    /// Fails with a unique-constraint error when the email is taken.
    async fn insert(&self, student: NewStudent) -> Result<Student, AppError>;
}

/// The pair of stores the server runs on.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub students: Arc<dyn StudentStore>,
}

impl Stores {
    pub fn postgres(pool: sqlx::PgPool) -> Self {
        Self {
            users: Arc::new(PgUserStore::new(pool.clone())),
            students: Arc::new(PgStudentStore::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserStore::default()),
            students: Arc::new(InMemoryStudentStore::default()),
        }
    }
}
