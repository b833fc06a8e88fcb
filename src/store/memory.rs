use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StudentStore, UserStore, DUPLICATE_STUDENT_EMAIL, DUPLICATE_USER_EMAIL};
use crate::error::{AppError, DatabaseError};
use crate::models::{NewStudent, NewUser, Student, User};

#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Database(DatabaseError::UniqueConstraintViolation(
                DUPLICATE_USER_EMAIL.to_string(),
            )));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            token_version: 1,
            created_at: Utc::now(),
        };
        users.push(user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn bump_token_version(&self, id: Uuid) -> Result<i32, AppError> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::Database(DatabaseError::NotFound("user".to_string())))?;

        user.token_version += 1;
        Ok(user.token_version)
    }
}

#[derive(Default)]
pub struct InMemoryStudentStore {
    students: RwLock<Vec<Student>>,
}

#[async_trait]
impl StudentStore for InMemoryStudentStore {
    async fn list(&self) -> Result<Vec<Student>, AppError> {
        Ok(self.students.read().await.clone())
    }

    async fn insert(&self, student: NewStudent) -> Result<Student, AppError> {
        let mut students = self.students.write().await;

        if students.iter().any(|s| s.email == student.email) {
            return Err(AppError::Database(DatabaseError::UniqueConstraintViolation(
                DUPLICATE_STUDENT_EMAIL.to_string(),
            )));
        }

        let student = Student {
            id: Uuid::new_v4(),
            name: student.name,
            email: student.email,
            course: student.course,
            status: student.status,
            created_at: Utc::now(),
        };
        students.push(student.clone());

        Ok(student)
    }
}
