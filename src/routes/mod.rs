mod auth;
mod health_check;
mod students;

pub use auth::{get_current_user, login, logout_all, register};
pub use health_check::health_check;
pub use students::{create_student, list_students};
