/// Request and response bodies of the HTTP API.
///
/// Request fields are optional on the wire so that a missing field is
/// reported as `MissingField` by validation instead of a generic
/// deserialisation failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::models::{NewStudent, StudentStatus, User};
use crate::validators::{check_email, required};

/// POST /api/auth/register
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/auth/login
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/students
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateStudentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub course: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl CreateStudentRequest {
    /// Authoritative validation of a new student record.
    pub fn validate(&self) -> Result<NewStudent, ValidationError> {
        let name = required("name", self.name.as_deref())?;
        let email = check_email(self.email.as_deref())?;
        let course = required("course", self.course.as_deref())?;
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => StudentStatus::default(),
            Some(status) => status.parse()?,
        };

        Ok(NewStudent {
            name,
            email,
            course,
            status,
        })
    }
}

/// Successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

/// Public view of a user; never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann() -> CreateStudentRequest {
        CreateStudentRequest {
            name: Some("Ann".to_string()),
            email: Some("ann@x.com".to_string()),
            course: Some("CS101".to_string()),
            status: Some("active".to_string()),
        }
    }

    #[test]
    fn test_valid_student_request() {
        let student = ann().validate().expect("valid request");
        assert_eq!(student.name, "Ann");
        assert_eq!(student.email, "ann@x.com");
        assert_eq!(student.course, "CS101");
        assert_eq!(student.status, StudentStatus::Active);
    }

    #[test]
    fn test_student_email_keeps_its_case() {
        let request = CreateStudentRequest {
            email: Some(" Ann@X.com ".to_string()),
            ..ann()
        };
        assert_eq!(request.validate().unwrap().email, "Ann@X.com");
    }

    #[test]
    fn test_missing_status_defaults_to_active() {
        let request = CreateStudentRequest {
            status: None,
            ..ann()
        };
        assert_eq!(request.validate().unwrap().status, StudentStatus::Active);
    }

    #[test]
    fn test_missing_fields_are_reported_by_name() {
        let request = CreateStudentRequest {
            course: None,
            ..ann()
        };
        assert_eq!(request.validate(), Err(ValidationError::MissingField("course")));

        let request = CreateStudentRequest {
            name: Some("  ".to_string()),
            ..ann()
        };
        assert_eq!(request.validate(), Err(ValidationError::MissingField("name")));
    }

    #[test]
    fn test_bad_email_and_status_are_invalid_format() {
        let request = CreateStudentRequest {
            email: Some("ann-at-x".to_string()),
            ..ann()
        };
        assert_eq!(request.validate(), Err(ValidationError::InvalidFormat("email")));

        let request = CreateStudentRequest {
            status: Some("expelled".to_string()),
            ..ann()
        };
        assert_eq!(request.validate(), Err(ValidationError::InvalidFormat("status")));
    }

    #[test]
    fn test_register_request_omits_absent_name() {
        let body = serde_json::to_value(RegisterRequest {
            name: None,
            email: Some("a@b.co".to_string()),
            password: Some("Passw0rd!".to_string()),
        })
        .unwrap();
        assert!(body.get("name").is_none());
    }
}
