/// Domain records persisted by the stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ValidationError;

/// Registered account. The password is only ever held as a bcrypt hash.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub password_hash: String,
    /// Bumped by logout-everywhere; tokens carrying an older value are rejected.
    pub token_version: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
}

impl StudentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudentStatus::Active => "active",
            StudentStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "active" => Ok(StudentStatus::Active),
            "inactive" => Ok(StudentStatus::Inactive),
            _ => Err(ValidationError::InvalidFormat("status")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub course: String,
    pub status: StudentStatus,
    pub created_at: DateTime<Utc>,
}

/// A validated student waiting to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub course: String,
    pub status: StudentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        assert_eq!("active".parse::<StudentStatus>(), Ok(StudentStatus::Active));
        assert_eq!("inactive".parse::<StudentStatus>(), Ok(StudentStatus::Inactive));
        assert_eq!(StudentStatus::Inactive.to_string(), "inactive");
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert_eq!(
            "graduated".parse::<StudentStatus>(),
            Err(ValidationError::InvalidFormat("status"))
        );
        assert!("Active".parse::<StudentStatus>().is_err());
    }

    #[test]
    fn test_status_defaults_to_active() {
        assert_eq!(StudentStatus::default(), StudentStatus::Active);
    }

    #[test]
    fn test_status_serialises_lowercase() {
        let json = serde_json::to_string(&StudentStatus::Inactive).unwrap();
        assert_eq!(json, "\"inactive\"");
    }
}
