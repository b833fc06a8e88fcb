use super::{ApiClient, ClientError, Notice, Outcome, SessionStore, View};
use crate::error::ValidationError;
use crate::schema::RegisterRequest;
use crate::validators::{
    is_email_valid, is_password_valid, password_strength, passwords_match, PasswordStrength,
};

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    /// Someone already logged in skips registration.
    pub fn on_enter(session: &SessionStore) -> Result<Option<View>, ClientError> {
        Ok(session.load()?.map(|_| View::Dashboard))
    }

    /// Strength indicator for the password typed so far.
    pub fn strength(&self) -> Option<PasswordStrength> {
        if self.password.is_empty() {
            None
        } else {
            Some(password_strength(&self.password))
        }
    }

    /// Checked in order: email, password rule, confirmation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_email_valid(self.email.trim()) {
            return Err(ValidationError::InvalidFormat("email"));
        }
        if !is_password_valid(&self.password) {
            return Err(ValidationError::WeakPassword);
        }
        passwords_match(&self.password, &self.confirm_password)
    }

    pub async fn submit(&self, api: &ApiClient) -> Outcome {
        if let Err(e) = self.validate() {
            let message = match e {
                ValidationError::InvalidFormat("email") => "Invalid email".to_string(),
                other => other.to_string(),
            };
            return Outcome::notice(Notice::error(message));
        }

        let name = self.name.trim();
        let request = RegisterRequest {
            name: (!name.is_empty()).then(|| name.to_string()),
            email: Some(self.email.trim().to_string()),
            password: Some(self.password.clone()),
        };

        match api.register(&request).await {
            Ok(user) => {
                tracing::debug!(user_id = %user.id, "Registered");
                Outcome::notice(Notice::success("Registration successful")).navigate(View::Login)
            }
            Err(e) => Outcome::notice(Notice::error(e.to_string())),
        }
    }
}
