use super::{ApiClient, Notice, Outcome, SessionStore, View};
use crate::schema::LoginRequest;

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Sends the credentials; on success the token is stored and handed to
    /// `api` for subsequent requests.
    pub async fn submit(&self, api: &mut ApiClient, session: &SessionStore) -> Outcome {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Outcome::notice(Notice::warning("All fields are required"));
        }

        let request = LoginRequest {
            email: Some(self.email.trim().to_string()),
            password: Some(self.password.clone()),
        };

        let token = match api.login(&request).await {
            Ok(response) => response.token,
            Err(e) => {
                tracing::debug!(error = %e, "Login failed");
                return Outcome::notice(Notice::error(e.to_string()));
            }
        };

        if let Err(e) = session.save(&token) {
            return Outcome::notice(Notice::error(e.to_string()));
        }
        api.set_token(Some(token));

        Outcome::notice(Notice::success("Login successful")).navigate(View::Dashboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::NoticeLevel;
    use std::time::Duration;

    #[tokio::test]
    async fn test_empty_fields_warn_without_a_request() {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionStore::new(dir.path().join("session.json"));
        // nothing listens here; a request would surface as a network error
        let mut api = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();

        let form = LoginForm {
            email: "ann@x.com".to_string(),
            password: String::new(),
        };
        let outcome = form.submit(&mut api, &session).await;

        let notice = outcome.notice.unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, "All fields are required");
        assert_eq!(outcome.navigate_to, None);
        assert_eq!(session.load().unwrap(), None);
    }
}
