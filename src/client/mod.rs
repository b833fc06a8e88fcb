//! Client application.
//!
//! Three views (login, register, dashboard) modelled as plain state plus
//! async actions. Every action returns an [`Outcome`]: a transient notice to
//! show the user and, optionally, the view to navigate to. Rendering is left
//! to the caller; `sa-client` prints to the terminal.

mod api;
mod dashboard;
mod login;
mod register;
mod session;

use std::fmt;

pub use api::{ApiClient, DEFAULT_BASE_URL};
pub use dashboard::{Dashboard, StudentForm};
pub use login::LoginForm;
pub use register::RegisterForm;
pub use session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Register,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A transient message for the user, the equivalent of a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// What a user action produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outcome {
    pub notice: Option<Notice>,
    pub navigate_to: Option<View>,
}

impl Outcome {
    pub fn notice(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            navigate_to: None,
        }
    }

    pub fn navigate(mut self, view: View) -> Self {
        self.navigate_to = Some(view);
        self
    }

    pub fn is_error(&self) -> bool {
        matches!(&self.notice, Some(n) if n.level == NoticeLevel::Error)
    }
}

/// Client-side failures
#[derive(Debug)]
pub enum ClientError {
    /// The server answered with a non-2xx status; `message` is its `error` field.
    Api { status: u16, message: String },
    Transport(String),
    Storage(String),
}

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Api { status: 401, .. })
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Api { message, .. } => write!(f, "{}", message),
            ClientError::Transport(msg) => write!(f, "Network error: {}", msg),
            ClientError::Storage(msg) => write!(f, "Session storage error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}
