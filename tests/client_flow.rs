//! The client views driven against a live server.

mod common;

use common::{spawn_app, VALID_PASSWORD};
use std::time::Duration;
use student_admin::client::{
    ApiClient, ClientError, Dashboard, LoginForm, NoticeLevel, RegisterForm, SessionStore,
    StudentForm, View,
};
use student_admin::models::StudentStatus;

fn client_for(address: &str) -> ApiClient {
    ApiClient::new(address, Duration::from_secs(10)).unwrap()
}

fn register_form(email: &str) -> RegisterForm {
    RegisterForm {
        name: "Ann Admin".to_string(),
        email: email.to_string(),
        password: VALID_PASSWORD.to_string(),
        confirm_password: VALID_PASSWORD.to_string(),
    }
}

#[tokio::test]
async fn register_login_and_manage_students() {
    let app = spawn_app();
    let dir = tempfile::tempdir().unwrap();
    let session = SessionStore::new(dir.path().join("session.json"));
    let mut api = client_for(&app.address);

    // register
    assert_eq!(RegisterForm::on_enter(&session).unwrap(), None);
    let outcome = register_form("admin@x.com").submit(&api).await;
    let notice = outcome.notice.unwrap();
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.message, "Registration successful");
    assert_eq!(outcome.navigate_to, Some(View::Login));

    // login
    let outcome = LoginForm {
        email: "admin@x.com".to_string(),
        password: VALID_PASSWORD.to_string(),
    }
    .submit(&mut api, &session)
    .await;
    assert_eq!(outcome.notice.unwrap().message, "Login successful");
    assert_eq!(outcome.navigate_to, Some(View::Dashboard));
    assert!(session.load().unwrap().is_some());
    assert!(api.token().is_some());
    assert_eq!(
        RegisterForm::on_enter(&session).unwrap(),
        Some(View::Dashboard)
    );

    // dashboard: one fetch on mount, none on a repeated mount
    let mut dashboard = Dashboard::new();
    let outcome = dashboard.mount(&api).await;
    assert!(outcome.notice.is_none());
    dashboard.mount(&api).await;
    assert_eq!(dashboard.fetch_count(), 1);
    assert!(dashboard.students().is_empty());

    // add a student: one more fetch, form reset
    dashboard.form = StudentForm {
        name: "Ann".to_string(),
        email: "ann@x.com".to_string(),
        course: "CS101".to_string(),
        status: StudentStatus::Inactive,
    };
    let outcome = dashboard.add_student(&api).await;
    assert_eq!(outcome.notice.unwrap().level, NoticeLevel::Success);
    assert_eq!(dashboard.fetch_count(), 2);
    assert_eq!(dashboard.students().len(), 1);
    assert_eq!(dashboard.students()[0].status, StudentStatus::Inactive);
    assert_eq!(dashboard.form, StudentForm::default());
    assert_eq!(dashboard.form.status, StudentStatus::Active);
    assert!(dashboard.render_table().contains("ann@x.com"));

    // a rejected create does not refetch
    dashboard.form = StudentForm {
        name: "Ann".to_string(),
        email: "ann@x.com".to_string(),
        course: "CS101".to_string(),
        status: StudentStatus::Active,
    };
    let outcome = dashboard.add_student(&api).await;
    assert_eq!(outcome.notice.unwrap().level, NoticeLevel::Error);
    assert_eq!(dashboard.fetch_count(), 2);

    // logout
    let outcome = dashboard.logout(&mut api, &session);
    assert_eq!(outcome.navigate_to, Some(View::Login));
    assert_eq!(session.load().unwrap(), None);
}

#[tokio::test]
async fn server_error_strings_are_shown_verbatim() {
    let app = spawn_app();
    let api = client_for(&app.address);

    register_form("taken@x.com").submit(&api).await;
    let outcome = register_form("taken@x.com").submit(&api).await;

    let notice = outcome.notice.unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "Email already registered");
    assert_eq!(outcome.navigate_to, None);
}

#[tokio::test]
async fn invalid_register_form_never_reaches_the_server() {
    let app = spawn_app();
    let api = client_for(&app.address);

    let outcome = RegisterForm {
        email: "nope".to_string(),
        ..register_form("")
    }
    .submit(&api)
    .await;
    assert_eq!(outcome.notice.unwrap().message, "Invalid email");

    let outcome = RegisterForm {
        confirm_password: "Different1!".to_string(),
        ..register_form("ok@x.com")
    }
    .submit(&api)
    .await;
    assert_eq!(outcome.notice.unwrap().message, "Passwords do not match");

    let err = api
        .login(&student_admin::schema::LoginRequest {
            email: Some("ok@x.com".to_string()),
            password: Some(VALID_PASSWORD.to_string()),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 401, .. }));
}

#[tokio::test]
async fn dashboard_without_session_goes_back_to_login() {
    let app = spawn_app();
    let api = client_for(&app.address);

    let mut dashboard = Dashboard::new();
    let outcome = dashboard.mount(&api).await;

    let notice = outcome.notice.unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "Unauthorized: No token provided");
    assert_eq!(outcome.navigate_to, Some(View::Login));
}

#[tokio::test]
async fn logout_all_revokes_the_stored_token() {
    let app = spawn_app();
    let token = app.login_as("revoke@x.com").await;
    let api = client_for(&app.address).with_token(token.clone());

    assert_eq!(api.me().await.unwrap().email, "revoke@x.com");
    api.logout_all().await.unwrap();

    let err = api.list_students().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Unauthorized: Invalid token");
}

#[tokio::test]
async fn revoked_session_while_adding_a_student_goes_back_to_login() {
    let app = spawn_app();
    let token = app.login_as("stale@x.com").await;
    let api = client_for(&app.address).with_token(token);

    let mut dashboard = Dashboard::new();
    assert!(dashboard.mount(&api).await.notice.is_none());

    api.logout_all().await.unwrap();

    dashboard.form = StudentForm {
        name: "Ann".to_string(),
        email: "ann@x.com".to_string(),
        course: "CS101".to_string(),
        status: StudentStatus::Active,
    };
    let outcome = dashboard.add_student(&api).await;

    let notice = outcome.notice.unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "Unauthorized: Invalid token");
    assert_eq!(outcome.navigate_to, Some(View::Login));
    assert_eq!(dashboard.fetch_count(), 1);
}
