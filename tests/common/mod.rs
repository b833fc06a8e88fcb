//! Shared harness: a real server on a random port, in-memory stores by default.
#![allow(dead_code)]

use serde_json::{json, Value};
use std::net::TcpListener;
use student_admin::configuration::{ApplicationSettings, JwtSettings, PasswordSettings};
use student_admin::startup::{run, AppContext};
use student_admin::store::Stores;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_ORIGIN: &str = "http://localhost:5173";
pub const VALID_PASSWORD: &str = "Passw0rd!";

pub struct TestApp {
    pub address: String,
    pub jwt: JwtSettings,
    pub stores: Stores,
    pub client: reqwest::Client,
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(Stores::in_memory())
}

pub fn spawn_app_with(stores: Stores) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let jwt = JwtSettings {
        secret: TEST_SECRET.to_string(),
        access_token_expiry: 3600,
        issuer: "student-admin".to_string(),
    };
    let context = AppContext {
        stores: stores.clone(),
        application: ApplicationSettings {
            host: "127.0.0.1".to_string(),
            port,
            allowed_origin: TEST_ORIGIN.to_string(),
        },
        jwt: jwt.clone(),
        // cheapest bcrypt cost keeps the tests fast
        password: PasswordSettings { hash_cost: 4 },
    };

    let server = run(listener, context).expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        jwt,
        stores,
        client: reqwest::Client::new(),
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn register(&self, email: &str) -> reqwest::Response {
        self.post_json(
            "/api/auth/register",
            &json!({ "name": "Test User", "email": email, "password": VALID_PASSWORD }),
        )
        .await
    }

    /// Registers `email` and returns a fresh session token for it.
    pub async fn login_as(&self, email: &str) -> String {
        let response = self.register(email).await;
        assert_eq!(201, response.status().as_u16());

        let response = self
            .post_json(
                "/api/auth/login",
                &json!({ "email": email, "password": VALID_PASSWORD }),
            )
            .await;
        assert_eq!(200, response.status().as_u16());

        let body: Value = response.json().await.unwrap();
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn get_with_token(&self, path: &str, token: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_with_token(
        &self,
        path: &str,
        token: &str,
        body: &Value,
    ) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}
