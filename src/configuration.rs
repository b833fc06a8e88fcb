use config::{ConfigError, Environment, File};

/// Signing secret used when nothing is configured. Fine for local runs only.
pub const INSECURE_DEFAULT_SECRET: &str = "secret";

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub password: PasswordSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    /// The single frontend origin allowed by CORS
    pub allowed_origin: String,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    pub port: u16,
    pub host: String,
    pub database_name: String,
    /// Full connection string; takes precedence over the individual fields
    pub url: Option<String>,
    /// Keep everything in process memory instead of Postgres
    pub in_memory: bool,
}

impl DatabaseSettings {
    /// Server address without a database, for creating databases.
    pub fn connection_string_without_db(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}",
            self.username, self.password, self.host, self.port
        )
    }

    pub fn connection_string(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                self.username, self.password, self.host, self.port, self.database_name
            ),
        }
    }
}

/// JWT authentication settings
#[derive(serde::Deserialize, Clone, Debug)]
pub struct JwtSettings {
    pub secret: String,
    pub access_token_expiry: i64, // seconds (e.g., 3600 for one hour)
    pub issuer: String,
}

impl JwtSettings {
    pub fn uses_insecure_default(&self) -> bool {
        self.secret == INSECURE_DEFAULT_SECRET
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct PasswordSettings {
    /// bcrypt work factor
    pub hash_cost: u32,
}

/// Layers, lowest precedence first: built-in defaults, an optional
/// `configuration.*` file, `APP_`-prefixed variables (`APP_JWT__SECRET`), and
/// finally the conventional `JWT_SECRET`, `DATABASE_URL`, `PORT` and
/// `FRONTEND_ORIGIN` variables.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .set_default("application.host", "127.0.0.1")?
        .set_default("application.port", 5000)?
        .set_default("application.allowed_origin", "http://localhost:5173")?
        .set_default("database.username", "postgres")?
        .set_default("database.password", "password")?
        .set_default("database.port", 5432)?
        .set_default("database.host", "localhost")?
        .set_default("database.database_name", "student_app")?
        .set_default("database.in_memory", false)?
        .set_default("jwt.secret", INSECURE_DEFAULT_SECRET)?
        .set_default("jwt.access_token_expiry", 3600)?
        .set_default("jwt.issuer", "student-admin")?
        .set_default("password.hash_cost", bcrypt::DEFAULT_COST as i64)?
        .add_source(File::with_name("configuration").required(false))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
        .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
        .set_override_option("application.port", std::env::var("PORT").ok())?
        .set_override_option(
            "application.allowed_origin",
            std::env::var("FRONTEND_ORIGIN").ok(),
        )?
        .build()?;
    settings.try_deserialize::<Settings>()
}
