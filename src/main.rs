use sqlx::postgres::PgPoolOptions;
use std::net::TcpListener;
use student_admin::configuration::get_configuration;
use student_admin::startup::{run, AppContext};
use student_admin::store::Stores;
use student_admin::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_telemetry();

    tracing::info!("Starting application");

    let configuration = match get_configuration() {
        Ok(config) => {
            tracing::info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            tracing::error!("Failed to read configuration: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Configuration error",
            ));
        }
    };

    if configuration.jwt.uses_insecure_default() {
        tracing::warn!(
            "JWT_SECRET is not set; signing tokens with the insecure default secret. \
             Never run this in production"
        );
    }

    let stores = if configuration.database.in_memory {
        tracing::warn!("Using in-memory stores; data is lost on restart");
        Stores::in_memory()
    } else {
        tracing::info!("Attempting to connect to database");

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&configuration.database.connection_string())
            .await
            .map_err(|e| {
                tracing::error!("Failed to create connection pool: {}", e);
                std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "Database connection error",
                )
            })?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to run database migrations: {}", e);
                std::io::Error::new(std::io::ErrorKind::Other, "Database migration error")
            })?;

        tracing::info!("Database ready");
        Stores::postgres(pool)
    };

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address)?;
    tracing::info!(
        address = %address,
        allowed_origin = %configuration.application.allowed_origin,
        "Server listening"
    );

    let server = run(
        listener,
        AppContext {
            stores,
            application: configuration.application,
            jwt: configuration.jwt,
            password: configuration.password,
        },
    )?;

    server.await
}
