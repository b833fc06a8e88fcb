use actix_web::dev::Server;
use actix_web::{
    error::JsonPayloadError, middleware::NormalizePath, web, App, HttpRequest, HttpServer,
};
use std::net::TcpListener;

use crate::configuration::{ApplicationSettings, JwtSettings, PasswordSettings};
use crate::error::{AppError, ValidationError};
use crate::middleware::{JwtMiddleware, LoggerMiddleware};
use crate::routes::{
    create_student, get_current_user, health_check, list_students, login, logout_all, register,
};
use crate::security::{cors, security_headers};
use crate::store::Stores;

/// Everything the HTTP layer needs besides the listener.
#[derive(Clone)]
pub struct AppContext {
    pub stores: Stores,
    pub application: ApplicationSettings,
    pub jwt: JwtSettings,
    pub password: PasswordSettings,
}

/// Bad JSON bodies become 400s in the same error shape as everything else.
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::Validation(ValidationError::MalformedBody(err.to_string())).into()
}

pub fn run(listener: TcpListener, context: AppContext) -> Result<Server, std::io::Error> {
    let users = web::Data::from(context.stores.users.clone());
    let students = web::Data::from(context.stores.students.clone());
    let jwt_config = web::Data::new(context.jwt.clone());
    let password_config = web::Data::new(context.password.clone());
    let allowed_origin = context.application.allowed_origin.clone();

    let server = HttpServer::new(move || {
        let gate = || JwtMiddleware::new(context.jwt.clone(), context.stores.users.clone());

        App::new()
            // Global middleware; the last one wrapped runs first
            .wrap(NormalizePath::trim())
            .wrap(security_headers())
            .wrap(LoggerMiddleware)
            .wrap(cors(&allowed_origin))

            // Shared state
            .app_data(users.clone())
            .app_data(students.clone())
            .app_data(jwt_config.clone())
            .app_data(password_config.clone())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))

            .route("/health_check", web::get().to(health_check))
            .service(
                web::scope("/api/auth")
                    // Public
                    .route("/register", web::post().to(register))
                    .route("/login", web::post().to(login))
                    // Protected
                    .service(
                        web::resource("/me")
                            .route(web::get().to(get_current_user))
                            .wrap(gate()),
                    )
                    .service(
                        web::resource("/logout-all")
                            .route(web::post().to(logout_all))
                            .wrap(gate()),
                    ),
            )
            .service(
                web::scope("/api/students")
                    .wrap(gate())
                    .route("", web::get().to(list_students))
                    .route("", web::post().to(create_student)),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
