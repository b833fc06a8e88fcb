/// Response hardening for the HTTP API.
/// - Security headers on every response (MIME sniffing, clickjacking, referrer leaks)
/// - CORS restricted to the single configured frontend origin

use actix_cors::Cors;
use actix_web::http::{header, Method};
use actix_web::middleware::DefaultHeaders;

/// Security headers added to every response
pub const SECURITY_HEADERS: [(&str, &str); 5] = [
    ("X-Content-Type-Options", "nosniff"),
    ("X-Frame-Options", "DENY"),
    ("Referrer-Policy", "no-referrer"),
    ("Cross-Origin-Resource-Policy", "same-site"),
    ("Content-Security-Policy", "default-src 'none'; frame-ancestors 'none'"),
];

pub fn security_headers() -> DefaultHeaders {
    SECURITY_HEADERS
        .iter()
        .fold(DefaultHeaders::new(), |headers, (name, value)| {
            headers.add((*name, *value))
        })
}

/// CORS for the frontend: one origin, credentials allowed, preflight answered.
pub fn cors(allowed_origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(allowed_origin)
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers(vec![header::HeaderName::from_static(
            crate::middleware::REQUEST_ID_HEADER,
        )])
        .supports_credentials()
        .max_age(3600)
}
