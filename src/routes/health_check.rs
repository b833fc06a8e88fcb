use actix_web::HttpResponse;

/// GET /health_check; liveness only, never touches the database.
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}
