use actix_web::{web, HttpResponse};
use serde::Serialize;

#[derive(Serialize)]
struct StatusResponse {
    message: String,
}

async fn status() -> HttpResponse {
    HttpResponse::Ok().json(StatusResponse {
        message: "Health companion is up and running!".into(),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(status));
}
