use actix_web::web;
use admin_shared::envelope::Envelope;

pub async fn health_check() -> web::Json<Envelope<()>> {
    web::Json(Envelope::success(()))
}
