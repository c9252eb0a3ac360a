use rocket::serde::json::Json;
use rocket::{Build, Rocket};
use serde::Serialize;

pub mod v1;
pub mod v2;

pub fn build() -> Rocket<Build> {
    rocket::build()
        .mount("/winds/-", routes![healthz])
        .mount("/winds/api/v1", v1::routes())
        .mount("/winds/api/v2", v2::routes())
        .mount("/winds", v1::legacy_routes())
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

#[get("/healthz")]
fn healthz() -> Json<Health> {
    Json(Health { status: "Ok" })
}
