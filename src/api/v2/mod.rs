mod model;

use std::collections::HashMap;
use std::io::Cursor;
use rocket::{Request, Route, State};
use rocket::http::{ContentType, Status};
use rocket::response::{self, Responder, Response};
use rocket::serde::json::Json;
use crate::api::v2::model::{build, ProviderSummary, Winds};
use crate::providers::SharedProvider;
use crate::query;

pub(crate) fn routes() -> Vec<Route> {
    routes![providers, winds, forecast_file]
}

#[get("/providers")]
fn providers(providers: &State<HashMap<String, SharedProvider>>) -> Json<Vec<ProviderSummary>> {
    Json(providers.values()
        .map(|provider| {
            let state = provider.state();
            ProviderSummary { id: state.id.clone(), name: state.name.clone() }
        })
        .collect())
}

#[get("/providers/<provider>/winds")]
async fn winds(providers: &State<HashMap<String, SharedProvider>>, provider: String) -> Result<Json<Winds>, Status> {
    let provider = providers.get(&provider).ok_or(Status::NotFound)?;
    Ok(Json(build(provider.as_ref()).await))
}

#[get("/providers/<provider>/winds/<valid_time_key>/<reference_run>")]
async fn forecast_file(
    providers: &State<HashMap<String, SharedProvider>>,
    provider: String,
    valid_time_key: String,
    reference_run: String,
) -> Result<CachedJsonFile, Status> {
    let provider = providers.get(&provider).ok_or(Status::NotFound)?;
    let filename = query::get_forecast_at(provider.state(), &valid_time_key, &reference_run)
        .await
        .ok_or(Status::NotFound)?;

    let path = provider.state().json_dir.join(&filename);
    let bytes = tokio::fs::read(&path).await.map_err(|_| Status::InternalServerError)?;

    Ok(CachedJsonFile(bytes))
}

pub(crate) struct CachedJsonFile(Vec<u8>);

impl<'r> Responder<'r, 'static> for CachedJsonFile {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        Response::build()
            .header(ContentType::JSON)
            .raw_header("Cache-Control", "public, max-age=10800, immutable")
            .sized_body(self.0.len(), Cursor::new(self.0))
            .ok()
    }
}
