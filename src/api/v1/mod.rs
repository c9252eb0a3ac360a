mod model;

use std::collections::HashMap;
use rocket::{Route, State};
use rocket::http::Status;
use rocket::serde::json::Json;
use crate::api::v1::model::Forecast;
use crate::providers::SharedProvider;
use crate::query;

pub(crate) fn routes() -> Vec<Route> {
    routes![get, get_by_stamp]
}

pub(crate) fn legacy_routes() -> Vec<Route> {
    routes![get_default, get_by_forecast, get_by_forecast_and_stamp]
}

fn default_provider(providers: &HashMap<String, SharedProvider>) -> Option<&SharedProvider> {
    providers.get("noaa").or_else(|| providers.values().next())
}

#[get("/winds?<provider>")]
async fn get(providers: &State<HashMap<String, SharedProvider>>, provider: String) -> Result<Json<Vec<Forecast>>, Status> {
    let provider = providers.get(&provider).ok_or(Status::NotFound)?;
    Ok(Json(model::build(provider.state()).await))
}

#[get("/winds/<forecast>/<stamp>")]
async fn get_by_stamp(
    providers: &State<HashMap<String, SharedProvider>>,
    forecast: String,
    stamp: String,
) -> Result<Vec<u8>, Status> {
    let provider = default_provider(providers).ok_or(Status::NotFound)?;
    let filename = query::get_forecast_at(provider.state(), &forecast, &stamp).await.ok_or(Status::NotFound)?;
    let path = provider.state().json_dir.join(&filename);
    tokio::fs::read(&path).await.map_err(|_| Status::InternalServerError)
}

#[get("/winds")]
async fn get_default(providers: &State<HashMap<String, SharedProvider>>) -> Result<Json<Vec<Forecast>>, Status> {
    let provider = default_provider(providers).ok_or(Status::NotFound)?;
    Ok(Json(model::build(provider.state()).await))
}

#[get("/winds/<forecast>")]
async fn get_by_forecast(providers: &State<HashMap<String, SharedProvider>>, forecast: String) -> Result<Vec<u8>, Status> {
    let provider = default_provider(providers).ok_or(Status::NotFound)?;
    let filename = query::get_forecast(provider.state(), &forecast).await.ok_or(Status::NotFound)?;
    let path = provider.state().json_dir.join(&filename);
    tokio::fs::read(&path).await.map_err(|_| Status::InternalServerError)
}

#[get("/winds/<forecast>/<stamp>")]
async fn get_by_forecast_and_stamp(
    providers: &State<HashMap<String, SharedProvider>>,
    forecast: String,
    stamp: String,
) -> Result<Vec<u8>, Status> {
    let provider = default_provider(providers).ok_or(Status::NotFound)?;
    let index: usize = stamp.parse().map_err(|_| Status::InternalServerError)?;
    let filename = {
        let status = provider.state().status.read().await;
        status.forecasts.get(&forecast).and_then(|files| files.get(index).cloned())
    }.ok_or(Status::NotFound)?;
    let path = provider.state().json_dir.join(&filename);
    tokio::fs::read(&path).await.map_err(|_| Status::InternalServerError)
}
