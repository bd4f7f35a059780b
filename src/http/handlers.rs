//! Route handlers.
//!
//! Handlers validate path and query parameters, then hand off to the movie
//! and people services. Validation failures never reach the executor.

use super::AppState;
use super::error::ApiError;
use crate::models::OutputMode;
use crate::services::parse_id;
use crate::storage::GraphExecutor;
use crate::{Error, Result};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

type Shared<E> = State<Arc<AppState<E>>>;

/// `?output=` query parameter.
#[derive(Debug, Default, Deserialize)]
pub struct OutputParams {
    output: Option<String>,
}

impl OutputParams {
    fn mode(&self) -> OutputMode {
        OutputMode::from_param(self.output.as_deref())
    }
}

/// Query parameters of the bacon route.
#[derive(Debug, Default, Deserialize)]
pub struct BaconParams {
    name1: Option<String>,
    name2: Option<String>,
    output: Option<String>,
}

fn json<T: Serialize>(value: &T) -> Response {
    Json(value).into_response()
}

fn required(value: Option<&str>, field: &str) -> Result<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidInput(format!("{field} is required")))
}

pub async fn health() -> Response {
    json(&serde_json::json!({"status": "ok"}))
}

pub async fn movies_all<E: GraphExecutor + 'static>(
    State(state): Shared<E>,
    Query(params): Query<OutputParams>,
) -> std::result::Result<Response, ApiError> {
    let rendered = state.movies.all(&*state.executor, params.mode()).await?;
    Ok(json(&rendered))
}

pub async fn movie_by_id<E: GraphExecutor + 'static>(
    State(state): Shared<E>,
    Path(id): Path<String>,
    Query(params): Query<OutputParams>,
) -> std::result::Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let rendered = state.movies.by_id(&*state.executor, id, params.mode()).await?;
    Ok(json(&rendered))
}

pub async fn movies_acted_in_by<E: GraphExecutor + 'static>(
    State(state): Shared<E>,
    Path(id): Path<String>,
    Query(params): Query<OutputParams>,
) -> std::result::Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let rendered = state
        .movies
        .by_actor(&*state.executor, id, params.mode())
        .await?;
    Ok(json(&rendered))
}

pub async fn movie_by_name<E: GraphExecutor + 'static>(
    State(state): Shared<E>,
    Path(name): Path<String>,
    Query(params): Query<OutputParams>,
) -> std::result::Result<Response, ApiError> {
    let rendered = state
        .movies
        .by_name(&*state.executor, &name, params.mode())
        .await?;
    Ok(json(&rendered))
}

pub async fn people_all<E: GraphExecutor + 'static>(
    State(state): Shared<E>,
    Query(params): Query<OutputParams>,
) -> std::result::Result<Response, ApiError> {
    let rendered = state.people.all(&*state.executor, params.mode()).await?;
    Ok(json(&rendered))
}

pub async fn person_by_id<E: GraphExecutor + 'static>(
    State(state): Shared<E>,
    Path(id): Path<String>,
    Query(params): Query<OutputParams>,
) -> std::result::Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let rendered = state.people.by_id(&*state.executor, id, params.mode()).await?;
    Ok(json(&rendered))
}

pub async fn people_acting_in<E: GraphExecutor + 'static>(
    State(state): Shared<E>,
    Path(id): Path<String>,
    Query(params): Query<OutputParams>,
) -> std::result::Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let rendered = state
        .people
        .by_movie(&*state.executor, id, params.mode())
        .await?;
    Ok(json(&rendered))
}

pub async fn person_by_name<E: GraphExecutor + 'static>(
    State(state): Shared<E>,
    Path(name): Path<String>,
    Query(params): Query<OutputParams>,
) -> std::result::Result<Response, ApiError> {
    let rendered = state
        .people
        .by_name(&*state.executor, &name, params.mode())
        .await?;
    Ok(json(&rendered))
}

pub async fn people_search<E: GraphExecutor + 'static>(
    State(state): Shared<E>,
    Path(name): Path<String>,
    Query(params): Query<OutputParams>,
) -> std::result::Result<Response, ApiError> {
    let rendered = state
        .people
        .search(&*state.executor, &name, params.mode())
        .await?;
    Ok(json(&rendered))
}

pub async fn people_bacon<E: GraphExecutor + 'static>(
    State(state): Shared<E>,
    Query(params): Query<BaconParams>,
) -> std::result::Result<Response, ApiError> {
    let name1 = required(params.name1.as_deref(), "name1")?;
    let name2 = required(params.name2.as_deref(), "name2")?;
    let output = OutputMode::from_param(params.output.as_deref());
    let rendered = state
        .people
        .bacon(&*state.executor, &name1, &name2, output)
        .await?;
    Ok(json(&rendered))
}
