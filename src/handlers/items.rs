use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use crate::models::item::StoredItem;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, no_content, success};

pub async fn create_item(
    State(state): State<AppState>,
    Json(item): Json<Value>,
) -> Result<Response, AppError> {
    let mut items = state.items.write().await;
    let id = items.insert(item.clone());

    Ok(created(StoredItem { id, item }, "Item created").into_response())
}

pub async fn list_items(State(state): State<AppState>) -> Result<Response, AppError> {
    let items = state.items.read().await;

    Ok(success(items.list(), "Items retrieved").into_response())
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<usize>,
    Json(item): Json<Value>,
) -> Result<Response, AppError> {
    let mut items = state.items.write().await;

    if !items.replace(id, item.clone()) {
        return Err(AppError::NotFound(format!(
            "Item with id '{id}' was not found"
        )));
    }

    Ok(success(StoredItem { id, item }, "Item updated").into_response())
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<usize>,
) -> Result<Response, AppError> {
    let mut items = state.items.write().await;

    if !items.remove(id) {
        return Err(AppError::NotFound(format!(
            "Item with id '{id}' was not found"
        )));
    }

    Ok(no_content().into_response())
}
