use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;
use crate::models::{Client, DocumentType};
use crate::startup::AppState;

/// Query fields a requester must supply to read or update a record.
///
/// The POS search is fuzzy, so the endpoint only releases a record when the
/// caller already knows its email and document type.
#[derive(Debug, Deserialize)]
pub struct KnownClientQuery {
    pub email: String,
    pub document_type: DocumentType,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn matches(client: &Client, document: i64, query: &KnownClientQuery) -> bool {
    client.document == document
        && client.email == query.email
        && client.document_type == query.document_type
}

#[tracing::instrument(skip(state, query))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(document): Path<i64>,
    Query(query): Query<KnownClientQuery>,
) -> Result<Json<Client>, AppError> {
    let user = state.users.get_user(document).await?;

    match user {
        Some(user) if matches(&user, document, &query) => Ok(Json(user)),
        _ => Err(AppError::NotFound(anyhow::anyhow!("Client not found"))),
    }
}

#[tracing::instrument(skip(state, user))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(user): Json<Client>,
) -> Result<Json<MessageResponse>, AppError> {
    user.validate()?;

    state.users.upload_user(&user).await?;

    tracing::info!(document = user.document, "user created");
    Ok(Json(MessageResponse {
        message: "User created successfully".to_string(),
    }))
}

#[tracing::instrument(skip(state, query, user))]
pub async fn update_user(
    State(state): State<AppState>,
    Query(query): Query<KnownClientQuery>,
    Json(user): Json<Client>,
) -> Result<Json<MessageResponse>, AppError> {
    user.validate()?;

    let current = state.users.get_user(user.document).await?;
    match current {
        Some(current) if matches(&current, user.document, &query) => {}
        _ => return Err(AppError::NotFound(anyhow::anyhow!("Client not found"))),
    }

    state.users.update_user(&user).await?;

    tracing::info!(document = user.document, "user updated");
    Ok(Json(MessageResponse {
        message: "User updated successfully".to_string(),
    }))
}
