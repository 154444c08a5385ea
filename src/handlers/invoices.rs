use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppError;
use crate::models::Invoice;
use crate::startup::AppState;

#[tracing::instrument(skip(state))]
pub async fn get_invoice(
    State(state): State<AppState>,
    Path((prefix, number)): Path<(String, i64)>,
) -> Result<Json<Invoice>, AppError> {
    let invoice = state.invoices.get_invoice(&prefix, number).await?;

    match invoice {
        Some(invoice) => Ok(Json(invoice)),
        None => Err(AppError::NotFound(anyhow::anyhow!("Invoice not found"))),
    }
}
