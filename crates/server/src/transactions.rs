//! Transactions API endpoints

use api_types::transaction::{Transaction, TransactionListQuery, TransactionType as ApiType};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
};
use engine::{NewTransaction, ObjectId};
use serde_json::Value;

use crate::{ServerError, TRANSACTION_NOT_FOUND, server::ServerState};

fn map_type(kind: engine::TransactionType) -> ApiType {
    match kind {
        engine::TransactionType::Expense => ApiType::Expense,
        engine::TransactionType::Income => ApiType::Income,
    }
}

fn map_transaction(tx: engine::Transaction) -> Transaction {
    Transaction {
        id: tx.id.to_string(),
        kind: map_type(tx.kind),
        amount: tx.amount,
        description: tx.description,
    }
}

fn not_found() -> ServerError {
    ServerError::NotFound(TRANSACTION_NOT_FOUND.to_string())
}

fn validate_payload(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<NewTransaction, ServerError> {
    let Json(payload) = payload?;
    Ok(engine::validate_transaction(&payload)?)
}

pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<TransactionListQuery>, QueryRejection>,
) -> Result<Json<Vec<Transaction>>, ServerError> {
    // An unreadable query string just means "use the defaults".
    let query = query.map(|Query(query)| query).unwrap_or_default();
    let page = engine::paginate(query.page.as_deref(), query.limit.as_deref());

    let transactions = state.store.list_transactions(page).await?;

    Ok(Json(transactions.into_iter().map(map_transaction).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Transaction>, ServerError> {
    let id = ObjectId::parse_str(&id)?;

    let tx = state.store.transaction(&id).await?.ok_or_else(not_found)?;

    Ok(Json(map_transaction(tx)))
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<Transaction>), ServerError> {
    let new = validate_payload(payload)?;

    let tx = state.store.insert_transaction(&new).await?;
    tracing::debug!(id = %tx.id, "transaction created");

    let location = format!("/transactions/{}", tx.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(map_transaction(tx)),
    ))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    let id = ObjectId::parse_str(&id)?;

    if !state.store.delete_transaction(&id).await? {
        return Err(not_found());
    }
    tracing::debug!(%id, "transaction deleted");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Transaction>, ServerError> {
    // Both checks must pass; a malformed id is reported first.
    let id = ObjectId::parse_str(&id)?;
    let new = validate_payload(payload)?;

    let tx = state.store.upsert_transaction(&id, &new).await?;

    Ok(Json(map_transaction(tx)))
}
