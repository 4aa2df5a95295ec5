// src/handlers/data.rs
use log::{error, info};
use std::sync::Arc;
use warp::reply::with_header;
use warp::Rejection;

use super::error::ApiError;
use crate::services::data_source::DataSource;

/// Passes the document through untouched, never cacheable.
pub async fn get_data_document(source: Arc<DataSource>) -> Result<impl warp::Reply, Rejection> {
    info!("Serving data document from {}", source.describe());
    let raw = source.fetch_raw().await.map_err(|e| {
        error!("Failed to load data document: {:#}", e);
        warp::reject::custom(ApiError::internal("Failed to load data document"))
    })?;
    Ok(with_header(
        with_header(raw, "content-type", "application/json; charset=utf-8"),
        "cache-control",
        "no-store",
    ))
}
