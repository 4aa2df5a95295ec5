// src/handlers/build_hook.rs
use log::info;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reply::{json, with_status};
use warp::Rejection;

use crate::services::build_hook::BuildHookTrigger;

pub async fn trigger_build(trigger: Arc<BuildHookTrigger>) -> Result<impl warp::Reply, Rejection> {
    info!("Handling build trigger request");
    let outcome = trigger.trigger().await;
    let status = StatusCode::from_u16(outcome.http_status)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    Ok(with_status(json(&outcome.report), status))
}
