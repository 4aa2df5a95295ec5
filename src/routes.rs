// src/routes.rs
use std::sync::Arc;
use warp::reject::Rejection;
use log::info;

use std::convert::Infallible;
use warp::{Filter, Reply};
use crate::config::AppConfig;
use crate::handlers::{
    build_hook::trigger_build, data::get_data_document, error::ApiError,
    pages::{get_detail_page, get_list_page, DetailQuery}, views::{get_detail_view, get_list_view},
};
use crate::services::build_hook::BuildHookTrigger;
use crate::services::data_source::DataSource;
use crate::services::html::PageAssets;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<DataSource>,
    pub assets: Arc<PageAssets>,
    pub trigger: Arc<BuildHookTrigger>,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Self {
        AppState {
            source: Arc::new(DataSource::from_location(&config.data_source)),
            assets: Arc::new(config.assets.clone()),
            trigger: Arc::new(BuildHookTrigger::new(config.build_hook_url.clone())),
        }
    }
}

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = warp::http::StatusCode::NOT_FOUND;
        message = "Not Found";
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status;
        message = api_error.message.as_str();
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        code = warp::http::StatusCode::BAD_REQUEST;
        message = "Invalid query string";
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        code = warp::http::StatusCode::METHOD_NOT_ALLOWED;
        message = "Method Not Allowed";
    } else {
        code = warp::http::StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error";
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes(state: AppState) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let source = state.source.clone();
    let source_filter = warp::any().map(move || source.clone());
    let assets = state.assets.clone();
    let assets_filter = warp::any().map(move || assets.clone());
    let trigger = state.trigger.clone();
    let trigger_filter = warp::any().map(move || trigger.clone());

    let detail_query = warp::query::<Vec<(String, String)>>().map(DetailQuery::from_pairs);

    let list_page_route = warp::path::end()
        .or(warp::path!("index.html"))
        .unify()
        .and(warp::get())
        .and(source_filter.clone())
        .and_then(get_list_page);

    let detail_page_route = warp::path!("detail.html")
        .and(warp::get())
        .and(detail_query.clone())
        .and(source_filter.clone())
        .and(assets_filter.clone())
        .and_then(get_detail_page);

    let data_route = warp::path!("data" / "data.json")
        .and(warp::get())
        .and(source_filter.clone())
        .and_then(get_data_document);

    let list_view_route = warp::path!("api" / "v1" / "indexes")
        .and(warp::get())
        .and(source_filter.clone())
        .and_then(get_list_view);

    let detail_view_route = warp::path!("api" / "v1" / "indexes" / "detail")
        .and(warp::get())
        .and(detail_query.clone())
        .and(source_filter.clone())
        .and(assets_filter.clone())
        .and_then(get_detail_view);

    let build_route = warp::path!("api" / "v1" / "schedule-build")
        .and(warp::get().or(warp::post()).unify())
        .and(trigger_filter)
        .and_then(trigger_build);

    info!("All routes configured successfully.");

    list_page_route
        .or(detail_page_route)
        .or(data_route)
        .or(list_view_route)
        .or(detail_view_route)
        .or(build_route)
        .recover(handle_rejection)
}
