// src/handlers/views.rs
use log::info;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use super::pages::DetailQuery;
use crate::services::data_source::DataSource;
use crate::services::detail_view::build_detail_view;
use crate::services::html::PageAssets;
use crate::services::list_view::build_list_view;

pub async fn get_list_view(source: Arc<DataSource>) -> Result<Json, Rejection> {
    info!("Handling request for list view model");
    let view = build_list_view(source.fetch().await);
    Ok(warp::reply::json(&view))
}

pub async fn get_detail_view(
    query: DetailQuery,
    source: Arc<DataSource>,
    assets: Arc<PageAssets>,
) -> Result<Json, Rejection> {
    info!("Handling request for detail view model, code={:?}", query.code);
    let view = build_detail_view(
        query.code.as_deref(),
        || source.fetch(),
        assets.widget_library_available(),
    )
    .await;
    Ok(warp::reply::json(&view))
}
