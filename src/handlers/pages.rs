// src/handlers/pages.rs
use log::info;
use std::sync::Arc;
use warp::reply::{html, with_header};
use warp::Rejection;

use crate::services::data_source::DataSource;
use crate::services::detail_view::build_detail_view;
use crate::services::html::{render_detail_page, render_list_page, PageAssets};
use crate::services::list_view::build_list_view;

#[derive(Debug, Default)]
pub struct DetailQuery {
    pub code: Option<String>,
}

impl DetailQuery {
    /// Repeated `code` parameters resolve to the first one.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        DetailQuery {
            code: pairs.into_iter().find(|(k, _)| k == "code").map(|(_, v)| v),
        }
    }
}

pub async fn get_list_page(source: Arc<DataSource>) -> Result<impl warp::Reply, Rejection> {
    info!("Handling request for index list page");
    let view = build_list_view(source.fetch().await);
    Ok(with_header(html(render_list_page(&view)), "cache-control", "no-store"))
}

pub async fn get_detail_page(
    query: DetailQuery,
    source: Arc<DataSource>,
    assets: Arc<PageAssets>,
) -> Result<impl warp::Reply, Rejection> {
    info!("Handling request for detail page, code={:?}", query.code);
    let view = build_detail_view(
        query.code.as_deref(),
        || source.fetch(),
        assets.widget_library_available(),
    )
    .await;
    Ok(with_header(
        html(render_detail_page(&view, &assets)),
        "cache-control",
        "no-store",
    ))
}
