// src/services/list_view.rs
use anyhow::Result;
use log::error;
use serde::Serialize;
use url::form_urlencoded::byte_serialize;

use crate::models::{DataDocument, IndexRecord};
use super::valuation::{format_number, format_percentile, Badge};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    NoData,
    LoadFailed,
}

impl Placeholder {
    pub fn message(self) -> &'static str {
        match self {
            Placeholder::NoData => "暂无数据",
            Placeholder::LoadFailed => "数据加载失败，请稍后重试。",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexCard {
    pub name: String,
    pub code: String,
    pub price: String,
    pub badge: Badge,
    pub pe_percentile: String,
    pub pb_percentile: String,
    pub href: String,
}

impl IndexCard {
    pub fn from_record(it: &IndexRecord) -> Self {
        IndexCard {
            name: it.name.clone(),
            code: it.code.clone(),
            price: format_number(it.price),
            badge: Badge::for_status(it.valuation_status),
            pe_percentile: format_percentile(it.pe_percentile),
            pb_percentile: format_percentile(it.pb_percentile),
            href: detail_href(&it.code),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ListView {
    Cards {
        updated_at: Option<String>,
        cards: Vec<IndexCard>,
    },
    Placeholder {
        kind: Placeholder,
        message: &'static str,
    },
}

impl ListView {
    fn placeholder(kind: Placeholder) -> Self {
        ListView::Placeholder { kind, message: kind.message() }
    }
}

pub fn detail_href(code: &str) -> String {
    format!("/detail.html?code={}", byte_serialize(code.as_bytes()).collect::<String>())
}

/// Cards in document order; a single placeholder when there is nothing to
/// show or the document could not be loaded.
pub fn build_list_view(fetched: Result<DataDocument>) -> ListView {
    let doc = match fetched {
        Ok(doc) => doc,
        Err(e) => {
            error!("Failed to load data document: {:#}", e);
            return ListView::placeholder(Placeholder::LoadFailed);
        }
    };

    if doc.indexes.is_empty() {
        return ListView::placeholder(Placeholder::NoData);
    }

    ListView::Cards {
        updated_at: doc.updated_at.clone(),
        cards: doc.indexes.iter().map(IndexCard::from_record).collect(),
    }
}
