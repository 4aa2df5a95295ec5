// src/services/detail_view.rs
use anyhow::Result;
use log::{error, info, warn};
use serde::Serialize;
use std::future::Future;

use crate::models::{DataDocument, IndexRecord};
use super::list_view::Placeholder;
use super::symbols::{resolve_symbol, SymbolTier};
use super::valuation::{format_number, format_percentile};

pub const GENERIC_TITLE: &str = "指数详情";
pub const MISSING_CODE_MESSAGE: &str = "缺少代码参数";
pub const NOT_FOUND_MESSAGE: &str = "未找到该指数的数据";
pub const PENDING_INSIGHT: &str = "趋势分析待更新。";
pub const UNSUPPORTED_WIDGET_MESSAGE: &str = "暂不支持该指数的TradingView图表。";
pub const WIDGET_CONTAINER_ID: &str = "tv-chart";

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub price: String,
    pub pe_ttm: String,
    pub pe_percentile: String,
    pub pb: String,
    pub pb_percentile: String,
}

impl Stats {
    pub fn from_record(it: &IndexRecord) -> Self {
        Stats {
            price: format_number(it.price),
            pe_ttm: format_number(it.pe_ttm),
            pe_percentile: format_percentile(it.pe_percentile),
            pb: format_number(it.pb),
            pb_percentile: format_percentile(it.pb_percentile),
        }
    }

    pub fn lines(&self) -> [String; 3] {
        [
            format!("点位：{}", self.price),
            format!("PE(TTM)：{}，历史分位：{}", self.pe_ttm, self.pe_percentile),
            format!("PB：{}，历史分位：{}", self.pb, self.pb_percentile),
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub label: &'static str,
    pub data: Vec<Option<f64>>,
    pub border_color: &'static str,
    pub tension: f64,
}

/// Percentile history line chart. The y axis is fixed to the [0,1] domain
/// and displayed as percentages.
#[derive(Debug, Clone, Serialize)]
pub struct ChartConfig {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartSeries>,
    pub y_min: f64,
    pub y_max: f64,
}

impl ChartConfig {
    pub fn from_record(it: &IndexRecord) -> Self {
        let labels = it.history.iter().map(|d| d.date.clone()).collect();
        let pe = it.history.iter().map(|d| d.pe_percentile).collect();
        let pb = it.history.iter().map(|d| d.pb_percentile).collect();
        ChartConfig {
            labels,
            datasets: vec![
                ChartSeries { label: "PE分位", data: pe, border_color: "#4cc9f0", tension: 0.2 },
                ChartSeries { label: "PB分位", data: pb, border_color: "#2ecc71", tension: 0.2 },
            ],
            y_min: 0.0,
            y_max: 1.0,
        }
    }
}

/// Options handed to the embedded TradingView widget.
#[derive(Debug, Clone, Serialize)]
pub struct WidgetConfig {
    pub symbol: &'static str,
    pub container_id: &'static str,
    pub autosize: bool,
    pub interval: &'static str,
    pub timezone: &'static str,
    pub theme: &'static str,
    pub style: &'static str,
    pub locale: &'static str,
    pub enable_publishing: bool,
    pub allow_symbol_change: bool,
    pub hide_side_toolbar: bool,
    pub withdateranges: bool,
    pub studies: [&'static str; 2],
}

impl WidgetConfig {
    pub fn for_symbol(symbol: &'static str) -> Self {
        WidgetConfig {
            symbol,
            container_id: WIDGET_CONTAINER_ID,
            autosize: true,
            interval: "D",
            timezone: "Etc/UTC",
            theme: "dark",
            style: "1",
            locale: "zh_CN",
            enable_publishing: false,
            allow_symbol_change: false,
            hide_side_toolbar: false,
            withdateranges: true,
            studies: ["RSI@tv-basicstudies", "MAExp@tv-basicstudies"],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WidgetSlot {
    /// Charting library not available; the widget area is left alone.
    Skipped,
    Unsupported { message: &'static str },
    Widget { tier: SymbolTier, config: WidgetConfig },
}

pub fn build_widget_slot(code: &str, library_available: bool) -> WidgetSlot {
    if !library_available {
        return WidgetSlot::Skipped;
    }
    match resolve_symbol(code) {
        Some(hit) => WidgetSlot::Widget {
            tier: hit.tier,
            config: WidgetConfig::for_symbol(hit.symbol),
        },
        None => {
            info!("No charting symbol for {}", code);
            WidgetSlot::Unsupported { message: UNSUPPORTED_WIDGET_MESSAGE }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexDetail {
    pub title: String,
    pub stats: Stats,
    pub chart: ChartConfig,
    pub insight: String,
    pub widget: WidgetSlot,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DetailView {
    MissingCode { title: &'static str, message: &'static str },
    LoadFailed { title: &'static str, message: &'static str },
    NotFound { title: &'static str, code: String, message: &'static str },
    Found(IndexDetail),
}

impl DetailView {
    pub fn title(&self) -> &str {
        match self {
            DetailView::Found(detail) => detail.title.as_str(),
            DetailView::MissingCode { title, .. }
            | DetailView::LoadFailed { title, .. }
            | DetailView::NotFound { title, .. } => *title,
        }
    }
}

pub fn render_detail(doc: &DataDocument, code: &str, library_available: bool) -> DetailView {
    let Some(it) = doc.find(code) else {
        warn!("No record for code {}", code);
        return DetailView::NotFound {
            title: GENERIC_TITLE,
            code: code.to_string(),
            message: NOT_FOUND_MESSAGE,
        };
    };

    DetailView::Found(IndexDetail {
        title: format!("{}（{}）", it.name, it.code),
        stats: Stats::from_record(it),
        chart: ChartConfig::from_record(it),
        insight: it
            .trend_text
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| PENDING_INSIGHT.to_string()),
        widget: build_widget_slot(code, library_available),
    })
}

/// Validates `code` before touching the data source, so a missing parameter
/// never triggers a fetch.
pub async fn build_detail_view<F, Fut>(
    code: Option<&str>,
    fetch: F,
    library_available: bool,
) -> DetailView
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<DataDocument>>,
{
    let code = match code {
        Some(code) if !code.is_empty() => code,
        _ => {
            return DetailView::MissingCode {
                title: GENERIC_TITLE,
                message: MISSING_CODE_MESSAGE,
            }
        }
    };

    match fetch().await {
        Ok(doc) => render_detail(&doc, code, library_available),
        Err(e) => {
            error!("Failed to load data document for {}: {:#}", code, e);
            DetailView::LoadFailed {
                title: GENERIC_TITLE,
                message: Placeholder::LoadFailed.message(),
            }
        }
    }
}
