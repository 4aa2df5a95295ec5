// src/services/html.rs
//! HTML pages for the list and detail views. Everything page-specific comes
//! from the view models; this module only lays them out.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::detail_view::{DetailView, IndexDetail, WidgetSlot, WIDGET_CONTAINER_ID};
use super::list_view::{IndexCard, ListView};

pub const DEFAULT_CHARTJS_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js";
pub const DEFAULT_TRADINGVIEW_SCRIPT_URL: &str = "https://s3.tradingview.com/tv.js";

/// Third-party scripts the pages pull in. No TradingView script means the
/// widget library is unavailable.
#[derive(Debug, Clone)]
pub struct PageAssets {
    pub chartjs_script_url: String,
    pub tradingview_script_url: Option<String>,
}

impl Default for PageAssets {
    fn default() -> Self {
        PageAssets {
            chartjs_script_url: DEFAULT_CHARTJS_SCRIPT_URL.to_string(),
            tradingview_script_url: Some(DEFAULT_TRADINGVIEW_SCRIPT_URL.to_string()),
        }
    }
}

impl PageAssets {
    pub fn widget_library_available(&self) -> bool {
        self.tradingview_script_url.is_some()
    }
}

const STYLE: &str = r#"
body { font-family: system-ui, -apple-system, 'Segoe UI', sans-serif; background: #0d1117; color: #e6edf3; margin: 0; padding: 1.5rem; }
a { color: inherit; text-decoration: none; }
.card { display: block; background: #161b22; border-radius: 8px; padding: 1rem; margin-bottom: 1rem; }
.muted { color: #9fb0c0; }
.badge { padding: 2px 8px; border-radius: 4px; font-size: 0.85rem; }
.badge.ok { background: #1f6f43; }
.badge.warn { background: #8a6d1f; }
.badge.bad { background: #8b2c2c; }
#tv-chart { height: 480px; }
"#;

const CHART_SCRIPT: &str = r#"
(function () {
  if (!window.Chart) return;
  var cfg = __CHART__;
  var ctx = document.getElementById('valuationChart').getContext('2d');
  new Chart(ctx, {
    type: 'line',
    data: {
      labels: cfg.labels,
      datasets: cfg.datasets.map(function (s) {
        return { label: s.label, data: s.data, borderColor: s.border_color, tension: s.tension };
      })
    },
    options: {
      plugins: { legend: { labels: { color: '#e6edf3' } } },
      scales: {
        x: { ticks: { color: '#9fb0c0' } },
        y: { min: cfg.y_min, max: cfg.y_max, ticks: { color: '#9fb0c0', callback: function (v) { return Math.round(v * 100) + '%'; } } }
      }
    }
  });
})();
"#;

const WIDGET_SCRIPT: &str = r#"
if (window.TradingView) { new TradingView.widget(__WIDGET__); }
"#;

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// JSON safe to inline inside a `<script>` element.
fn script_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}

fn page(title: &str, head_scripts: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
    {head_scripts}
</head>
<body>
{body}
</body>
</html>"#,
        title = html_escape(title),
        css = STYLE,
        head_scripts = head_scripts,
        body = body,
    )
}

fn format_updated_at(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc).format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn render_card(card: &IndexCard) -> String {
    format!(
        r#"<a class="card index-card" href="{href}">
  <h3>{name}</h3>
  <div class="muted">代码：{code}</div>
  <p>点位：<strong>{price}</strong></p>
  <p>估值：<span class="badge {cls}">{label}</span> <span class="muted">(PE分位 {pe} / PB分位 {pb})</span></p>
</a>"#,
        href = html_escape(&card.href),
        name = html_escape(&card.name),
        code = html_escape(&card.code),
        price = html_escape(&card.price),
        cls = card.badge.category.css_class(),
        label = card.badge.label,
        pe = card.pe_percentile,
        pb = card.pb_percentile,
    )
}

pub fn render_list_page(view: &ListView) -> String {
    let (meta, cards) = match view {
        ListView::Cards { updated_at, cards } => (
            updated_at
                .as_deref()
                .map(|t| format!(r#"<p class="muted">更新时间：{}</p>"#, html_escape(&format_updated_at(t))))
                .unwrap_or_default(),
            cards.iter().map(render_card).collect::<Vec<_>>().join("\n"),
        ),
        ListView::Placeholder { message, .. } => {
            (String::new(), format!(r#"<div class="card">{}</div>"#, message))
        }
    };

    let body = format!(
        r#"<h1>指数估值</h1>
{meta}
<div id="index-list">
{cards}
</div>"#
    );
    page("指数估值", "", &body)
}

fn render_found(detail: &IndexDetail) -> String {
    let stats = detail
        .stats
        .lines()
        .iter()
        .map(|line| format!("<p>{}</p>", html_escape(line)))
        .collect::<Vec<_>>()
        .join("\n");

    let widget = match &detail.widget {
        WidgetSlot::Skipped => format!(r#"<div id="{}"></div>"#, WIDGET_CONTAINER_ID),
        WidgetSlot::Unsupported { message } => format!(
            r#"<div id="{}"><p class="muted">{}</p></div>"#,
            WIDGET_CONTAINER_ID, message
        ),
        WidgetSlot::Widget { config, .. } => format!(
            r#"<div id="{}"></div>
<script>{}</script>"#,
            WIDGET_CONTAINER_ID,
            WIDGET_SCRIPT.replace("__WIDGET__", &script_json(config))
        ),
    };

    format!(
        r#"<div id="current-stats" class="card">
{stats}
</div>
<div class="card"><canvas id="valuationChart"></canvas></div>
<script>{chart}</script>
<div id="trend-insights" class="card"><p>{insight}</p></div>
<div class="card">{widget}</div>"#,
        stats = stats,
        chart = CHART_SCRIPT.replace("__CHART__", &script_json(&detail.chart)),
        insight = html_escape(&detail.insight),
        widget = widget,
    )
}

pub fn render_detail_page(view: &DetailView, assets: &PageAssets) -> String {
    let content = match view {
        DetailView::Found(detail) => render_found(detail),
        DetailView::MissingCode { message, .. }
        | DetailView::LoadFailed { message, .. }
        | DetailView::NotFound { message, .. } => {
            format!(r#"<div id="current-stats" class="card">{}</div>"#, message)
        }
    };

    let mut head_scripts = format!(r#"<script src="{}"></script>"#, html_escape(&assets.chartjs_script_url));
    if let (DetailView::Found(_), Some(tv)) = (view, assets.tradingview_script_url.as_deref()) {
        head_scripts.push_str(&format!(r#"<script src="{}"></script>"#, html_escape(tv)));
    }

    let body = format!(
        r#"<p><a href="/" class="muted">← 返回列表</a></p>
<h1 id="index-title">{title}</h1>
{content}"#,
        title = html_escape(view.title()),
        content = content,
    );
    page(view.title(), &head_scripts, &body)
}
