// src/services/valuation.rs
use serde::Serialize;
use crate::models::ValuationStatus;

/// Placeholder shown for any missing figure.
pub const MISSING: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeCategory {
    Ok,
    Warn,
    Bad,
}

impl BadgeCategory {
    pub fn css_class(self) -> &'static str {
        match self {
            BadgeCategory::Ok => "ok",
            BadgeCategory::Warn => "warn",
            BadgeCategory::Bad => "bad",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub category: BadgeCategory,
    pub label: &'static str,
}

impl Badge {
    pub fn for_status(status: ValuationStatus) -> Self {
        let (category, label) = match status {
            ValuationStatus::Low => (BadgeCategory::Ok, "低估"),
            ValuationStatus::High => (BadgeCategory::Bad, "高估"),
            ValuationStatus::Neutral => (BadgeCategory::Warn, "中性"),
        };
        Badge { category, label }
    }
}

/// Whole-number percentage with half rounding up, e.g. `0.425 -> 43%`.
pub fn format_percentile(p: Option<f64>) -> String {
    match p {
        Some(p) if p.is_finite() => format!("{}%", ((p * 100.0) + 0.5).floor() as i64),
        _ => MISSING.to_string(),
    }
}

/// Shortest decimal rendering: `3500` rather than `3500.0`.
pub fn format_number(n: Option<f64>) -> String {
    match n {
        Some(n) if n.is_finite() => format!("{}", n),
        _ => MISSING.to_string(),
    }
}
