// src/models.rs
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The `data.json` document produced by the upstream pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataDocument {
    #[serde(default, deserialize_with = "lenient_text")]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub indexes: Vec<IndexRecord>,
}

impl DataDocument {
    /// First record whose code matches exactly.
    pub fn find(&self, code: &str) -> Option<&IndexRecord> {
        self.indexes.iter().find(|it| it.code == code)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub pe_ttm: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub pb: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub pe_percentile: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub pb_percentile: Option<f64>,
    #[serde(default, deserialize_with = "lenient_status")]
    pub valuation_status: ValuationStatus,
    #[serde(default, deserialize_with = "lenient_text")]
    pub trend_text: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub history: Vec<HistoryPoint>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryPoint {
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub pe_percentile: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub pb_percentile: Option<f64>,
}

/// Qualitative valuation tag. Anything the pipeline writes besides
/// `low`/`high` is presented as neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationStatus {
    Low,
    #[default]
    Neutral,
    High,
}

impl ValuationStatus {
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("low") => ValuationStatus::Low,
            Some("high") => ValuationStatus::High,
            _ => ValuationStatus::Neutral,
        }
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()))
}

/// Strings stay as-is, numbers keep their text, anything else is empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_status<'de, D>(deserializer: D) -> Result<ValuationStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(ValuationStatus::from_tag(value.as_ref().and_then(Value::as_str)))
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
