use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Key sets are matched case-insensitively. A key outside these sets never
// produces a typed value, no matter how image-like its payload looks.
const IMAGE_KEYS: [&str; 5] = ["image", "image_url", "image_data", "thumbnail", "img"];
const CHART_KEYS: [&str; 4] = ["chart", "chart_data", "graph", "plot"];
const TABLE_KEYS: [&str; 4] = ["table", "table_data", "rows", "records"];

/// Reference to a piece of media carried inside a tool result.
///
/// The source string is kept verbatim; classification and validation are
/// derived on demand so a bad reference can still ride through the pipeline
/// and surface as a degraded component instead of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub source: String,
}

/// How an [`ImageRef`] addresses its bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    DataUri,
    Url,
    Base64,
    FilePath,
}

impl ImageSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSource::DataUri => "data_uri",
            ImageSource::Url => "url",
            ImageSource::Base64 => "base64",
            ImageSource::FilePath => "file_path",
        }
    }
}

impl ImageRef {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn kind(&self) -> ImageSource {
        let source = self.source.trim();
        if source.starts_with("data:") {
            ImageSource::DataUri
        } else if source.starts_with("http://") || source.starts_with("https://") {
            ImageSource::Url
        } else if looks_like_base64(source) {
            ImageSource::Base64
        } else {
            ImageSource::FilePath
        }
    }

    /// Cheap structural check. Never fetches or decodes anything.
    pub fn validate(&self) -> Result<(), String> {
        let source = self.source.trim();
        if source.is_empty() {
            return Err("empty media reference".to_string());
        }
        match self.kind() {
            ImageSource::DataUri => match source.split_once(',') {
                Some((_, payload)) if !payload.is_empty() => Ok(()),
                Some(_) => Err("data URI has an empty payload".to_string()),
                None => Err("data URI is missing its payload separator".to_string()),
            },
            ImageSource::Url => match source.split_once("://") {
                Some((_, rest)) if !rest.is_empty() => Ok(()),
                _ => Err("URL has no host".to_string()),
            },
            ImageSource::Base64 => {
                if source.len() % 4 == 0 {
                    Ok(())
                } else {
                    Err("base64 payload length is not a multiple of 4".to_string())
                }
            }
            // Any non-empty path is accepted; existence is the renderer's
            // problem, not ours.
            ImageSource::FilePath => Ok(()),
        }
    }
}

fn looks_like_base64(source: &str) -> bool {
    source.len() >= 16
        && source
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/' || b == b'=')
}

/// Chart payload recognized by key. The series value is kept verbatim so the
/// display projection loses nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub chart_type: Option<String>,
    pub series: Value,
}

impl ChartData {
    fn from_value(value: &Value) -> Self {
        let chart_type = value
            .get("type")
            .or_else(|| value.get("chart_type"))
            .and_then(Value::as_str)
            .map(str::to_string);
        Self {
            chart_type,
            series: value.clone(),
        }
    }
}

/// Tabular payload recognized by key.
///
/// `rows` is the original payload verbatim: either an array of rows or an
/// object wrapping a `rows` array. Column names are extracted once at
/// classification time.
#[derive(Debug, Clone, PartialEq)]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Value,
}

impl TableData {
    fn from_value(value: &Value) -> Self {
        let columns = column_names(value);
        Self {
            columns,
            rows: value.clone(),
        }
    }

    fn row_array(&self) -> Option<&Vec<Value>> {
        match &self.rows {
            Value::Array(rows) => Some(rows),
            Value::Object(map) => map.get("rows").and_then(Value::as_array),
            _ => None,
        }
    }

    pub fn row_count(&self) -> usize {
        self.row_array().map(Vec::len).unwrap_or(0)
    }
}

fn column_names(value: &Value) -> Vec<String> {
    if let Some(cols) = value.get("columns").and_then(Value::as_array) {
        return cols
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();
    }
    let first_row = match value {
        Value::Array(rows) => rows.first(),
        Value::Object(map) => map.get("rows").and_then(Value::as_array).and_then(|r| r.first()),
        _ => None,
    };
    match first_row {
        Some(Value::Object(row)) => row.keys().cloned().collect(),
        _ => Vec::new(),
    }
}

fn is_tabular(value: &Value) -> bool {
    match value {
        Value::Array(_) => true,
        Value::Object(map) => matches!(map.get("rows"), Some(Value::Array(_))),
        _ => false,
    }
}

/// One classified field of a canonical result's payload.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    Image(ImageRef),
    Chart(ChartData),
    Table(TableData),
    Text(String),
    Other(Value),
}

impl DataValue {
    /// Classify a raw field by key and value shape.
    ///
    /// Typed shapes need both a recognized key and a compatible value;
    /// anything else degrades to `Text` (for strings) or `Other`.
    pub fn classify(key: &str, value: &Value) -> Self {
        let key = key.to_ascii_lowercase();
        if IMAGE_KEYS.contains(&key.as_str())
            && let Some(source) = value.as_str()
        {
            return DataValue::Image(ImageRef::new(source));
        }
        if CHART_KEYS.contains(&key.as_str()) && (value.is_object() || value.is_array()) {
            return DataValue::Chart(ChartData::from_value(value));
        }
        if TABLE_KEYS.contains(&key.as_str()) && is_tabular(value) {
            return DataValue::Table(TableData::from_value(value));
        }
        match value {
            Value::String(text) => DataValue::Text(text.clone()),
            other => DataValue::Other(other.clone()),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            DataValue::Image(_) => "image",
            DataValue::Chart(_) => "chart",
            DataValue::Table(_) => "table",
            DataValue::Text(_) => "text",
            DataValue::Other(_) => "other",
        }
    }

    /// Project the field back to the JSON it was classified from.
    pub fn to_value(&self) -> Value {
        match self {
            DataValue::Image(image) => Value::String(image.source.clone()),
            DataValue::Chart(chart) => chart.series.clone(),
            DataValue::Table(table) => table.rows.clone(),
            DataValue::Text(text) => Value::String(text.clone()),
            DataValue::Other(value) => value.clone(),
        }
    }
}

/// Classified payload fields of a [`CanonicalResult`](super::CanonicalResult).
///
/// A `BTreeMap` keeps iteration (and therefore every serialized view)
/// deterministic regardless of the field order the tool emitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultData(BTreeMap<String, DataValue>);

impl ResultData {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn from_object(map: &serde_json::Map<String, Value>) -> Self {
        let mut data = Self::new();
        for (key, value) in map {
            data.insert(key.clone(), value);
        }
        data
    }

    /// Classify and store one field; a repeated key replaces the old value.
    pub fn insert(&mut self, key: impl Into<String>, value: &Value) {
        let key = key.into();
        let classified = DataValue::classify(&key, value);
        self.0.insert(key, classified);
    }

    pub fn get(&self, key: &str) -> Option<&DataValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &DataValue)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// First media reference in key order, if any.
    pub fn image(&self) -> Option<&ImageRef> {
        self.0.values().find_map(|value| match value {
            DataValue::Image(image) => Some(image),
            _ => None,
        })
    }

    pub fn chart(&self) -> Option<&ChartData> {
        self.0.values().find_map(|value| match value {
            DataValue::Chart(chart) => Some(chart),
            _ => None,
        })
    }

    pub fn table(&self) -> Option<&TableData> {
        self.0.values().find_map(|value| match value {
            DataValue::Table(table) => Some(table),
            _ => None,
        })
    }

    pub fn has_image(&self) -> bool {
        self.image().is_some()
    }

    pub fn has_chart(&self) -> bool {
        self.chart().is_some()
    }

    pub fn has_table(&self) -> bool {
        self.table().is_some()
    }

    /// Faithful projection back to a plain JSON object.
    pub fn to_value(&self) -> Value {
        let mut map = serde_json::Map::with_capacity(self.0.len());
        for (key, value) in &self.0 {
            map.insert(key.clone(), value.to_value());
        }
        Value::Object(map)
    }
}

impl Serialize for ResultData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, &value.to_value())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ResultData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let map = serde_json::Map::deserialize(deserializer)?;
        Ok(ResultData::from_object(&map))
    }
}
