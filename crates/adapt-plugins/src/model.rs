//! The canonical, format-agnostic document that sits between import and
//! export.
//!
//! Importers lift the handful of fields every exporter needs (identifier,
//! description, quantity) into typed fields and keep the complete source
//! value alongside, so exporters that can carry arbitrary attributes lose
//! nothing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A measured amount with an optional unit code (e.g. `"KGM"`, `"BG"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Quantity {
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_code: Option<String>,
}

/// One shipped item instance in canonical form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CanonicalDocument {
    /// Identifier from the payload, or a generated fallback.
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,
    /// The complete payload object this document was built from.
    pub source: Value,
}

impl CanonicalDocument {
    /// Build a document from one JSON object.
    ///
    /// Returns `None` when `value` is not an object. `fallback_id` is used
    /// when the object carries neither `id` nor `identifier`.
    pub fn from_value(value: Value, fallback_id: impl Into<String>) -> Option<Self> {
        let object = value.as_object()?;
        let id = identifier(object).unwrap_or_else(|| fallback_id.into());
        let description = description(object);
        let quantity = object.get("quantity").and_then(quantity);
        Some(Self {
            id,
            description,
            quantity,
            source: value,
        })
    }

    /// Human-readable label: the description when present, else the id.
    pub fn designator(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.id)
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn identifier(object: &Map<String, Value>) -> Option<String> {
    if let Some(id) = object.get("id").and_then(scalar_text) {
        return Some(id);
    }
    match object.get("identifier")? {
        Value::Object(inner) => inner.get("content").and_then(scalar_text),
        other => scalar_text(other),
    }
}

fn description(object: &Map<String, Value>) -> Option<String> {
    object
        .get("description")
        .and_then(Value::as_str)
        .or_else(|| {
            object
                .get("item")
                .and_then(|item| item.get("description"))
                .and_then(Value::as_str)
        })
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn quantity(value: &Value) -> Option<Quantity> {
    match value {
        Value::Number(n) => Some(Quantity {
            value: n.as_f64()?,
            unit_code: None,
        }),
        Value::Object(inner) => Some(Quantity {
            value: inner.get("content")?.as_f64()?,
            unit_code: inner
                .get("unitCode")
                .and_then(Value::as_str)
                .map(str::to_string),
        }),
        _ => None,
    }
}
