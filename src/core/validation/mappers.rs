//! Reusable filter value mappers
//!
//! A mapper coerces the raw value of one filter before it reaches the service.
//! Mappers receive the filter name and the value, and may fail.

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use std::sync::Arc;

type MapperFn = dyn Fn(&str, Value) -> Result<Value> + Send + Sync;

/// Built-in mappers that can be named from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapperKind {
    Number,
    Boolean,
    String,
    Trim,
    Uppercase,
    Lowercase,
}

impl MapperKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MapperKind::Number => "number",
            MapperKind::Boolean => "boolean",
            MapperKind::String => "string",
            MapperKind::Trim => "trim",
            MapperKind::Uppercase => "uppercase",
            MapperKind::Lowercase => "lowercase",
        }
    }
}

/// A shareable value mapper
#[derive(Clone)]
pub struct ValueMapper {
    kind: Option<MapperKind>,
    func: Arc<MapperFn>,
}

impl ValueMapper {
    /// Wrap an arbitrary mapping function
    pub fn custom<F>(func: F) -> Self
    where
        F: Fn(&str, Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            kind: None,
            func: Arc::new(func),
        }
    }

    /// The built-in mapper registered under `kind`
    pub fn builtin(kind: MapperKind) -> Self {
        let func: Arc<MapperFn> = match kind {
            MapperKind::Number => Arc::new(number()),
            MapperKind::Boolean => Arc::new(boolean()),
            MapperKind::String => Arc::new(string()),
            MapperKind::Trim => Arc::new(trim()),
            MapperKind::Uppercase => Arc::new(uppercase()),
            MapperKind::Lowercase => Arc::new(lowercase()),
        };

        Self {
            kind: Some(kind),
            func,
        }
    }

    /// `None` for custom mappers
    pub fn kind(&self) -> Option<MapperKind> {
        self.kind
    }

    pub fn apply(&self, field: &str, value: Value) -> Result<Value> {
        (self.func)(field, value)
    }
}

impl From<MapperKind> for ValueMapper {
    fn from(kind: MapperKind) -> Self {
        ValueMapper::builtin(kind)
    }
}

impl fmt::Debug for ValueMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Some(kind) => write!(f, "ValueMapper({})", kind.as_str()),
            None => f.write_str("ValueMapper(custom)"),
        }
    }
}

/// Mapper: convert numeric strings and booleans to numbers
///
/// Integral strings become integers (`"100"` → `100`), others floats.
pub fn number() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |field: &str, value: Value| match &value {
        Value::Number(_) => Ok(value),
        Value::Bool(b) => Ok(Value::from(u8::from(*b))),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(n) = s.parse::<i64>() {
                return Ok(Value::from(n));
            }
            s.parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| anyhow!("Cannot convert {} for filter '{}' to a number", value, field))
        }
        _ => Err(anyhow!(
            "Cannot convert {} for filter '{}' to a number",
            value,
            field
        )),
    }
}

/// Mapper: convert `"true"`/`"false"`/`"1"`/`"0"` and numbers to booleans
pub fn boolean() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |field: &str, value: Value| match &value {
        Value::Bool(_) => Ok(value),
        Value::Number(n) => Ok(Value::Bool(n.as_f64().is_some_and(|n| n != 0.0))),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Value::Bool(true)),
            "false" | "0" => Ok(Value::Bool(false)),
            _ => Err(anyhow!(
                "Cannot convert {} for filter '{}' to a boolean",
                value,
                field
            )),
        },
        _ => Err(anyhow!(
            "Cannot convert {} for filter '{}' to a boolean",
            value,
            field
        )),
    }
}

/// Mapper: render numbers and booleans as strings
pub fn string() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |field: &str, value: Value| match &value {
        Value::String(_) => Ok(value),
        Value::Number(n) => Ok(Value::String(n.to_string())),
        Value::Bool(b) => Ok(Value::String(b.to_string())),
        _ => Err(anyhow!(
            "Cannot convert {} for filter '{}' to a string",
            value,
            field
        )),
    }
}

/// Apply `f` to a string value, rejecting anything else with the filter name
fn map_text(
    field: &str,
    value: Value,
    action: &str,
    f: impl Fn(&str) -> String,
) -> Result<Value> {
    match &value {
        Value::String(s) => Ok(Value::String(f(s))),
        _ => Err(anyhow!(
            "Cannot {} {} for filter '{}': not a string",
            action,
            value,
            field
        )),
    }
}

/// Mapper: strip surrounding whitespace
pub fn trim() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |field: &str, value: Value| map_text(field, value, "trim", |s| s.trim().to_string())
}

/// Mapper: `"ab-1"` → `"AB-1"`
pub fn uppercase() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |field: &str, value: Value| map_text(field, value, "uppercase", str::to_uppercase)
}

/// Mapper: `"Ab-1"` → `"ab-1"`
pub fn lowercase() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |field: &str, value: Value| map_text(field, value, "lowercase", str::to_lowercase)
}
