//! Rule-based schema for request bodies and header bags
//!
//! A [`Schema`] is an ordered list of optional fields, each checked by a
//! [`Rule`]. Defaults are merged into the input before checking. A closed
//! schema rejects keys it does not declare; an open one passes them through.
//! Validation never stops at the first problem: every violation is returned.

use crate::core::error::FieldViolation;
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Check applied to a single field
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Any value is accepted as is
    Any,

    /// A string from a fixed set
    OneOf {
        allowed: Vec<String>,
        ignore_case: bool,
    },

    /// An integer ≥ 1, given as a number or a numeric string
    PositiveInteger,

    /// An object whose keys all belong to a fixed set; values are not checked
    KeysIn(Vec<String>),
}

/// Describe an enumeration the way violations report it
///
/// An empty set is described as `undefined`.
pub fn describe_allowed(allowed: &[String]) -> String {
    if allowed.is_empty() {
        return "undefined".to_string();
    }

    allowed
        .iter()
        .map(|a| format!("\"{}\"", a))
        .collect::<Vec<_>>()
        .join(" | ")
}

impl Rule {
    /// Check `value` found at `path`, returning its coerced form
    pub fn check(&self, path: &str, value: &Value) -> Result<Value, Vec<FieldViolation>> {
        match self {
            Rule::Any => Ok(value.clone()),

            Rule::OneOf {
                allowed,
                ignore_case,
            } => {
                let accepted = value.as_str().is_some_and(|s| {
                    allowed.iter().any(|a| {
                        if *ignore_case {
                            a.eq_ignore_ascii_case(s)
                        } else {
                            a == s
                        }
                    })
                });

                if accepted {
                    Ok(value.clone())
                } else {
                    Err(vec![FieldViolation::new(
                        path,
                        value.clone(),
                        describe_allowed(allowed),
                    )])
                }
            }

            Rule::PositiveInteger => match positive_integer(value) {
                Some(n) => Ok(Value::from(n)),
                None => Err(vec![FieldViolation::new(
                    path,
                    value.clone(),
                    "positive integer",
                )]),
            },

            Rule::KeysIn(allowed) => {
                let Some(object) = value.as_object() else {
                    return Err(vec![FieldViolation::new(path, value.clone(), "object")]);
                };

                let violations: Vec<FieldViolation> = object
                    .iter()
                    .filter(|(key, _)| !allowed.iter().any(|a| a == *key))
                    .map(|(key, v)| {
                        FieldViolation::new(
                            format!("{}.{}", path, key),
                            v.clone(),
                            describe_allowed(allowed),
                        )
                    })
                    .collect();

                if violations.is_empty() {
                    Ok(value.clone())
                } else {
                    Err(violations)
                }
            }
        }
    }
}

fn positive_integer(value: &Value) -> Option<u64> {
    let n = match value {
        Value::Number(n) => match n.as_u64() {
            Some(n) => n,
            None => {
                let f = n.as_f64()?;
                if f.fract() != 0.0 || f < 1.0 || f > u64::MAX as f64 {
                    return None;
                }
                f as u64
            }
        },
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };

    (n >= 1).then_some(n)
}

/// Whether keys outside the schema are rejected or passed through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaMode {
    Closed,
    Open,
}

/// Ordered set of optional fields and their rules
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    fields: IndexMap<String, Rule>,
    mode: SchemaMode,
}

impl Schema {
    /// Schema rejecting undeclared keys
    pub fn closed() -> Self {
        Self {
            fields: IndexMap::new(),
            mode: SchemaMode::Closed,
        }
    }

    /// Schema tolerating undeclared keys
    pub fn open() -> Self {
        Self {
            fields: IndexMap::new(),
            mode: SchemaMode::Open,
        }
    }

    pub fn field(mut self, name: impl Into<String>, rule: Rule) -> Self {
        self.fields.insert(name.into(), rule);
        self
    }

    pub fn mode(&self) -> SchemaMode {
        self.mode
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.fields.get(name)
    }

    /// Combine two schemas; the result is closed if either side is
    pub fn merge(mut self, other: Schema) -> Self {
        self.fields.extend(other.fields);
        if other.mode == SchemaMode::Closed {
            self.mode = SchemaMode::Closed;
        }
        self
    }

    /// Validate `input` after filling in `defaults` for missing keys
    ///
    /// `null` values count as absent and are dropped from the output.
    pub fn validate(
        &self,
        input: &Map<String, Value>,
        defaults: Map<String, Value>,
    ) -> Result<Map<String, Value>, Vec<FieldViolation>> {
        let mut merged = input.clone();
        for (key, value) in defaults {
            let slot = merged.entry(key).or_insert(Value::Null);
            if slot.is_null() {
                *slot = value;
            }
        }

        let mut output = Map::new();
        let mut violations = Vec::new();

        for (name, rule) in &self.fields {
            match merged.get(name) {
                None | Some(Value::Null) => {}
                Some(value) => match rule.check(name, value) {
                    Ok(coerced) => {
                        output.insert(name.clone(), coerced);
                    }
                    Err(errors) => violations.extend(errors),
                },
            }
        }

        for (key, value) in &merged {
            if self.fields.contains_key(key) || value.is_null() {
                continue;
            }
            match self.mode {
                SchemaMode::Closed => {
                    violations.push(FieldViolation::new(key, value.clone(), "undefined"))
                }
                SchemaMode::Open => {
                    output.insert(key.clone(), value.clone());
                }
            }
        }

        if violations.is_empty() {
            Ok(output)
        } else {
            Err(violations)
        }
    }
}
