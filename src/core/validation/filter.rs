//! Filter declarations and the filter parameter spec

use super::ParamSpec;
use super::mappers::{MapperKind, ValueMapper};
use super::schema::{Rule, Schema};
use crate::core::query::QueryParts;
use anyhow::Result;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Body key holding the filters
pub const FILTERS_KEY: &str = "filters";

/// Declaration of one permitted filter
///
/// In YAML a descriptor is either a bare name or a mapping naming a
/// built-in mapper:
///
/// ```yaml
/// available_filters:
///   - id
///   - name: price
///     mapper: number
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "FilterDescriptorDef")]
pub struct FilterDescriptor {
    pub name: String,
    pub mapper: Option<ValueMapper>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FilterDescriptorDef {
    Name(String),
    Mapped {
        name: String,
        #[serde(default)]
        mapper: Option<MapperKind>,
    },
}

impl From<FilterDescriptorDef> for FilterDescriptor {
    fn from(def: FilterDescriptorDef) -> Self {
        match def {
            FilterDescriptorDef::Name(name) => FilterDescriptor::new(name),
            FilterDescriptorDef::Mapped { name, mapper } => FilterDescriptor {
                name,
                mapper: mapper.map(ValueMapper::builtin),
            },
        }
    }
}

impl FilterDescriptor {
    /// A filter passed through unchanged
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mapper: None,
        }
    }

    pub fn with_mapper(name: impl Into<String>, mapper: impl Into<ValueMapper>) -> Self {
        Self {
            name: name.into(),
            mapper: Some(mapper.into()),
        }
    }

    /// Apply the mapper, or return the value unchanged when there is none
    pub fn map_value(&self, value: Value) -> Result<Value> {
        match &self.mapper {
            Some(mapper) => mapper.apply(&self.name, value),
            None => Ok(value),
        }
    }
}

impl From<&str> for FilterDescriptor {
    fn from(name: &str) -> Self {
        FilterDescriptor::new(name)
    }
}

impl From<String> for FilterDescriptor {
    fn from(name: String) -> Self {
        FilterDescriptor::new(name)
    }
}

/// Validates the `filters` object of a request body
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    descriptors: Vec<FilterDescriptor>,
}

impl FilterSpec {
    pub fn new(descriptors: &[FilterDescriptor]) -> Self {
        Self {
            descriptors: descriptors.to_vec(),
        }
    }

    fn descriptor(&self, name: &str) -> Option<&FilterDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }
}

impl ParamSpec for FilterSpec {
    fn schema(&self) -> Schema {
        let names = self.descriptors.iter().map(|d| d.name.clone()).collect();
        Schema::closed().field(FILTERS_KEY, Rule::KeysIn(names))
    }

    /// Emits `filters` only when at least one filter was supplied
    fn params(&self, validated: &Map<String, Value>) -> Result<QueryParts> {
        let Some(Value::Object(raw)) = validated.get(FILTERS_KEY) else {
            return Ok(QueryParts::default());
        };
        if raw.is_empty() {
            return Ok(QueryParts::default());
        }

        let mut filters = IndexMap::with_capacity(raw.len());
        for (key, value) in raw {
            let mapped = match self.descriptor(key) {
                Some(descriptor) => descriptor.map_value(value.clone())?,
                None => value.clone(),
            };
            filters.insert(key.clone(), mapped);
        }

        Ok(QueryParts {
            filters: Some(filters),
            ..Default::default()
        })
    }
}
