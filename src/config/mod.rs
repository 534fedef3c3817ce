//! Endpoint declarations and their YAML loading

use crate::core::query::DEFAULT_PAGE_SIZE;
use anyhow::{Result, bail};
use indexmap::IndexSet;
use serde::Deserialize;
use std::collections::HashSet;

pub use crate::core::validation::filter::FilterDescriptor;

/// Declarations of one concrete browse endpoint
///
/// Built once per endpoint and shared across requests; never changed while
/// a request is in flight.
///
/// ```yaml
/// entity: product
/// sortable_fields: [id, name]
/// available_filters:
///   - id
///   - name: price
///     mapper: number
/// default_page_size: 30
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct BrowseConfig {
    /// Entity whose service answers the queries
    pub entity: String,

    /// Fields accepted by `sortBy`, in declaration order
    #[serde(default)]
    pub sortable_fields: IndexSet<String>,

    /// Filters accepted in the `filters` object
    #[serde(default)]
    pub available_filters: Vec<FilterDescriptor>,

    /// Page size used when `x-janis-page-size` is absent
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl BrowseConfig {
    /// Configuration with no sortable fields and no filters
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            sortable_fields: IndexSet::new(),
            available_filters: Vec::new(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_sortable_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sortable_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn with_filter(mut self, filter: impl Into<FilterDescriptor>) -> Self {
        self.available_filters.push(filter.into());
        self
    }

    pub fn with_default_page_size(mut self, size: u64) -> Self {
        self.default_page_size = size;
        self
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Reject declarations no request could satisfy consistently
    pub fn check(&self) -> Result<()> {
        if self.entity.trim().is_empty() {
            bail!("entity must not be empty");
        }
        if self.default_page_size == 0 {
            bail!("default_page_size must be at least 1");
        }

        let mut seen = HashSet::new();
        for filter in &self.available_filters {
            if !seen.insert(filter.name.as_str()) {
                bail!("filter '{}' is declared more than once", filter.name);
            }
        }

        Ok(())
    }
}
