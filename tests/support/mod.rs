//! Shared mock services for the integration tests

#![allow(dead_code)]

use browse::prelude::*;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Install a test subscriber once; later calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Service answering with fixed rows and total, recording every call
#[derive(Default)]
pub struct MockService {
    rows: Vec<Value>,
    total: u64,
    get_error: Option<String>,
    totals_error: Option<String>,
    queries: Mutex<Vec<NormalizedQuery>>,
    totals_calls: AtomicUsize,
}

impl MockService {
    pub fn new(rows: Vec<Value>, total: u64) -> Self {
        Self {
            rows,
            total,
            ..Default::default()
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![], 0)
    }

    pub fn failing_get(message: &str) -> Self {
        Self {
            get_error: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn failing_totals(rows: Vec<Value>, message: &str) -> Self {
        Self {
            rows,
            totals_error: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn queries(&self) -> Vec<NormalizedQuery> {
        self.queries.lock().expect("queries lock poisoned").clone()
    }

    pub fn totals_calls(&self) -> usize {
        self.totals_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrowseService for MockService {
    async fn get(&self, query: &NormalizedQuery) -> Result<Vec<Value>> {
        self.queries
            .lock()
            .map_err(|e| anyhow::anyhow!("Failed to acquire lock: {}", e))?
            .push(query.clone());

        match &self.get_error {
            Some(message) => Err(anyhow::anyhow!("{}", message)),
            None => Ok(self.rows.clone()),
        }
    }

    async fn get_totals(&self) -> Result<u64> {
        self.totals_calls.fetch_add(1, Ordering::SeqCst);

        match &self.totals_error {
            Some(message) => Err(anyhow::anyhow!("{}", message)),
            None => Ok(self.total),
        }
    }
}

/// Registry with a single entity backed by `service`
pub fn registry_with(entity: &str, service: Arc<MockService>) -> Arc<ServiceRegistry> {
    Arc::new(ServiceRegistry::new().with_service(entity, service))
}
