//! Bounded in-memory log of model requests

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logging::Logger;
use crate::{log_error, log_info};

pub const DEFAULT_REQUEST_LOG_CAPACITY: usize = 100;

/// One completed (or failed) request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestRecord {
    pub id: Uuid,
    pub model_id: String,
    pub provider: String,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    /// Characters in the completion, 0 on failure
    pub response_chars: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RequestRecord {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

pub struct RequestLogger {
    records: Mutex<VecDeque<RequestRecord>>,
    capacity: usize,
    logger: Arc<dyn Logger>,
}

impl RequestLogger {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self::with_capacity(DEFAULT_REQUEST_LOG_CAPACITY, logger)
    }

    /// A capacity of 0 is raised to 1
    pub fn with_capacity(capacity: usize, logger: Arc<dyn Logger>) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            logger,
        }
    }

    /// Store a record, evicting the oldest when full
    pub fn record(&self, record: RequestRecord) {
        match &record.error {
            None => log_info!(
                self.logger,
                "[ModelService] {} via {} completed in {}ms ({} chars)",
                record.model_id,
                record.provider,
                record.duration_ms,
                record.response_chars
            ),
            Some(e) => log_error!(
                self.logger,
                "[ModelService] {} via {} failed after {}ms: {}",
                record.model_id,
                record.provider,
                record.duration_ms,
                e
            ),
        }

        let mut records = self.records.lock();
        if records.len() == self.capacity {
            records.pop_front();
        }
        records.push_back(record);
    }

    /// Up to `limit` records, newest first
    pub fn recent(&self, limit: usize) -> Vec<RequestRecord> {
        self.records.lock().iter().rev().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
