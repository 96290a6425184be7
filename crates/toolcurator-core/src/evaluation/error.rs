//! Evaluation error types

use thiserror::Error;

use crate::types::EvaluationCriterion;

/// Failure reported by a security scanner
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Scanner unavailable: {0}")]
    Unavailable(String),

    #[error("Scanner request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid scanner response: {0}")]
    InvalidResponse(String),
}

pub type ScanResult<T> = Result<T, ScanError>;

/// Failure reported by a metrics source
#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("Metrics source unavailable: {0}")]
    Unavailable(String),

    #[error("Measurement failed for tool {tool_id}: {message}")]
    Measurement { tool_id: String, message: String },
}

pub type MetricsResult<T> = Result<T, MetricsError>;

/// A criterion could not be evaluated for a tool
#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error("{criterion} evaluation failed for tool '{tool_id}': {source}")]
    Scanner {
        tool_id: String,
        criterion: EvaluationCriterion,
        #[source]
        source: ScanError,
    },

    #[error("{criterion} evaluation failed for tool '{tool_id}': {source}")]
    Metrics {
        tool_id: String,
        criterion: EvaluationCriterion,
        #[source]
        source: MetricsError,
    },
}

impl EvaluationError {
    pub fn scanner(tool_id: impl Into<String>, source: ScanError) -> Self {
        Self::Scanner {
            tool_id: tool_id.into(),
            criterion: EvaluationCriterion::Security,
            source,
        }
    }

    pub fn metrics(tool_id: impl Into<String>, source: MetricsError) -> Self {
        Self::Metrics {
            tool_id: tool_id.into(),
            criterion: EvaluationCriterion::Performance,
            source,
        }
    }

    pub fn tool_id(&self) -> &str {
        match self {
            Self::Scanner { tool_id, .. } | Self::Metrics { tool_id, .. } => tool_id,
        }
    }

    pub fn criterion(&self) -> EvaluationCriterion {
        match self {
            Self::Scanner { criterion, .. } | Self::Metrics { criterion, .. } => *criterion,
        }
    }
}

pub type EvaluatorResult<T> = Result<T, EvaluationError>;
