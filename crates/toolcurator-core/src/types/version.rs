//! Tool version records

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle status of a tool version
///
/// Transitions are driven by callers; nothing in the curator moves a
/// version between states on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VersionStatus {
    Current,
    Deprecated,
    Beta,
    Alpha,
    Archived,
}

impl Default for VersionStatus {
    fn default() -> Self {
        VersionStatus::Current
    }
}

impl std::fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VersionStatus::Current => write!(f, "CURRENT"),
            VersionStatus::Deprecated => write!(f, "DEPRECATED"),
            VersionStatus::Beta => write!(f, "BETA"),
            VersionStatus::Alpha => write!(f, "ALPHA"),
            VersionStatus::Archived => write!(f, "ARCHIVED"),
        }
    }
}

/// One published version of a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolVersion {
    pub id: String,
    pub tool_id: String,
    /// `MAJOR.MINOR.PATCH[-suffix]`
    pub version_number: String,
    pub status: VersionStatus,
    #[serde(default)]
    pub release_notes: String,
    #[serde(default)]
    pub changes: Vec<String>,
    #[serde(default)]
    pub compatibility: BTreeMap<String, Value>,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

/// Which components differ between two versions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionDiff {
    pub major_changed: bool,
    pub minor_changed: bool,
    pub patch_changed: bool,
    pub suffix_changed: bool,
}

/// Result of comparing a source version against a target version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionCompatibility {
    pub source_version: String,
    pub target_version: String,
    pub is_compatible: bool,
    pub is_breaking_change: bool,
    pub details: VersionDiff,
    /// "compatible" or "breaking_change"
    pub recommendation: String,
}
