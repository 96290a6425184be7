//! Semantic versions and tool version history
//!
//! Versions are `MAJOR.MINOR.PATCH[-suffix]`. Two versions are compatible
//! when their majors are equal; moving to a strictly higher major is a
//! breaking change. A major *decrease* is not breaking by this definition.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use regex::Regex;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::events::{topics, EventBus};
use crate::logging::{Logger, NoOpLogger};
use crate::types::{ToolVersion, VersionCompatibility, VersionDiff, VersionStatus};

static VERSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)\.(\d+)\.(\d+)(?:-([a-zA-Z0-9.-]+))?$").expect("version regex is valid")
});

/// Version assigned to the first version of a tool when none is given
pub const INITIAL_VERSION: &str = "1.0.0";

#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Invalid version format: '{0}' (expected MAJOR.MINOR.PATCH[-suffix])")]
    InvalidFormat(String),

    #[error("Version component out of range in '{0}' (each part must fit in u64)")]
    ComponentOutOfRange(String),

    #[error("Cannot bump {0}: component would overflow")]
    Overflow(String),

    #[error("Version {version} already exists for tool {tool_id}")]
    AlreadyExists { tool_id: String, version: String },

    #[error("Version {requested} is not newer than latest {latest} for tool {tool_id}")]
    NotNewer {
        tool_id: String,
        latest: String,
        requested: String,
    },

    #[error("Version {version} not found for tool {tool_id}")]
    NotFound { tool_id: String, version: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type VersionResult<T> = Result<T, VersionError>;

/// Parsed semantic version
///
/// Ordering: numeric `(major, minor, patch)` first; on a tie a version
/// without suffix is greater than one with a suffix, and two suffixes compare
/// as plain strings. Each numeric component is bounded by `u64::MAX`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub suffix: Option<String>,
}

impl SemanticVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            suffix: None,
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn parse(input: &str) -> VersionResult<Self> {
        let invalid = || VersionError::InvalidFormat(input.to_string());
        let caps = VERSION_RE.captures(input).ok_or_else(invalid)?;

        // digits-only groups; only overflow can fail here
        let number = |i: usize| -> VersionResult<u64> {
            caps.get(i)
                .ok_or_else(invalid)?
                .as_str()
                .parse::<u64>()
                .map_err(|_| VersionError::ComponentOutOfRange(input.to_string()))
        };

        Ok(Self {
            major: number(1)?,
            minor: number(2)?,
            patch: number(3)?,
            suffix: caps.get(4).map(|m| m.as_str().to_string()),
        })
    }

    /// Next version; suffix is always dropped
    pub fn bump(&self, is_major: bool, is_minor: bool) -> VersionResult<Self> {
        let overflow = || VersionError::Overflow(self.to_string());
        Ok(if is_major {
            Self::new(self.major.checked_add(1).ok_or_else(overflow)?, 0, 0)
        } else if is_minor {
            Self::new(self.major, self.minor.checked_add(1).ok_or_else(overflow)?, 0)
        } else {
            Self::new(self.major, self.minor, self.patch.checked_add(1).ok_or_else(overflow)?)
        })
    }

    pub fn diff(&self, other: &Self) -> VersionDiff {
        VersionDiff {
            major_changed: self.major != other.major,
            minor_changed: self.minor != other.minor,
            patch_changed: self.patch != other.patch,
            suffix_changed: self.suffix != other.suffix,
        }
    }
}

impl FromStr for SemanticVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(suffix) = &self.suffix {
            write!(f, "-{}", suffix)?;
        }
        Ok(())
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.suffix, &other.suffix) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare two version strings
pub fn compare(v1: &str, v2: &str) -> VersionResult<Ordering> {
    Ok(SemanticVersion::parse(v1)?.cmp(&SemanticVersion::parse(v2)?))
}

/// True iff the majors are equal
pub fn is_compatible(v1: &str, v2: &str) -> VersionResult<bool> {
    Ok(SemanticVersion::parse(v1)?.major == SemanticVersion::parse(v2)?.major)
}

/// True iff `v2` has a strictly higher major than `v1`
pub fn is_breaking_change(v1: &str, v2: &str) -> VersionResult<bool> {
    Ok(SemanticVersion::parse(v2)?.major > SemanticVersion::parse(v1)?.major)
}

pub fn generate_next_version(current: &str, is_major: bool, is_minor: bool) -> VersionResult<String> {
    Ok(SemanticVersion::parse(current)?.bump(is_major, is_minor)?.to_string())
}

pub fn check_version_compatibility(v1: &str, v2: &str) -> VersionResult<VersionCompatibility> {
    let source = SemanticVersion::parse(v1)?;
    let target = SemanticVersion::parse(v2)?;

    let is_compatible = source.major == target.major;
    let is_breaking_change = target.major > source.major;

    Ok(VersionCompatibility {
        source_version: source.to_string(),
        target_version: target.to_string(),
        is_compatible,
        is_breaking_change,
        details: source.diff(&target),
        recommendation: if is_compatible { "compatible" } else { "breaking_change" }.to_string(),
    })
}

/// Parameters for a new tool version
#[derive(Debug, Clone, Default)]
pub struct NewVersion {
    pub tool_id: String,
    /// Explicit version; generated from the latest when absent
    pub version_number: Option<String>,
    pub is_major: bool,
    pub is_minor: bool,
    pub status: VersionStatus,
    pub release_notes: String,
    pub changes: Vec<String>,
    pub created_by: String,
}

impl NewVersion {
    pub fn new(tool_id: impl Into<String>, created_by: impl Into<String>) -> Self {
        Self {
            tool_id: tool_id.into(),
            created_by: created_by.into(),
            ..Default::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version_number = Some(version.into());
        self
    }

    pub fn major(mut self) -> Self {
        self.is_major = true;
        self
    }

    pub fn minor(mut self) -> Self {
        self.is_minor = true;
        self
    }

    pub fn with_status(mut self, status: VersionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_release_notes(mut self, notes: impl Into<String>) -> Self {
        self.release_notes = notes.into();
        self
    }

    pub fn with_changes(mut self, changes: Vec<String>) -> Self {
        self.changes = changes;
        self
    }
}

/// In-memory version history per tool
///
/// Histories are kept in ascending version order; a new version must be
/// greater than the current latest.
pub struct VersionManager {
    versions: RwLock<HashMap<String, Vec<ToolVersion>>>,
    logger: Arc<dyn Logger>,
    events: Option<EventBus>,
}

impl Default for VersionManager {
    fn default() -> Self {
        Self::new(Arc::new(NoOpLogger))
    }
}

impl VersionManager {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            versions: RwLock::new(HashMap::new()),
            logger,
            events: None,
        }
    }

    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    pub fn create_version(&self, request: NewVersion) -> VersionResult<ToolVersion> {
        let mut versions = self.versions.write();
        let latest = versions.get(&request.tool_id).and_then(|h| h.last());

        let number = match (&request.version_number, latest) {
            (Some(explicit), _) => SemanticVersion::parse(explicit)?,
            (None, Some(latest)) => {
                SemanticVersion::parse(&latest.version_number)?.bump(request.is_major, request.is_minor)?
            }
            (None, None) => SemanticVersion::parse(INITIAL_VERSION)?,
        };

        let mut compatibility = BTreeMap::new();
        if let Some(latest) = latest {
            let previous = SemanticVersion::parse(&latest.version_number)?;
            if previous == number {
                return Err(VersionError::AlreadyExists {
                    tool_id: request.tool_id,
                    version: number.to_string(),
                });
            }
            if number < previous {
                return Err(VersionError::NotNewer {
                    tool_id: request.tool_id,
                    latest: previous.to_string(),
                    requested: number.to_string(),
                });
            }

            let check = check_version_compatibility(&latest.version_number, &number.to_string())?;
            compatibility.insert("previous_version".to_string(), json!(latest.version_number));
            compatibility.insert("is_compatible".to_string(), json!(check.is_compatible));
            compatibility.insert("is_breaking_change".to_string(), json!(check.is_breaking_change));
            compatibility.insert("details".to_string(), serde_json::to_value(check.details)?);
        }

        let version = ToolVersion {
            id: Uuid::new_v4().to_string(),
            tool_id: request.tool_id,
            version_number: number.to_string(),
            status: request.status,
            release_notes: request.release_notes,
            changes: request.changes,
            compatibility,
            created_at: Utc::now(),
            created_by: request.created_by,
        };
        versions
            .entry(version.tool_id.clone())
            .or_default()
            .push(version.clone());
        drop(versions);

        self.logger.info(&format!(
            "[VersionManager] Created {} {} ({})",
            version.tool_id, version.version_number, version.status
        ));
        if let Some(events) = &self.events {
            events.emit(
                topics::sources::VERSIONING,
                topics::VERSION_CREATED,
                json!({
                    "tool_id": version.tool_id,
                    "version": version.version_number,
                    "status": version.status,
                }),
            );
        }

        Ok(version)
    }

    /// Every version of a tool, oldest first
    pub fn list_versions(&self, tool_id: &str) -> Vec<ToolVersion> {
        self.versions.read().get(tool_id).cloned().unwrap_or_default()
    }

    pub fn get_version(&self, tool_id: &str, version: &str) -> Option<ToolVersion> {
        self.versions
            .read()
            .get(tool_id)
            .and_then(|h| h.iter().find(|v| v.version_number == version).cloned())
    }

    pub fn latest_version(&self, tool_id: &str) -> Option<ToolVersion> {
        self.versions.read().get(tool_id).and_then(|h| h.last().cloned())
    }

    pub fn set_status(&self, tool_id: &str, version: &str, status: VersionStatus) -> VersionResult<ToolVersion> {
        let updated = {
            let mut versions = self.versions.write();
            let entry = versions
                .get_mut(tool_id)
                .and_then(|h| h.iter_mut().find(|v| v.version_number == version))
                .ok_or_else(|| VersionError::NotFound {
                    tool_id: tool_id.to_string(),
                    version: version.to_string(),
                })?;
            entry.status = status;
            entry.clone()
        };

        self.logger.info(&format!(
            "[VersionManager] {} {} is now {}",
            tool_id, version, status
        ));
        if let Some(events) = &self.events {
            events.emit(
                topics::sources::VERSIONING,
                topics::VERSION_STATUS_CHANGED,
                json!({ "tool_id": tool_id, "version": version, "status": status }),
            );
        }

        Ok(updated)
    }

    /// Compatibility between two recorded versions of a tool
    pub fn compare_versions(&self, tool_id: &str, source: &str, target: &str) -> VersionResult<VersionCompatibility> {
        for version in [source, target] {
            if self.get_version(tool_id, version).is_none() {
                return Err(VersionError::NotFound {
                    tool_id: tool_id.to_string(),
                    version: version.to_string(),
                });
            }
        }
        check_version_compatibility(source, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [&str; 8] = [
        "0.1.0", "1.0.0", "1.0.0-alpha", "1.0.0-beta", "1.2.3", "1.10.0", "2.0.0-rc.1", "2.0.0",
    ];

    #[test]
    fn test_parse() {
        let v = SemanticVersion::parse("1.2.3-beta.1").unwrap();
        assert_eq!((v.major, v.minor, v.patch), (1, 2, 3));
        assert_eq!(v.suffix.as_deref(), Some("beta.1"));
        assert_eq!(v.to_string(), "1.2.3-beta.1");

        let v: SemanticVersion = "10.0.7".parse().unwrap();
        assert_eq!(v, SemanticVersion::new(10, 0, 7));
    }

    #[test]
    fn test_malformed_rejected() {
        for bad in ["", "1", "1.2", "v1.2.3", "1.2.3.4", "1.2.3-", "1.2.3-be ta", "a.b.c", " 1.2.3"] {
            assert!(
                matches!(SemanticVersion::parse(bad), Err(VersionError::InvalidFormat(_))),
                "{bad:?} should be rejected"
            );
        }
        assert!(is_compatible("1.0", "1.0.0").is_err());
    }

    #[test]
    fn test_compare_antisymmetric() {
        for a in SAMPLES {
            assert_eq!(compare(a, a).unwrap(), Ordering::Equal);
            for b in SAMPLES {
                assert_eq!(compare(a, b).unwrap(), compare(b, a).unwrap().reverse());
            }
        }
    }

    #[test]
    fn test_compare_prerelease_ordering() {
        assert_eq!(compare("1.0.0", "1.0.0-alpha").unwrap(), Ordering::Greater);
        assert_eq!(compare("1.0.0-alpha", "1.0.0-beta").unwrap(), Ordering::Less);
        assert_eq!(compare("1.10.0", "1.2.3").unwrap(), Ordering::Greater);
    }

    #[test]
    fn test_is_compatible() {
        assert!(is_compatible("1.2.0", "1.9.9").unwrap());
        assert!(!is_compatible("1.0.0", "2.0.0").unwrap());
        assert!(is_compatible("3.0.0-rc.1", "3.4.0").unwrap());
    }

    #[test]
    fn test_breaking_change_is_asymmetric() {
        assert!(is_breaking_change("1.0.0", "2.0.0").unwrap());
        assert!(!is_breaking_change("2.0.0", "1.0.0").unwrap());
        assert!(!is_breaking_change("1.0.0", "1.5.0").unwrap());
    }

    #[test]
    fn test_generate_next_version() {
        assert_eq!(generate_next_version("1.2.3", true, false).unwrap(), "2.0.0");
        assert_eq!(generate_next_version("1.2.3", false, true).unwrap(), "1.3.0");
        assert_eq!(generate_next_version("1.2.3", false, false).unwrap(), "1.2.4");
        assert_eq!(generate_next_version("1.2.3-beta", false, false).unwrap(), "1.2.4");
        assert_eq!(generate_next_version("1.2.3", true, true).unwrap(), "2.0.0");
    }

    #[test]
    fn test_bump_at_component_limit() {
        let max = u64::MAX;
        for (current, major, minor) in [
            (format!("{max}.0.0"), true, false),
            (format!("1.{max}.0"), false, true),
            (format!("1.0.{max}"), false, false),
        ] {
            assert!(matches!(
                generate_next_version(&current, major, minor),
                Err(VersionError::Overflow(_))
            ));
        }
        assert_eq!(
            generate_next_version(&format!("1.{max}.0"), true, false).unwrap(),
            "2.0.0"
        );

        let manager = VersionManager::default();
        manager
            .create_version(NewVersion::new("grep", "ci").with_version(format!("1.0.{max}")))
            .unwrap();
        let next = manager.create_version(NewVersion::new("grep", "ci"));
        assert!(matches!(next, Err(VersionError::Overflow(_))));
        assert_eq!(manager.list_versions("grep").len(), 1);
    }

    #[test]
    fn test_component_out_of_range() {
        let result = SemanticVersion::parse("99999999999999999999.0.0");
        assert!(matches!(result, Err(VersionError::ComponentOutOfRange(_))));
        assert!(SemanticVersion::parse(&format!("{}.0.0", u64::MAX)).is_ok());
    }

    #[test]
    fn test_check_version_compatibility() {
        let result = check_version_compatibility("1.2.3", "2.0.0-rc.1").unwrap();
        assert!(!result.is_compatible);
        assert!(result.is_breaking_change);
        assert_eq!(result.recommendation, "breaking_change");
        assert!(result.details.major_changed && result.details.suffix_changed);

        let result = check_version_compatibility("1.2.3", "1.2.4").unwrap();
        assert_eq!(result.recommendation, "compatible");
        assert!(result.details.patch_changed);
        assert!(!result.details.minor_changed);

        // major decrease: incompatible but not breaking
        let result = check_version_compatibility("2.0.0", "1.0.0").unwrap();
        assert!(!result.is_compatible);
        assert!(!result.is_breaking_change);
    }

    #[test]
    fn test_manager_generates_versions() {
        let manager = VersionManager::default();
        let first = manager.create_version(NewVersion::new("search", "alice")).unwrap();
        assert_eq!(first.version_number, "1.0.0");
        assert!(first.compatibility.is_empty());

        let patch = manager.create_version(NewVersion::new("search", "alice")).unwrap();
        assert_eq!(patch.version_number, "1.0.1");
        assert_eq!(patch.compatibility["is_compatible"], true);

        let major = manager
            .create_version(NewVersion::new("search", "bob").major().with_release_notes("new api"))
            .unwrap();
        assert_eq!(major.version_number, "2.0.0");
        assert_eq!(major.compatibility["is_breaking_change"], true);
        assert_eq!(major.compatibility["previous_version"], "1.0.1");

        let listed: Vec<_> = manager
            .list_versions("search")
            .into_iter()
            .map(|v| v.version_number)
            .collect();
        assert_eq!(listed, vec!["1.0.0", "1.0.1", "2.0.0"]);
        assert_eq!(manager.latest_version("search").unwrap().version_number, "2.0.0");
    }

    #[test]
    fn test_manager_explicit_versions() {
        let manager = VersionManager::default();
        manager
            .create_version(NewVersion::new("fetch", "ci").with_version("0.3.0-beta"))
            .unwrap();

        let dup = manager.create_version(NewVersion::new("fetch", "ci").with_version("0.3.0-beta"));
        assert!(matches!(dup, Err(VersionError::AlreadyExists { .. })));

        let older = manager.create_version(NewVersion::new("fetch", "ci").with_version("0.2.9"));
        assert!(matches!(older, Err(VersionError::NotNewer { .. })));

        let bad = manager.create_version(NewVersion::new("fetch", "ci").with_version("latest"));
        assert!(matches!(bad, Err(VersionError::InvalidFormat(_))));

        // release of the pre-release
        let release = manager
            .create_version(NewVersion::new("fetch", "ci").with_version("0.3.0"))
            .unwrap();
        assert_eq!(release.version_number, "0.3.0");
        assert_eq!(manager.list_versions("fetch").len(), 2);
    }

    #[test]
    fn test_rejected_version_leaves_no_history() {
        let manager = VersionManager::default();
        let bad = manager.create_version(NewVersion::new("ghost", "ci").with_version("bad"));
        assert!(matches!(bad, Err(VersionError::InvalidFormat(_))));
        assert!(manager.versions.read().is_empty());
        assert!(manager.latest_version("ghost").is_none());

        manager.create_version(NewVersion::new("ghost", "ci")).unwrap();
        assert_eq!(manager.versions.read().len(), 1);
    }

    #[test]
    fn test_manager_status_and_compare() {
        let manager = VersionManager::default();
        manager.create_version(NewVersion::new("t", "u")).unwrap();
        manager.create_version(NewVersion::new("t", "u").minor()).unwrap();

        let updated = manager.set_status("t", "1.0.0", VersionStatus::Deprecated).unwrap();
        assert_eq!(updated.status, VersionStatus::Deprecated);
        assert_eq!(manager.get_version("t", "1.0.0").unwrap().status, VersionStatus::Deprecated);
        assert!(manager.set_status("t", "9.9.9", VersionStatus::Archived).is_err());

        let compat = manager.compare_versions("t", "1.0.0", "1.1.0").unwrap();
        assert!(compat.is_compatible);
        assert!(manager.compare_versions("t", "1.0.0", "3.0.0").is_err());
    }

    #[tokio::test]
    async fn test_manager_publishes_events() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();
        let manager = VersionManager::default().with_event_bus(bus);

        manager.create_version(NewVersion::new("t", "u")).unwrap();
        let event = rx.recv().await.unwrap();
        assert_eq!(event.topic, topics::VERSION_CREATED);
        assert_eq!(event.payload["version"], "1.0.0");
    }
}
