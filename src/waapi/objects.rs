//! Wwise Object Model
//!
//! Minimal projections of the Wwise authoring data consumed by the assigner.
//! Only the fields this tool reads are modeled; everything else stays on the
//! authoring side.
//!
//! # Identity
//!
//! Wwise objects are identified by a GUID string. Two fetches of the "same"
//! object are assumed to share an id even if display fields changed between
//! fetches, so `WwiseObject` equality and hashing derive solely from `id`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Opaque, stable identifier of a Wwise object (a GUID string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(String);

impl ObjectId {
    /// Create a new object id from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ObjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ObjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Object type as reported by the authoring tool.
///
/// Types the assigner does not care about deserialize to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectKind {
    StateGroup,
    SwitchContainer,
    SwitchGroup,
    Switch,
    #[default]
    Unknown,
}

impl ObjectKind {
    /// Parse a WAAPI `type` string; anything unrecognized is `Unknown`.
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "StateGroup" => Self::StateGroup,
            "SwitchContainer" => Self::SwitchContainer,
            "SwitchGroup" => Self::SwitchGroup,
            "Switch" => Self::Switch,
            _ => Self::Unknown,
        }
    }

    /// The WAAPI `type` string for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StateGroup => "StateGroup",
            Self::SwitchContainer => "SwitchContainer",
            Self::SwitchGroup => "SwitchGroup",
            Self::Switch => "Switch",
            Self::Unknown => "Unknown",
        }
    }
}

impl Serialize for ObjectKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ObjectKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_type_name(&name))
    }
}

/// A Wwise object as returned by WAQL queries.
///
/// Equality and hashing use `id` only; name, kind and path are display
/// payload and may go stale without affecting identity.
#[derive(Debug, Clone, Deserialize)]
pub struct WwiseObject {
    pub id: ObjectId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ObjectKind,
    #[serde(default)]
    pub path: String,
}

impl WwiseObject {
    /// Construct an object by hand (queries normally deserialize these).
    pub fn new(id: impl Into<ObjectId>, name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            path: String::new(),
        }
    }
}

impl PartialEq for WwiseObject {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for WwiseObject {}

impl Hash for WwiseObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for WwiseObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// One recorded child-to-switch assignment of a switch container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentEntry {
    pub child: ObjectId,
    pub state_or_switch: ObjectId,
}

impl AssignmentEntry {
    /// Create an assignment entry between a child and a switch.
    pub fn new(child: impl Into<ObjectId>, state_or_switch: impl Into<ObjectId>) -> Self {
        Self {
            child: child.into(),
            state_or_switch: state_or_switch.into(),
        }
    }
}

/// Project information, reduced to the fields the CLI consumes for its
/// connected-project safety check.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub directories: ProjectDirectories,
}

/// Project directory layout subset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectDirectories {
    #[serde(default)]
    pub root: String,
}
