//! Generic shape of platform resources
//!
//! Every object served by the platform API has `metadata`, `spec` and
//! `status` sections. Missing sections and fields are defaulted here, at the
//! boundary, so the rest of the crate never probes raw JSON.

use crate::status::{Condition, ResourceHealth};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DISPLAY_NAME_ANNOTATION: &str = "portal.dev/display-name";
pub const DESCRIPTION_ANNOTATION: &str = "portal.dev/description";

/// Object metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::de::blank_as_none"
    )]
    pub creation_timestamp: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "crate::de::null_as_default"
    )]
    pub labels: BTreeMap<String, String>,
    #[serde(
        default,
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "crate::de::null_as_default"
    )]
    pub annotations: BTreeMap<String, String>,
}

/// A platform resource with typed spec and status
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "S: Deserialize<'de> + Default, St: Deserialize<'de> + Default"))]
pub struct Resource<S, St> {
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub metadata: ObjectMeta,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub spec: S,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub status: St,
}

impl<S, St> Resource<S, St> {
    /// Resource name, empty when absent
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }

    /// Resource namespace, empty when absent
    pub fn namespace(&self) -> &str {
        self.metadata.namespace.as_deref().unwrap_or_default()
    }

    /// Display name annotation, falling back to the resource name
    pub fn display_name(&self) -> String {
        self.annotation(DISPLAY_NAME_ANNOTATION)
            .unwrap_or_else(|| self.name())
            .to_string()
    }

    pub fn description(&self) -> Option<String> {
        self.annotation(DESCRIPTION_ANNOTATION).map(str::to_string)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.metadata.creation_timestamp
    }

    fn annotation(&self, key: &str) -> Option<&str> {
        self.metadata
            .annotations
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// Status block that only carries conditions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionedStatus {
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub conditions: Vec<Condition>,
}

impl<S> Resource<S, ConditionedStatus> {
    pub fn health(&self) -> ResourceHealth {
        ResourceHealth::from_conditions(&self.status.conditions)
    }
}

/// One page of a list response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListPage<T> {
    #[serde(default = "Vec::new", deserialize_with = "crate::de::null_as_default")]
    pub items: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

impl<T> ListPage<T> {
    /// Cursor for the next page; empty cursors end pagination
    pub fn next(&self) -> Option<&str> {
        self.next_cursor.as_deref().filter(|c| !c.is_empty())
    }
}
