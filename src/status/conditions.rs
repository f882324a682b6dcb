//! Ready-condition helpers
//!
//! Platform resources report health through `status.conditions`, following
//! the usual Kubernetes convention. Only the first condition of type `Ready`
//! is considered.

use serde::{Deserialize, Serialize};

pub const READY_CONDITION: &str = "Ready";
pub const CONDITION_TRUE: &str = "True";

/// A single status condition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type", default, deserialize_with = "crate::de::null_as_default")]
    pub type_: String,
    /// "True", "False" or "Unknown" by convention, kept verbatim
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::de::blank_as_none"
    )]
    pub last_transition_time: Option<chrono::DateTime<chrono::Utc>>,
}

impl Condition {
    pub fn is_true(&self) -> bool {
        self.status == CONDITION_TRUE
    }
}

/// Find the first `Ready` condition
pub fn ready_condition(conditions: &[Condition]) -> Option<&Condition> {
    conditions.iter().find(|c| c.type_ == READY_CONDITION)
}

/// Health label shown for entities (projects, environments, data planes, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceHealth {
    Ready,
    NotReady,
    Unknown,
}

impl ResourceHealth {
    pub fn from_conditions(conditions: &[Condition]) -> Self {
        match ready_condition(conditions) {
            Some(c) if c.is_true() => ResourceHealth::Ready,
            Some(c) if c.status == "False" => ResourceHealth::NotReady,
            _ => ResourceHealth::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn condition(type_: &str, status: &str) -> Condition {
        Condition {
            type_: type_.to_string(),
            status: status.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_ready_condition_takes_first_match() {
        let conditions = vec![
            condition("Reconciled", "True"),
            condition("Ready", "False"),
            condition("Ready", "True"),
        ];
        let ready = ready_condition(&conditions).unwrap();
        assert_eq!(ready.status, "False");
    }

    #[test]
    fn test_health_from_conditions() {
        assert_eq!(
            ResourceHealth::from_conditions(&[condition("Ready", "True")]),
            ResourceHealth::Ready
        );
        assert_eq!(
            ResourceHealth::from_conditions(&[condition("Ready", "False")]),
            ResourceHealth::NotReady
        );
        assert_eq!(
            ResourceHealth::from_conditions(&[condition("Ready", "Unknown")]),
            ResourceHealth::Unknown
        );
        assert_eq!(ResourceHealth::from_conditions(&[]), ResourceHealth::Unknown);
    }

    #[test]
    fn test_condition_deserializes_type_field() {
        let c: Condition = serde_json::from_value(serde_json::json!({
            "type": "Ready",
            "status": "True",
            "reason": "Succeeded",
            "lastTransitionTime": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(c.type_, "Ready");
        assert!(c.is_true());
        assert_eq!(c.reason.as_deref(), Some("Succeeded"));
        assert!(c.last_transition_time.is_some());
    }
}
