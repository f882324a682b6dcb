//! Workflow run status derivation
//!
//! A run carries three overlapping signals: its completion timestamp, its
//! `Ready` condition and the phases of its tasks. The upstream reconciler may
//! set `completedAt` before it rewrites the conditions, so the timestamp is
//! checked first. The rule order below must not change.

use super::conditions::{Condition, ready_condition};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Phase of a single task inside a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskPhase {
    Pending,
    Running,
    Succeeded,
    Failed,
    Error,
    /// Missing or unrecognised phase; matches none of the derivation rules
    #[default]
    #[serde(other)]
    Unknown,
}

impl TaskPhase {
    pub fn is_failure(&self) -> bool {
        matches!(self, TaskPhase::Failed | TaskPhase::Error)
    }
}

/// A task entry in a run's status
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub phase: TaskPhase,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::de::blank_as_none"
    )]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::de::blank_as_none"
    )]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Status block of a workflow run, as reported by the platform
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    #[serde(default, deserialize_with = "crate::de::blank_as_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub conditions: Vec<Condition>,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub tasks: Vec<TaskRecord>,
    #[serde(default, deserialize_with = "crate::de::blank_as_none")]
    pub started_at: Option<DateTime<Utc>>,
}

/// Derived status label of a run
///
/// `Other` passes a terminal condition reason through verbatim
/// (e.g. "Cancelled").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RunStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    Other(String),
}

impl RunStatus {
    /// Map a label to a status, keeping unknown labels as `Other`
    pub fn from_label(label: &str) -> Self {
        match label {
            "Pending" => RunStatus::Pending,
            "Running" => RunStatus::Running,
            "Succeeded" => RunStatus::Succeeded,
            "Failed" => RunStatus::Failed,
            other => RunStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Pending => "Pending",
            RunStatus::Running => "Running",
            RunStatus::Succeeded => "Succeeded",
            RunStatus::Failed => "Failed",
            RunStatus::Other(reason) => reason,
        }
    }
}

impl Serialize for RunStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Derive a run's status label
///
/// Total over partial input: a record with nothing set is `Pending`.
pub fn derive_status(record: &RunRecord) -> RunStatus {
    let ready = ready_condition(&record.conditions);
    // Empty reasons carry no information
    let reason = ready
        .and_then(|c| c.reason.as_deref())
        .filter(|r| !r.is_empty());

    if record.completed_at.is_some() {
        if record.tasks.iter().any(|t| t.phase.is_failure()) {
            return RunStatus::Failed;
        }
        return match reason {
            // A stale in-progress reason cannot outlive completion
            Some(r) if r != "Running" && r != "Pending" => RunStatus::from_label(r),
            _ => RunStatus::Succeeded,
        };
    }

    if let Some(condition) = ready {
        return match reason {
            Some(r) => RunStatus::from_label(r),
            None if condition.is_true() => RunStatus::Succeeded,
            None => RunStatus::Running,
        };
    }

    let tasks = &record.tasks;
    if tasks.iter().any(|t| t.phase.is_failure()) {
        RunStatus::Failed
    } else if !tasks.is_empty() && tasks.iter().all(|t| t.phase == TaskPhase::Succeeded) {
        RunStatus::Succeeded
    } else if tasks.iter().any(|t| t.phase == TaskPhase::Running) || record.started_at.is_some()
    {
        RunStatus::Running
    } else {
        RunStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready(status: &str, reason: Option<&str>) -> Condition {
        Condition {
            type_: "Ready".to_string(),
            status: status.to_string(),
            reason: reason.map(str::to_string),
            ..Default::default()
        }
    }

    fn task(phase: TaskPhase) -> TaskRecord {
        TaskRecord {
            name: "build".to_string(),
            phase,
            ..Default::default()
        }
    }

    fn completed() -> Option<DateTime<Utc>> {
        Some("2024-01-01T00:00:00Z".parse().unwrap())
    }

    #[test]
    fn test_empty_record_is_pending() {
        assert_eq!(derive_status(&RunRecord::default()), RunStatus::Pending);
    }

    #[test]
    fn test_completed_with_failed_task_ignores_conditions() {
        let record = RunRecord {
            completed_at: completed(),
            conditions: vec![ready("True", Some("Succeeded"))],
            tasks: vec![task(TaskPhase::Succeeded), task(TaskPhase::Error)],
            ..Default::default()
        };
        assert_eq!(derive_status(&record), RunStatus::Failed);
    }

    #[test]
    fn test_completed_passes_terminal_reason_through() {
        let record = RunRecord {
            completed_at: completed(),
            conditions: vec![ready("False", Some("Cancelled"))],
            tasks: vec![task(TaskPhase::Succeeded)],
            ..Default::default()
        };
        assert_eq!(
            derive_status(&record),
            RunStatus::Other("Cancelled".to_string())
        );
    }

    #[test]
    fn test_completed_suppresses_stale_pending_reason() {
        let record = RunRecord {
            completed_at: completed(),
            conditions: vec![ready("False", Some("Pending"))],
            ..Default::default()
        };
        assert_eq!(derive_status(&record), RunStatus::Succeeded);
    }

    #[test]
    fn test_condition_without_reason() {
        let record = RunRecord {
            conditions: vec![ready("False", None)],
            tasks: vec![task(TaskPhase::Failed)],
            ..Default::default()
        };
        // Conditions win over task phases while the run is not completed
        assert_eq!(derive_status(&record), RunStatus::Running);

        let record = RunRecord {
            conditions: vec![ready("True", Some(""))],
            ..Default::default()
        };
        assert_eq!(derive_status(&record), RunStatus::Succeeded);
    }

    #[test]
    fn test_task_fallback_order() {
        let running = RunRecord {
            tasks: vec![task(TaskPhase::Succeeded), task(TaskPhase::Running)],
            ..Default::default()
        };
        assert_eq!(derive_status(&running), RunStatus::Running);

        let all_succeeded = RunRecord {
            tasks: vec![task(TaskPhase::Succeeded), task(TaskPhase::Succeeded)],
            ..Default::default()
        };
        assert_eq!(derive_status(&all_succeeded), RunStatus::Succeeded);

        let queued = RunRecord {
            tasks: vec![task(TaskPhase::Pending)],
            ..Default::default()
        };
        assert_eq!(derive_status(&queued), RunStatus::Pending);

        let started = RunRecord {
            tasks: vec![task(TaskPhase::Pending)],
            started_at: completed(),
            ..Default::default()
        };
        assert_eq!(derive_status(&started), RunStatus::Running);
    }

    #[test]
    fn test_unknown_task_phase_deserializes() {
        let t: TaskRecord =
            serde_json::from_value(serde_json::json!({"name": "x", "phase": "Skipped"})).unwrap();
        assert_eq!(t.phase, TaskPhase::Unknown);

        let t: TaskRecord = serde_json::from_value(serde_json::json!({"name": "x"})).unwrap();
        assert_eq!(t.phase, TaskPhase::Unknown);
    }

    #[test]
    fn test_status_serializes_as_label() {
        let json = serde_json::to_value(RunStatus::Other("Cancelled".to_string())).unwrap();
        assert_eq!(json, serde_json::json!("Cancelled"));
        let json = serde_json::to_value(RunStatus::Succeeded).unwrap();
        assert_eq!(json, serde_json::json!("Succeeded"));
    }
}
