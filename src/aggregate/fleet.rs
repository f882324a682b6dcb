//! Best-effort fleet counts
//!
//! Per-component lookups that fail are logged at warn level and contribute
//! zero. The counts are always returned, possibly undercounting.

use super::batch::settle_in_batches;
use super::grouping::{BindingRecord, CompositeKey};
use crate::status::CONDITION_TRUE;
use std::collections::HashSet;
use std::fmt::Display;
use std::future::Future;

/// Identity of a component across namespaces
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ComponentRef {
    pub namespace: String,
    pub project: String,
    pub name: String,
}

impl ComponentRef {
    pub fn new(namespace: &str, project: &str, name: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            project: project.to_string(),
            name: name.to_string(),
        }
    }

    pub fn key(&self) -> CompositeKey {
        CompositeKey::component(&self.namespace, &self.project, &self.name)
    }
}

/// A binding is healthy when its own Ready condition is "True"
pub fn is_binding_ready(binding: &BindingRecord) -> bool {
    binding.ready_condition_status.as_deref() == Some(CONDITION_TRUE)
}

/// Count components that have at least one binding
///
/// Each `namespace/project/component` is checked and counted once, however
/// often it appears in `components`.
pub async fn count_distinct_deployed_components<'a, E, F, Fut>(
    components: &'a [ComponentRef],
    batch_size: usize,
    has_any_binding: F,
) -> usize
where
    E: Display,
    F: Fn(&'a ComponentRef) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    let mut seen = HashSet::new();
    let unique: Vec<&'a ComponentRef> = components
        .iter()
        .filter(|c| seen.insert(c.key()))
        .collect();

    let results = settle_in_batches(&unique, batch_size, |c| has_any_binding(*c)).await;

    unique
        .iter()
        .zip(results)
        .filter(|(component, result)| match result {
            Ok(deployed) => *deployed,
            Err(e) => {
                tracing::warn!(
                    "Failed to check bindings for component {}: {}",
                    component.key(),
                    e
                );
                false
            }
        })
        .count()
}

/// Count bindings whose Ready condition holds, across all components
pub async fn count_healthy_workloads<'a, E, F, Fut, P>(
    components: &'a [ComponentRef],
    batch_size: usize,
    fetch_bindings: F,
    is_ready: P,
) -> usize
where
    E: Display,
    F: Fn(&'a ComponentRef) -> Fut,
    Fut: Future<Output = Result<Vec<BindingRecord>, E>>,
    P: Fn(&BindingRecord) -> bool,
{
    collect_bindings(components, batch_size, fetch_bindings)
        .await
        .iter()
        .filter(|b| is_ready(b))
        .count()
}

/// Fetch and flatten the bindings of every component
///
/// Components whose lookup fails are skipped with a warning.
pub async fn collect_bindings<'a, E, F, Fut>(
    components: &'a [ComponentRef],
    batch_size: usize,
    fetch_bindings: F,
) -> Vec<BindingRecord>
where
    E: Display,
    F: Fn(&'a ComponentRef) -> Fut,
    Fut: Future<Output = Result<Vec<BindingRecord>, E>>,
{
    let results = settle_in_batches(components, batch_size, fetch_bindings).await;

    let mut bindings = Vec::new();
    for (component, result) in components.iter().zip(results) {
        match result {
            Ok(found) => bindings.extend(found),
            Err(e) => tracing::warn!(
                "Failed to fetch bindings for component {}: {}",
                component.key(),
                e
            ),
        }
    }
    bindings
}
