//! Namespace-qualified grouping and counting
//!
//! Secondary resource names (data planes, environments) are only unique
//! within a namespace, so every grouping key carries the namespace.

use std::collections::BTreeMap;
use std::fmt;

/// `namespace/secondary` key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompositeKey(String);

impl CompositeKey {
    pub fn new(namespace: &str, secondary: &str) -> Self {
        Self(format!("{}/{}", namespace, secondary))
    }

    /// Key for a component, `namespace/project/component`
    pub fn component(namespace: &str, project: &str, component: &str) -> Self {
        Self(format!("{}/{}/{}", namespace, project, component))
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A release binding reduced to what the aggregator needs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingRecord {
    pub namespace_name: String,
    pub project_name: String,
    pub component_name: String,
    pub environment: String,
    /// Status of the binding's own Ready condition, if it has one
    pub ready_condition_status: Option<String>,
}

impl BindingRecord {
    pub fn environment_key(&self) -> CompositeKey {
        CompositeKey::new(&self.namespace_name, &self.environment)
    }
}

/// Group items under a namespace-qualified key
///
/// Items keep their input order inside each group. Items whose secondary
/// name is empty are grouped under `namespace/`, never dropped.
pub fn group_by_secondary_entity<T, I, F>(items: I, key_fn: F) -> BTreeMap<CompositeKey, Vec<T>>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> CompositeKey,
{
    let mut groups: BTreeMap<CompositeKey, Vec<T>> = BTreeMap::new();
    for item in items {
        groups.entry(key_fn(&item)).or_default().push(item);
    }
    groups
}

/// Count bindings per `namespace/environment`
///
/// Every binding increments its key, including several bindings of the same
/// component to the same environment.
pub fn count_by_environment<'a, I>(bindings: I) -> BTreeMap<CompositeKey, usize>
where
    I: IntoIterator<Item = &'a BindingRecord>,
{
    let mut counts = BTreeMap::new();
    for binding in bindings {
        *counts.entry(binding.environment_key()).or_insert(0) += 1;
    }
    counts
}
