//! Workflow runs (builds)

use super::PortalService;
use crate::aggregate::ComponentRef;
use crate::error::PlatformResult;
use crate::models::WorkflowRunSummary;
use std::cmp::Reverse;

impl PortalService {
    /// Runs of a component, newest first
    ///
    /// Ordered by creation time, falling back to start time. Runs with
    /// neither sort last, by name.
    pub async fn workflow_runs(
        &self,
        component: &ComponentRef,
    ) -> PlatformResult<Vec<WorkflowRunSummary>> {
        let runs = self.api.list_workflow_runs(component).await?;
        let mut summaries: Vec<WorkflowRunSummary> =
            runs.iter().map(WorkflowRunSummary::from_resource).collect();
        sort_newest_first(&mut summaries);
        Ok(summaries)
    }

    pub async fn workflow_run(
        &self,
        namespace: &str,
        name: &str,
    ) -> PlatformResult<WorkflowRunSummary> {
        let run = self.api.get_workflow_run(namespace, name).await?;
        Ok(WorkflowRunSummary::from_resource(&run))
    }
}

fn sort_newest_first(runs: &mut [WorkflowRunSummary]) {
    runs.sort_by(|a, b| {
        let at = |r: &WorkflowRunSummary| r.created_at.or(r.started_at);
        // None < Some, so reversing puts undated runs last
        Reverse(at(a))
            .cmp(&Reverse(at(b)))
            .then_with(|| a.name.cmp(&b.name))
    });
}
