//! Handler for `workflow_run` webhook events.

use crate::carbon::{KWH_PER_WORKFLOW_MINUTE, emissions_kg};
use crate::webhooks::action::ActionResult;
use crate::webhooks::events::{WorkflowRunAction, WorkflowRunEvent};

/// Estimates the energy of a completed workflow run from its runtime.
pub fn handle_workflow_run(event: &WorkflowRunEvent) -> ActionResult {
    let run = match (&event.action, &event.workflow_run) {
        (WorkflowRunAction::Completed, Some(run)) => run,
        (action, _) => {
            return ActionResult::ignore(format!(
                "workflow_run action '{}' is not analyzed",
                action.as_str()
            ));
        }
    };

    let duration = run.duration_minutes();
    let energy_consumption = duration as f64 * KWH_PER_WORKFLOW_MINUTE;

    ActionResult::LogWorkflow {
        workflow_name: run.name.clone(),
        conclusion: run.conclusion.clone(),
        duration,
        energy_consumption,
        carbon_emission: emissions_kg(energy_consumption),
    }
}
