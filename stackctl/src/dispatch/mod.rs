pub mod action;
pub mod orchestrator;

pub use action::{Action, Step};
pub use orchestrator::{ComposeOrchestrator, Orchestrator, StepStatus};

use crate::common::config::FailurePolicy;
use crate::common::exit_code;
use crate::error::Result;
use tracing::{info, warn};

/// Steps that ran for one action, with their outcomes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub action: Action,
    pub executed: Vec<(Step, StepStatus)>,
}

impl DispatchReport {
    pub fn success(&self) -> bool {
        self.executed.iter().all(|(_, status)| status.is_success())
    }

    /// Exit code of the last step that ran
    pub fn exit_code(&self) -> i32 {
        match self.executed.last() {
            Some((_, StepStatus::Failed { code })) => exit_code::propagate(*code),
            _ => exit_code::codes::SUCCESS,
        }
    }

    /// First step that failed, if any
    pub fn first_failure(&self) -> Option<(Step, Option<i32>)> {
        self.executed.iter().find_map(|(step, status)| match status {
            StepStatus::Failed { code } => Some((*step, *code)),
            StepStatus::Success => None,
        })
    }
}

pub struct Dispatcher<O> {
    orchestrator: O,
    policy: FailurePolicy,
}

impl<O: Orchestrator> Dispatcher<O> {
    pub fn new(orchestrator: O, policy: FailurePolicy) -> Self {
        Self {
            orchestrator,
            policy,
        }
    }

    /// Rendered orchestrator calls for `action`, without running them
    pub fn plan(&self, action: Action) -> Vec<String> {
        action
            .steps()
            .iter()
            .map(|step| self.orchestrator.describe(*step))
            .collect()
    }

    /// Run every step of `action` in order.
    ///
    /// A failed step stops the sequence under [`FailurePolicy::Abort`]. A
    /// step that cannot be launched always stops it.
    pub async fn dispatch(&self, action: Action) -> Result<DispatchReport> {
        let mut executed = Vec::with_capacity(action.steps().len());

        for step in action.steps() {
            info!("{}: running '{}'", action, step);
            let status = self.orchestrator.run(*step).await?;
            executed.push((*step, status));

            if let StepStatus::Failed { code } = status {
                let reason = code
                    .map(exit_code::format_exit_reason)
                    .unwrap_or_else(|| "Terminated by signal".to_string());
                warn!(
                    "{}: step '{}' failed (exit code: {:?}, reason: {})",
                    action, step, code, reason
                );
                if self.policy == FailurePolicy::Abort {
                    break;
                }
            }
        }

        Ok(DispatchReport { action, executed })
    }
}
