//! Open and close desktop applications.

use jarvis_intent::Intent;
use tracing::{info, warn};

use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::result::ExecutionResult;
use crate::tables::app_response;

impl Dispatcher {
    /// Launch the application named by the intent target.
    ///
    /// Launch-and-forget: success is reported as soon as the process
    /// manager accepted the launch, whether or not the program stays up.
    pub(crate) async fn open_application(&self, intent: &Intent) -> Result<ExecutionResult> {
        let app = intent.target().trim().to_lowercase();
        if app.is_empty() {
            return Ok(ExecutionResult::failure("No application specified"));
        }

        let command = self.apps.resolve(&app);
        match self.collaborators.processes.launch(&command).await {
            Ok(pid) => {
                info!(app = %app, command = %command, pid, "application launched");
                Ok(ExecutionResult::success(app_response(&app)))
            }
            Err(e) => {
                warn!(app = %app, command = %command, error = %e, "application launch failed");
                Ok(ExecutionResult::failure(format!("Could not open {app}: {e}")))
            }
        }
    }

    /// Terminate the first running process whose name contains the target.
    pub(crate) async fn close_application(&self, intent: &Intent) -> Result<ExecutionResult> {
        let app = intent.target().trim().to_lowercase();
        if app.is_empty() {
            return Ok(ExecutionResult::failure("No application specified"));
        }

        let processes = match self.collaborators.processes.list_processes().await {
            Ok(processes) => processes,
            Err(e) => {
                warn!(app = %app, error = %e, "process enumeration failed");
                return Ok(ExecutionResult::failure(format!("Could not close {app}: {e}")));
            }
        };

        let Some(victim) = processes
            .iter()
            .find(|p| p.name.to_lowercase().contains(&app))
        else {
            return Ok(ExecutionResult::failure(format!("{app} is not running")));
        };

        match self.collaborators.processes.terminate(victim.pid).await {
            Ok(true) => {
                info!(app = %app, pid = victim.pid, process = %victim.name, "application closed");
                Ok(ExecutionResult::success(format!("Closed {app}")))
            }
            Ok(false) => Ok(ExecutionResult::failure(format!(
                "Could not close {app}: termination request was refused"
            ))),
            Err(e) => {
                warn!(app = %app, pid = victim.pid, error = %e, "termination failed");
                Ok(ExecutionResult::failure(format!("Could not close {app}: {e}")))
            }
        }
    }
}
