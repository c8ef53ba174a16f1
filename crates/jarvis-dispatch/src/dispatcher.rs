//! Intent dispatcher.
//!
//! The [`Dispatcher`] owns the OS collaborators and routes each [`Intent`]
//! to exactly one handler with an exhaustive match on [`IntentKind`].  The
//! handlers themselves live in [`crate::handlers`].

use std::path::PathBuf;
use std::sync::Arc;

use jarvis_adapters::{
    Browser, Clock, CommandScreenCapture, FileSystem, LocalFileSystem, Platform, ProcessManager,
    ScreenCapture, SystemBrowser, SystemClock, SystemProcessManager,
};
use jarvis_intent::{Intent, IntentKind};
use tracing::{debug, error, info};

use crate::result::ExecutionResult;
use crate::tables::AppCommandTable;

/// The OS collaborators a [`Dispatcher`] drives.
#[derive(Clone)]
pub struct Collaborators {
    pub processes: Arc<dyn ProcessManager>,
    pub browser: Arc<dyn Browser>,
    pub files: Arc<dyn FileSystem>,
    pub clock: Arc<dyn Clock>,
    /// Absent when no capture tool is available.
    pub screen: Option<Arc<dyn ScreenCapture>>,
}

impl Collaborators {
    /// The real system implementations for `platform`.
    ///
    /// `process_timeout_secs` bounds process enumeration and termination.
    /// Screen capture is detected on `PATH` when `enable_screenshots` is set.
    pub fn system(platform: Platform, process_timeout_secs: u64, enable_screenshots: bool) -> Self {
        let screen = if enable_screenshots {
            CommandScreenCapture::detect(platform)
                .map(|capture| Arc::new(capture) as Arc<dyn ScreenCapture>)
        } else {
            None
        };

        Self {
            processes: Arc::new(
                SystemProcessManager::new(platform).with_timeout(process_timeout_secs),
            ),
            browser: Arc::new(SystemBrowser::new(platform)),
            files: Arc::new(LocalFileSystem::new(platform)),
            clock: Arc::new(SystemClock),
            screen,
        }
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("screen", &self.screen.is_some())
            .finish_non_exhaustive()
    }
}

/// Routes intents to handlers and turns every outcome into an
/// [`ExecutionResult`].
#[derive(Debug)]
pub struct Dispatcher {
    pub(crate) apps: AppCommandTable,
    pub(crate) collaborators: Collaborators,
    pub(crate) screenshot_dir: PathBuf,
}

impl Dispatcher {
    /// Create a dispatcher for `platform` driving `collaborators`.
    ///
    /// Screenshots are written to the current directory until
    /// [`with_screenshot_dir`](Self::with_screenshot_dir) says otherwise.
    pub fn new(platform: Platform, collaborators: Collaborators) -> Self {
        Self {
            apps: AppCommandTable::for_platform(platform),
            collaborators,
            screenshot_dir: PathBuf::from("."),
        }
    }

    /// Set the directory screenshots are saved in.
    #[must_use]
    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = dir.into();
        self
    }

    /// The platform the app command table was built for.
    pub fn platform(&self) -> Platform {
        self.apps.platform()
    }

    /// Whether a screen capture collaborator is configured.
    pub fn can_capture_screen(&self) -> bool {
        self.collaborators.screen.is_some()
    }

    /// Execute `intent`.
    ///
    /// Never fails: handler errors are logged and returned as a failed
    /// result whose message is the error description.
    pub async fn dispatch(&self, intent: &Intent) -> ExecutionResult {
        debug!(kind = %intent.kind, target = intent.target(), "dispatching intent");

        let outcome = match intent.kind {
            IntentKind::OpenApplication => self.open_application(intent).await,
            IntentKind::CloseApplication => self.close_application(intent).await,
            IntentKind::WebSearch => self.web_search(intent).await,
            IntentKind::OpenWebsite => self.open_website(intent).await,
            IntentKind::FileOperation => self.file_operation(intent).await,
            IntentKind::SystemControl => self.system_control(intent).await,
            IntentKind::TimeDate => self.time_date(intent),
            IntentKind::Information => self.information(intent).await,
            IntentKind::Conversation => Ok(self.conversation(intent)),
            IntentKind::Unknown => Ok(self.unknown(intent)),
        };

        match outcome {
            Ok(result) => {
                info!(
                    kind = %intent.kind,
                    success = result.success,
                    message = %result.message,
                    "intent handled"
                );
                result
            }
            Err(e) => {
                error!(kind = %intent.kind, error = %e, "intent handler failed");
                ExecutionResult::failure(e.to_string())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fakes;

    #[tokio::test]
    async fn every_kind_yields_a_result() {
        let fakes = Fakes::new();
        let dispatcher = fakes.dispatcher();

        for kind in IntentKind::ALL {
            let intent = Intent::new(kind, 0.5, "");
            let result = dispatcher.dispatch(&intent).await;
            assert!(!result.message.is_empty(), "{kind} produced an empty message");
        }
    }

    #[tokio::test]
    async fn handler_errors_become_failed_results() {
        let fakes = Fakes::new();
        let dispatcher = fakes.dispatcher();

        // File operations without a target surface a missing-entity error.
        let intent = Intent::new(IntentKind::FileOperation, 0.85, "create file");
        let result = dispatcher.dispatch(&intent).await;
        assert!(!result.success);
        assert!(result.message.contains("target"));
    }

    #[test]
    fn system_collaborators_without_screenshots() {
        let collaborators = Collaborators::system(Platform::Linux, 5, false);
        assert!(collaborators.screen.is_none());

        let dispatcher = Dispatcher::new(Platform::Linux, collaborators);
        assert!(!dispatcher.can_capture_screen());
        assert_eq!(dispatcher.platform(), Platform::Linux);
    }
}
