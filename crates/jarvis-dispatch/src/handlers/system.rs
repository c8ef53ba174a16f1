//! Screenshot, volume and brightness.
//!
//! Volume and brightness are acknowledged but not wired to real system
//! state.

use jarvis_adapters::AdapterError;
use jarvis_intent::Intent;
use tracing::{info, warn};

use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::result::ExecutionResult;

/// Screenshot file name pattern, formatted with the clock's local time.
const SCREENSHOT_FORMAT: &str = "screenshot_%Y%m%d_%H%M%S.png";

/// The system sub-action named in an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemAction {
    Screenshot,
    Volume,
    Brightness,
}

impl SystemAction {
    /// Detect the sub-action from the raw text.  Screenshot wins over
    /// volume, volume over brightness.
    pub fn detect(raw_text: &str) -> Option<Self> {
        let lowered = raw_text.to_lowercase();
        if lowered.contains("screenshot") {
            Some(Self::Screenshot)
        } else if lowered.contains("volume") {
            Some(Self::Volume)
        } else if lowered.contains("brightness") {
            Some(Self::Brightness)
        } else {
            None
        }
    }
}

impl Dispatcher {
    pub(crate) async fn system_control(&self, intent: &Intent) -> Result<ExecutionResult> {
        let target = intent.target();

        match SystemAction::detect(&intent.raw_text) {
            Some(SystemAction::Screenshot) => Ok(self.screenshot().await),
            Some(SystemAction::Volume) => Ok(ExecutionResult::success(format!(
                "Volume {target} (system integration required)"
            ))),
            Some(SystemAction::Brightness) => Ok(ExecutionResult::success(format!(
                "Brightness set to {target} (system integration required)"
            ))),
            None => Ok(ExecutionResult::failure("Unknown system control command")),
        }
    }

    async fn screenshot(&self) -> ExecutionResult {
        let Some(screen) = &self.collaborators.screen else {
            let err = AdapterError::Unavailable {
                capability: "Screen capture".into(),
                reason: "no screenshot tool is configured".into(),
            };
            return ExecutionResult::failure(err.to_string());
        };

        let file_name = self.collaborators.clock.now().format(SCREENSHOT_FORMAT).to_string();
        let path = self.screenshot_dir.join(&file_name);

        match screen.capture(&path).await {
            Ok(()) => {
                info!(path = %path.display(), "screenshot saved");
                ExecutionResult::success(format!("Screenshot saved as {file_name}"))
                    .with_data("path", path.display().to_string())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "screenshot failed");
                ExecutionResult::failure(format!("Screenshot failed: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use jarvis_adapters::Platform;
    use jarvis_intent::{ENTITY_TARGET, IntentKind};

    use crate::testing::Fakes;

    use super::*;

    fn system(raw: &str, target: Option<&str>) -> Intent {
        let intent = Intent::new(IntentKind::SystemControl, 0.85, raw);
        match target {
            Some(t) => intent.with_entity(ENTITY_TARGET, t),
            None => intent,
        }
    }

    #[test]
    fn action_precedence() {
        assert_eq!(
            SystemAction::detect("screenshot then volume up"),
            Some(SystemAction::Screenshot)
        );
        assert_eq!(
            SystemAction::detect("volume and brightness"),
            Some(SystemAction::Volume)
        );
        assert_eq!(SystemAction::detect("reboot"), None);
    }

    #[tokio::test]
    async fn screenshot_uses_clock_timestamp() {
        let fakes = Fakes::new();
        let dir = tempfile::tempdir().unwrap();
        let dispatcher = fakes.dispatcher().with_screenshot_dir(dir.path());

        let result = dispatcher
            .dispatch(&system("take a screenshot", None))
            .await;

        assert!(result.success);
        assert_eq!(
            result.message,
            "Screenshot saved as screenshot_20240305_140709.png"
        );
        assert_eq!(
            fakes.screen.captured.lock().unwrap().as_slice(),
            [dir.path().join("screenshot_20240305_140709.png")]
        );
    }

    #[tokio::test]
    async fn screenshot_without_capture_tool() {
        let mut collaborators = Fakes::new().collaborators();
        collaborators.screen = None;
        let dispatcher = Dispatcher::new(Platform::Linux, collaborators);

        let result = dispatcher
            .dispatch(&system("capture screenshot", None))
            .await;
        assert!(!result.success);
        assert_eq!(
            result.message,
            "Screen capture is not available: no screenshot tool is configured"
        );
    }

    #[tokio::test]
    async fn volume_and_brightness_are_acknowledged() {
        let dispatcher = Fakes::new().dispatcher();

        let volume = dispatcher
            .dispatch(&system("turn volume up", Some("up")))
            .await;
        assert!(volume.success);
        assert_eq!(volume.message, "Volume up (system integration required)");

        let brightness = dispatcher
            .dispatch(&system("set brightness to 40", Some("40")))
            .await;
        assert_eq!(
            brightness.message,
            "Brightness set to 40 (system integration required)"
        );
    }

    #[tokio::test]
    async fn unknown_system_command() {
        let result = Fakes::new()
            .dispatcher()
            .dispatch(&system("shut everything down", None))
            .await;
        assert!(!result.success);
        assert_eq!(result.message, "Unknown system control command");
    }
}
