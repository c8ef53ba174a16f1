//! File create, delete and open.

use std::path::Path;

use jarvis_intent::{ENTITY_TARGET, Intent, IntentKind};
use tracing::warn;

use crate::dispatcher::Dispatcher;
use crate::error::{DispatchError, Result};
use crate::result::ExecutionResult;

/// The file sub-action named in an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Create,
    Delete,
    Open,
}

impl FileAction {
    /// Detect the sub-action from the raw text.
    ///
    /// When several verbs occur, create wins over delete, and delete over
    /// open.
    pub fn detect(raw_text: &str) -> Option<Self> {
        let lowered = raw_text.to_lowercase();
        if lowered.contains("create") {
            Some(Self::Create)
        } else if lowered.contains("delete") {
            Some(Self::Delete)
        } else if lowered.contains("open") {
            Some(Self::Open)
        } else {
            None
        }
    }
}

impl Dispatcher {
    pub(crate) async fn file_operation(&self, intent: &Intent) -> Result<ExecutionResult> {
        let Some(action) = FileAction::detect(&intent.raw_text) else {
            return Ok(ExecutionResult::failure("Unknown file operation"));
        };

        let target = intent.target().trim();
        if target.is_empty() {
            return Err(DispatchError::MissingEntity {
                kind: IntentKind::FileOperation,
                entity: ENTITY_TARGET.to_owned(),
            });
        }

        let path = Path::new(target);
        let files = &self.collaborators.files;
        let (outcome, message) = match action {
            FileAction::Create => (files.create_empty(path).await, "Created file"),
            FileAction::Delete => (files.remove(path).await, "Deleted file"),
            FileAction::Open => (files.open_with_default_app(path).await, "Opening file"),
        };

        match outcome {
            Ok(()) => Ok(ExecutionResult::success(format!("{message} {target}"))),
            Err(e) => {
                warn!(?action, path = %target, error = %e, "file operation failed");
                Ok(ExecutionResult::failure(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use jarvis_adapters::{LocalFileSystem, Platform};

    use crate::testing::Fakes;

    use super::*;

    fn file_intent(raw: &str, target: &str) -> Intent {
        Intent::new(IntentKind::FileOperation, 0.85, raw).with_entity(ENTITY_TARGET, target)
    }

    #[test]
    fn action_precedence() {
        assert_eq!(FileAction::detect("create file a"), Some(FileAction::Create));
        assert_eq!(FileAction::detect("Delete the file b"), Some(FileAction::Delete));
        assert_eq!(FileAction::detect("open file c"), Some(FileAction::Open));
        // Both verbs present: create wins.
        assert_eq!(
            FileAction::detect("create file to delete later"),
            Some(FileAction::Create)
        );
        assert_eq!(
            FileAction::detect("delete file opener.txt"),
            Some(FileAction::Delete)
        );
        assert_eq!(FileAction::detect("delete the makefile"), Some(FileAction::Delete));
        assert_eq!(FileAction::detect("remove file x"), None);
        assert_eq!(FileAction::detect("make file x"), None);
        assert_eq!(FileAction::detect("rename file x"), None);
    }

    #[tokio::test]
    async fn recorded_operations() {
        let fakes = Fakes::new();
        let dispatcher = fakes.dispatcher();

        let created = dispatcher
            .dispatch(&file_intent("create a file called notes.txt", "notes.txt"))
            .await;
        let opened = dispatcher
            .dispatch(&file_intent("open the file notes.txt", "notes.txt"))
            .await;

        assert_eq!(created.message, "Created file notes.txt");
        assert_eq!(opened.message, "Opening file notes.txt");
        assert_eq!(
            fakes.files.created.lock().unwrap().as_slice(),
            [PathBuf::from("notes.txt")]
        );
        assert_eq!(fakes.files.opened.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_action() {
        let fakes = Fakes::new();
        let result = fakes
            .dispatcher()
            .dispatch(&file_intent("rename file a.txt", "a.txt"))
            .await;

        assert!(!result.success);
        assert_eq!(result.message, "Unknown file operation");
    }

    #[tokio::test]
    async fn create_and_delete_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("report.txt");
        let target = file.display().to_string();

        let mut collaborators = Fakes::new().collaborators();
        collaborators.files = Arc::new(LocalFileSystem::new(Platform::Linux));
        let dispatcher = Dispatcher::new(Platform::Linux, collaborators);

        let created = dispatcher
            .dispatch(&file_intent("create file", &target))
            .await;
        assert!(created.success, "{}", created.message);
        assert!(file.exists());

        let deleted = dispatcher
            .dispatch(&file_intent("delete file", &target))
            .await;
        assert!(deleted.success, "{}", deleted.message);
        assert!(!file.exists());
    }

    #[tokio::test]
    async fn delete_makefile_removes_it() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("makefile");
        std::fs::write(&file, "all:\n\tcargo b\n").unwrap();
        let target = file.display().to_string();

        let mut collaborators = Fakes::new().collaborators();
        collaborators.files = Arc::new(LocalFileSystem::new(Platform::Linux));
        let dispatcher = Dispatcher::new(Platform::Linux, collaborators);

        let result = dispatcher
            .dispatch(&file_intent(&format!("delete the file {target}"), &target))
            .await;
        assert!(result.success, "{}", result.message);
        assert_eq!(result.message, format!("Deleted file {target}"));
        assert!(!file.exists());
    }

    #[tokio::test]
    async fn remove_is_not_a_file_verb() {
        let fakes = Fakes::new();
        let result = fakes
            .dispatcher()
            .dispatch(&file_intent("remove the file notes.txt", "notes.txt"))
            .await;

        assert!(!result.success);
        assert_eq!(result.message, "Unknown file operation");
        assert!(fakes.files.removed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_missing_file_reports_os_error() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("ghost.txt").display().to_string();

        let mut collaborators = Fakes::new().collaborators();
        collaborators.files = Arc::new(LocalFileSystem::new(Platform::Linux));
        let dispatcher = Dispatcher::new(Platform::Linux, collaborators);

        let result = dispatcher
            .dispatch(&file_intent("delete file", &target))
            .await;
        assert!(!result.success);
        assert!(!result.message.is_empty());
    }
}
