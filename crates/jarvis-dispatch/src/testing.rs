//! In-memory collaborators for unit tests.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use jarvis_adapters::{
    AdapterError, Browser, Clock, FileSystem, LaunchCommand, Platform, ProcessInfo,
    ProcessManager, Result, ScreenCapture,
};

use crate::dispatcher::{Collaborators, Dispatcher};

#[derive(Default)]
pub struct FakeProcesses {
    pub table: Mutex<Vec<ProcessInfo>>,
    pub launched: Mutex<Vec<LaunchCommand>>,
    pub terminated: Mutex<Vec<u32>>,
    pub fail_launch: bool,
}

#[async_trait]
impl ProcessManager for FakeProcesses {
    async fn launch(&self, command: &LaunchCommand) -> Result<u32> {
        if self.fail_launch {
            return Err(AdapterError::ExecutionFailed {
                operation: format!("launching `{}`", command.program),
                reason: "No such file or directory".into(),
            });
        }
        self.launched.lock().unwrap().push(command.clone());
        Ok(4242)
    }

    async fn terminate(&self, pid: u32) -> Result<bool> {
        self.terminated.lock().unwrap().push(pid);
        self.table.lock().unwrap().retain(|p| p.pid != pid);
        Ok(true)
    }

    async fn list_processes(&self) -> Result<Vec<ProcessInfo>> {
        Ok(self.table.lock().unwrap().clone())
    }
}

pub struct RecordingBrowser {
    pub opened: Mutex<Vec<String>>,
    pub accept: bool,
}

impl Default for RecordingBrowser {
    fn default() -> Self {
        Self {
            opened: Mutex::new(Vec::new()),
            accept: true,
        }
    }
}

#[async_trait]
impl Browser for RecordingBrowser {
    async fn open(&self, url: &str) -> Result<bool> {
        self.opened.lock().unwrap().push(url.to_owned());
        Ok(self.accept)
    }
}

#[derive(Default)]
pub struct RecordingFs {
    pub created: Mutex<Vec<PathBuf>>,
    pub removed: Mutex<Vec<PathBuf>>,
    pub opened: Mutex<Vec<PathBuf>>,
}

#[async_trait]
impl FileSystem for RecordingFs {
    async fn create_empty(&self, path: &Path) -> Result<()> {
        self.created.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    async fn remove(&self, path: &Path) -> Result<()> {
        self.removed.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    async fn open_with_default_app(&self, path: &Path) -> Result<()> {
        self.opened.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

pub struct FixedClock(pub DateTime<Local>);

impl FixedClock {
    /// 2024-03-05 14:07:09 local time (a Tuesday).
    pub fn afternoon() -> Self {
        Self(Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

#[derive(Default)]
pub struct FakeScreen {
    pub captured: Mutex<Vec<PathBuf>>,
}

#[async_trait]
impl ScreenCapture for FakeScreen {
    async fn capture(&self, path: &Path) -> Result<()> {
        self.captured.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

/// One set of fakes plus helpers to build a dispatcher over them.
pub struct Fakes {
    pub processes: Arc<FakeProcesses>,
    pub browser: Arc<RecordingBrowser>,
    pub files: Arc<RecordingFs>,
    pub screen: Arc<FakeScreen>,
}

impl Fakes {
    pub fn new() -> Self {
        Self {
            processes: Arc::new(FakeProcesses::default()),
            browser: Arc::new(RecordingBrowser::default()),
            files: Arc::new(RecordingFs::default()),
            screen: Arc::new(FakeScreen::default()),
        }
    }

    pub fn with_processes(mut self, processes: FakeProcesses) -> Self {
        self.processes = Arc::new(processes);
        self
    }

    pub fn with_browser(mut self, browser: RecordingBrowser) -> Self {
        self.browser = Arc::new(browser);
        self
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            processes: self.processes.clone(),
            browser: self.browser.clone(),
            files: self.files.clone(),
            clock: Arc::new(FixedClock::afternoon()),
            screen: Some(self.screen.clone()),
        }
    }

    /// A Linux dispatcher with screen capture available.
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(Platform::Linux, self.collaborators())
    }

    pub fn opened_urls(&self) -> Vec<String> {
        self.browser.opened.lock().unwrap().clone()
    }
}

pub fn process(pid: u32, name: &str) -> ProcessInfo {
    ProcessInfo {
        pid,
        name: name.to_owned(),
    }
}
