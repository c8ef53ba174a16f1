//! Collaborator traits and supporting types.
//!
//! The dispatcher only ever talks to the OS through these traits.  Real
//! implementations live in the sibling modules; tests substitute fakes.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::Result;

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

/// A running process as reported by the process table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessInfo {
    /// Operating-system process identifier.
    pub pid: u32,
    /// Executable name (basename, no directory).
    pub name: String,
}

/// A program to start, plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchCommand {
    /// Program name or absolute path.
    pub program: String,
    /// Arguments passed verbatim.
    pub args: Vec<String>,
    /// Alternative absolute paths tried, in order, when `program` is an
    /// absolute path that does not exist.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fallback_paths: Vec<String>,
}

impl LaunchCommand {
    /// A bare program with no arguments.
    pub fn program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            fallback_paths: Vec::new(),
        }
    }

    /// Append one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Set the alternative paths probed when `program` is missing.
    #[must_use]
    pub fn with_fallback_paths(mut self, paths: Vec<String>) -> Self {
        self.fallback_paths = paths;
        self
    }
}

impl std::fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Starts, enumerates and terminates OS processes.
#[async_trait]
pub trait ProcessManager: Send + Sync {
    /// Start `command` without waiting for it.
    ///
    /// Launch-and-forget: `Ok` only means the spawn call itself succeeded.
    /// It says nothing about whether the program stays up or shows a window.
    /// Returns the pid of the spawned handle (0 when the OS did not report
    /// one).
    async fn launch(&self, command: &LaunchCommand) -> Result<u32>;

    /// Ask process `pid` to terminate.  Returns whether the request was
    /// accepted.
    async fn terminate(&self, pid: u32) -> Result<bool>;

    /// Snapshot of the live process table.
    async fn list_processes(&self) -> Result<Vec<ProcessInfo>>;
}

/// Opens URLs in the user's browser.
#[async_trait]
pub trait Browser: Send + Sync {
    /// Open `url`.  `Ok(false)` means the browser refused without an error.
    async fn open(&self, url: &str) -> Result<bool>;
}

/// Plain file operations used by voice commands.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Create (or truncate) `path` as an empty file.
    async fn create_empty(&self, path: &Path) -> Result<()>;

    /// Delete the file at `path`.
    async fn remove(&self, path: &Path) -> Result<()>;

    /// Open `path` with the desktop's default application.
    async fn open_with_default_app(&self, path: &Path) -> Result<()>;
}

/// Source of the host-local wall-clock time.
pub trait Clock: Send + Sync {
    /// The current local date and time.
    fn now(&self) -> DateTime<Local>;
}

/// Optional screen-capture capability.
#[async_trait]
pub trait ScreenCapture: Send + Sync {
    /// Capture the screen into a PNG at `path`.
    async fn capture(&self, path: &Path) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
