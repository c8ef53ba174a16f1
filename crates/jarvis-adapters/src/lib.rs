//! OS collaborators for Jarvis -- processes, browser, filesystem, clock and
//! screen capture.
//!
//! Each concern is a small async trait in [`traits`] so the dispatcher can be
//! driven by the real system implementations below or by in-memory fakes.

pub mod browser;
pub mod clock;
pub mod error;
pub mod filesystem;
pub mod platform;
pub mod process;
pub mod screenshot;
pub mod traits;

pub use browser::SystemBrowser;
pub use clock::SystemClock;
pub use error::{AdapterError, Result};
pub use filesystem::LocalFileSystem;
pub use platform::Platform;
pub use process::SystemProcessManager;
pub use screenshot::CommandScreenCapture;
pub use traits::{
    Browser, Clock, FileSystem, LaunchCommand, ProcessInfo, ProcessManager, ScreenCapture,
};
