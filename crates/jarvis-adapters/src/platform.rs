//! Host platform detection.
//!
//! Several collaborators pick their commands per OS family.  WSL is treated
//! as its own family: it runs Linux binaries but opens URLs and GUI apps
//! through the Windows side (`cmd.exe /c start`).

use serde::{Deserialize, Serialize};
use tokio::process::Command;

/// Kernel release file whose contents identify WSL.
const OSRELEASE_PATH: &str = "/proc/sys/kernel/osrelease";

/// The OS family the assistant runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    /// Linux running inside the Windows Subsystem for Linux.
    Wsl,
    Other,
}

impl Platform {
    /// Detect the platform of the running process.
    pub fn detect() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "linux") {
            let release = std::fs::read_to_string(OSRELEASE_PATH).unwrap_or_default();
            Self::from_kernel_release(&release)
        } else {
            Self::Other
        }
    }

    /// Classify a Linux kernel release string.
    pub fn from_kernel_release(release: &str) -> Self {
        if release.to_lowercase().contains("microsoft") {
            Self::Wsl
        } else {
            Self::Linux
        }
    }

    /// Whether processes are managed with Windows tools (`tasklist`,
    /// `taskkill`).  WSL manages its own Linux processes.
    pub fn uses_windows_process_tools(self) -> bool {
        matches!(self, Self::Windows)
    }

    /// Build the command that hands `target` (a URL or a file path) to the
    /// desktop's default handler.
    pub fn opener_command(self, target: &str) -> Command {
        match self {
            Self::Windows => {
                let mut cmd = Command::new("cmd");
                cmd.args(["/C", "start", "", target]);
                cmd
            }
            Self::Wsl => {
                let mut cmd = Command::new("cmd.exe");
                cmd.args(["/c", "start", target]);
                cmd
            }
            Self::MacOs => {
                let mut cmd = Command::new("open");
                cmd.arg(target);
                cmd
            }
            Self::Linux | Self::Other => {
                let mut cmd = Command::new("xdg-open");
                cmd.arg(target);
                cmd
            }
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Windows => write!(f, "windows"),
            Self::MacOs => write!(f, "macos"),
            Self::Linux => write!(f, "linux"),
            Self::Wsl => write!(f, "wsl"),
            Self::Other => write!(f, "other"),
        }
    }
}
