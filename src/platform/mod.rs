//! Host platform detection and environment access.

pub mod paths;

use std::fmt;

pub use paths::{resolve, PathHints};

/// Host operating system families the storage file can be located on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    /// Any other OS, carrying its identifier for diagnostics.
    Other(String),
}

impl Platform {
    /// Detects the platform this process was compiled for.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Maps a `std::env::consts::OS` style identifier to a platform.
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Platform::Windows,
            "macos" | "darwin" => Platform::MacOs,
            "linux" => Platform::Linux,
            other => Platform::Other(other.to_string()),
        }
    }

    /// Returns true for the Windows family.
    pub fn is_windows(&self) -> bool {
        matches!(self, Platform::Windows)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => f.write_str("windows"),
            Platform::MacOs => f.write_str("macos"),
            Platform::Linux => f.write_str("linux"),
            Platform::Other(os) => f.write_str(os),
        }
    }
}

/// Read access to process environment variables.
///
/// Everything that consults the environment goes through this trait so that
/// the lookup happens once at the process boundary and can be faked in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Environment {
    /// Returns the value of `key`, or `None` if unset or empty.
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }
}
