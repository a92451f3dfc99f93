//! Host platform detection and shell invocation selection
//!
//! | Platform | Program | Flag |
//! |----------|---------|------|
//! | Windows  | `cmd`   | `/c` |
//! | POSIX    | `sh`    | `-c` |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ShellError;

/// Which shell family the runner targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Windows-like host, commands go through `cmd /c`
    Windows,
    /// POSIX-like host, commands go through `sh -c`
    Posix,
}

impl Platform {
    /// Platform of the host this binary was built for
    pub fn host() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }

    /// Check whether this is the Windows-style invocation
    pub fn is_windows(self) -> bool {
        self == Platform::Windows
    }

    /// Shell program and flag for this platform
    pub fn invocation(self) -> ShellInvocation {
        match self {
            Platform::Windows => ShellInvocation {
                program: "cmd",
                flag: "/c",
            },
            Platform::Posix => ShellInvocation {
                program: "sh",
                flag: "-c",
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Posix => "posix",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ShellError;

    /// Accepts `posix`/`unix`-style names, and anything starting with `win`
    /// (`windows`, `win32`) for the Windows form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        if name.starts_with("win") {
            return Ok(Platform::Windows);
        }
        match name.as_str() {
            "posix" | "unix" | "linux" | "macos" | "darwin" => Ok(Platform::Posix),
            _ => Err(ShellError::InvalidConfig(format!("unknown platform '{}'", s))),
        }
    }
}

/// A shell program plus its "run this string" flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellInvocation {
    program: &'static str,
    flag: &'static str,
}

impl ShellInvocation {
    pub fn program(&self) -> &'static str {
        self.program
    }

    pub fn flag(&self) -> &'static str {
        self.flag
    }

    /// Argument list for running `command`: the flag, then the command as a
    /// single argument, unmodified.
    pub fn args(&self, command: &str) -> Vec<String> {
        vec![self.flag.to_string(), command.to_string()]
    }
}
