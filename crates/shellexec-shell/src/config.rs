//! Runner configuration

use serde::{Deserialize, Serialize};

use crate::{encoding::Encoding, platform::Platform};

/// Fixed settings of a [`CommandRunner`](crate::CommandRunner)
///
/// Deserializes from a table such as `{ "encoding": "utf8", "platform": "posix" }`.
/// Both keys are optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Encoding used for both output streams
    pub encoding: Encoding,
    /// Shell family to use (None = detect the host once at construction)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
}

impl RunnerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set output encoding
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Pin the shell family instead of detecting it
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }
}
