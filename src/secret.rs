//! API key references.
//!
//! Keys are never stored resolved in the config file. A reference names
//! where the key comes from and is resolved once, when the LLM client is
//! built.

use crate::error::{Result, ScribeError};
use serde::{Deserialize, Serialize};

/// Default environment variable holding the OpenAI API key.
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Where to find the LLM API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ApiKeyRef {
    /// No API key (local OpenAI-compatible servers).
    None,
    /// Inline literal key (discouraged; use env/command when possible).
    Literal { value: String },
    /// Resolve the key from an environment variable.
    Env { var: String },
    /// Resolve the key by running a local command.
    Command { cmd: String },
}

impl Default for ApiKeyRef {
    fn default() -> Self {
        Self::Env {
            var: DEFAULT_API_KEY_ENV.to_owned(),
        }
    }
}

impl ApiKeyRef {
    /// Resolve the reference to a key.
    ///
    /// # Errors
    ///
    /// Returns [`ScribeError::Config`] when the variable is missing or
    /// empty, or the command fails or prints nothing.
    pub fn resolve(&self) -> Result<Option<String>> {
        match self {
            Self::None => Ok(None),
            Self::Literal { value } => {
                if value.trim().is_empty() {
                    return Err(ScribeError::Config("literal API key is empty".to_owned()));
                }
                Ok(Some(value.clone()))
            }
            Self::Env { var } => {
                let value = std::env::var(var).map_err(|_| {
                    ScribeError::Config(format!("API key env var is missing: {var}"))
                })?;
                if value.trim().is_empty() {
                    return Err(ScribeError::Config(format!(
                        "API key env var is empty: {var}"
                    )));
                }
                Ok(Some(value))
            }
            Self::Command { cmd } => {
                if cmd.trim().is_empty() {
                    return Err(ScribeError::Config("API key command is empty".to_owned()));
                }
                let output = std::process::Command::new("/bin/sh")
                    .arg("-c")
                    .arg(cmd)
                    .output()
                    .map_err(|e| {
                        ScribeError::Config(format!("failed to run API key command: {e}"))
                    })?;

                if !output.status.success() {
                    return Err(ScribeError::Config(format!(
                        "API key command failed with status {}",
                        output
                            .status
                            .code()
                            .map_or_else(|| "unknown".to_owned(), |c| c.to_string())
                    )));
                }

                let value = String::from_utf8_lossy(&output.stdout).trim().to_owned();
                if value.is_empty() {
                    return Err(ScribeError::Config(
                        "API key command returned empty output".to_owned(),
                    ));
                }

                Ok(Some(value))
            }
        }
    }

    /// Short description safe for logs (never includes the key itself).
    pub fn describe(&self) -> String {
        match self {
            Self::None => "none".to_owned(),
            Self::Literal { .. } => "literal".to_owned(),
            Self::Env { var } => format!("env:{var}"),
            Self::Command { .. } => "command".to_owned(),
        }
    }
}
